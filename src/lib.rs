#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! A crate for pulling the chunks out of PNG data.
//!
//! A PNG datastream is an 8-byte signature followed by a series of "chunks".
//! Each chunk is a 4-byte big-endian data length, a 4-byte type tag, the data
//! bytes, and a 4-byte CRC-32 over the type tag and the data. This crate
//! walks that envelope and hands the chunks back to you. It does *not*
//! decompress or decode the image content held within the chunks.
//!
//! ## Iterating Chunks
//! [`PngRawChunkIter`] walks a byte slice and produces each [`PngChunk`]
//! without any allocation. Chunk data is borrowed from the input slice. A
//! read that would run off the end of the buffer produces a single
//! [`TruncatedStream`](PngError::TruncatedStream) error and then the
//! iterator is done.
//!
//! ## Extracting Chunks
//! With the `alloc` feature, [`png_extract_chunks`] runs the whole stream in
//! one pass and collects the chunks into a [`PngChunks`] value, which keeps
//! both the appearance order and a per-type grouping. Pass
//! [`PngParseOptions`] to control the signature/first/last structure checks
//! and the per-chunk CRC verification.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod parser_helpers;
pub(crate) use parser_helpers::*;

pub mod error;
pub use error::*;

pub mod crc32;
pub use crc32::*;

pub mod chunk;
pub use chunk::*;

pub mod validate;
pub use validate::*;

#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub mod decode;
#[cfg(feature = "alloc")]
pub use decode::*;
