use pngine::{
  crc32, png_extract_chunks, PngChunkType, PngError, PngParseOptions, PngRawChunkIter,
  ValidationFailurePolicy, PNG_SIGNATURE,
};
use walkdir::WalkDir;

/// One full chunk record: length, type tag, data, correct CRC.
fn chunk_bytes(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut out = Vec::new();
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(ty);
  out.extend_from_slice(data);
  let mut covered = ty.to_vec();
  covered.extend_from_slice(data);
  out.extend_from_slice(&crc32(&covered).to_be_bytes());
  out
}

/// Signature plus each chunk in order.
fn make_png(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
  let mut out = PNG_SIGNATURE.to_vec();
  for (ty, data) in chunks {
    out.extend_from_slice(&chunk_bytes(ty, data));
  }
  out
}

const IHDR_DATA: [u8; 13] = [0, 0, 2, 0x30, 0, 0, 0, 0x78, 8, 6, 0, 0, 0];

fn strict() -> PngParseOptions {
  PngParseOptions { validate_checksums: true, ..Default::default() }
}

#[test]
fn test_round_trip_well_formed_stream() {
  let png = make_png(&[
    (b"IHDR", &IHDR_DATA),
    (b"IDAT", &[1, 2, 3, 4]),
    (b"IDAT", &[5, 6]),
    (b"IEND", &[]),
  ]);
  let chunks = png_extract_chunks(&png, strict()).unwrap();
  assert_eq!(chunks.len(), 4);
  assert!(!chunks.is_empty());
  let tys: Vec<PngChunkType> = chunks.in_order().iter().map(|c| c.ty()).collect();
  assert_eq!(
    tys,
    [PngChunkType::IHDR, PngChunkType::IDAT, PngChunkType::IDAT, PngChunkType::IEND]
  );
  assert_eq!(chunks.in_order()[1].data(), &[1, 2, 3, 4]);
  assert!(chunks.in_order().iter().all(|c| c.crc_is_valid()));
}

#[test]
fn test_extraction_is_idempotent() {
  let png = make_png(&[(b"IHDR", &IHDR_DATA), (b"tEXt", b"k\0v"), (b"IEND", &[])]);
  let a = png_extract_chunks(&png, strict()).unwrap();
  let b = png_extract_chunks(&png, strict()).unwrap();
  assert_eq!(a, b);
}

#[test]
fn test_bad_signature_rejected_when_structure_checked() {
  let good = make_png(&[(b"IHDR", &IHDR_DATA), (b"IEND", &[])]);
  for i in 0..8 {
    let mut bad = good.clone();
    bad[i] ^= 0x40;
    assert_eq!(
      png_extract_chunks(&bad, PngParseOptions::default()),
      Err(PngError::InvalidSignature),
      "byte {i}"
    );
    // with structure checks off the signature bytes are never looked at.
    let lax = PngParseOptions { validate_structure: false, ..Default::default() };
    assert_eq!(png_extract_chunks(&bad, lax).unwrap().len(), 2);
  }
}

#[test]
fn test_first_chunk_rule() {
  let not_ihdr = make_png(&[(b"IDAT", &[1, 2, 3]), (b"IEND", &[])]);
  assert_eq!(
    png_extract_chunks(&not_ihdr, PngParseOptions::default()),
    Err(PngError::InvalidFirstChunk)
  );
  // an IHDR with the wrong data length fails the same rule.
  let short_ihdr = make_png(&[(b"IHDR", &[0; 12]), (b"IEND", &[])]);
  assert_eq!(
    png_extract_chunks(&short_ihdr, PngParseOptions::default()),
    Err(PngError::InvalidFirstChunk)
  );
}

#[test]
fn test_last_chunk_rule() {
  let no_iend = make_png(&[(b"IHDR", &IHDR_DATA), (b"IDAT", &[1])]);
  assert_eq!(
    png_extract_chunks(&no_iend, PngParseOptions::default()),
    Err(PngError::InvalidLastChunk)
  );
  let full_iend = make_png(&[(b"IHDR", &IHDR_DATA), (b"IEND", &[9])]);
  assert_eq!(
    png_extract_chunks(&full_iend, PngParseOptions::default()),
    Err(PngError::InvalidLastChunk)
  );
}

#[test]
fn test_signature_only_stream() {
  let png = PNG_SIGNATURE.to_vec();
  // no chunk exists to satisfy the first-chunk rule.
  assert_eq!(
    png_extract_chunks(&png, PngParseOptions::default()),
    Err(PngError::InvalidFirstChunk)
  );
  let lax = PngParseOptions { validate_structure: false, ..Default::default() };
  assert!(png_extract_chunks(&png, lax).unwrap().is_empty());
}

#[test]
fn test_checksum_mismatch_abort() {
  let mut png = make_png(&[(b"IHDR", &IHDR_DATA), (b"IDAT", &[1, 2, 3]), (b"IEND", &[])]);
  // flip one data byte of the IDAT chunk, leaving its declared CRC alone.
  let idat_data_at = 8 + (4 + 4 + 13 + 4) + 4 + 4;
  png[idat_data_at] ^= 0xFF;
  assert_eq!(png_extract_chunks(&png, strict()), Err(PngError::ChecksumMismatch));
}

#[test]
fn test_checksum_mismatch_skip_drops_only_that_chunk() {
  let mut png = make_png(&[(b"IHDR", &IHDR_DATA), (b"IDAT", &[1, 2, 3]), (b"IEND", &[])]);
  let idat_data_at = 8 + (4 + 4 + 13 + 4) + 4 + 4;
  png[idat_data_at] ^= 0xFF;
  let options = PngParseOptions {
    validate_checksums: true,
    on_validation_failure: ValidationFailurePolicy::SkipChunk,
    ..Default::default()
  };
  let chunks = png_extract_chunks(&png, options).unwrap();
  assert_eq!(chunks.len(), 2);
  let tys: Vec<PngChunkType> = chunks.in_order().iter().map(|c| c.ty()).collect();
  assert_eq!(tys, [PngChunkType::IHDR, PngChunkType::IEND]);
  assert!(chunks.chunks_of_type(PngChunkType::IDAT).is_empty());
}

#[test]
fn test_grouping_matches_appearance_order() {
  let png = make_png(&[
    (b"IHDR", &IHDR_DATA),
    (b"tEXt", b"prompt\0painting of a male elf in a forest"),
    (b"IDAT", &[1]),
    (b"tEXt", b"seed\03120987359786117057"),
    (b"IDAT", &[2]),
    (b"IEND", &[]),
  ]);
  let chunks = png_extract_chunks(&png, strict()).unwrap();
  // bucket keys are exactly the distinct tags, in first-seen order.
  let keys: Vec<PngChunkType> = chunks.by_type().iter().map(|(ty, _)| *ty).collect();
  assert_eq!(
    keys,
    [PngChunkType::IHDR, PngChunkType::tEXt, PngChunkType::IDAT, PngChunkType::IEND]
  );
  // within a bucket the chunks keep their relative stream order.
  let texts = chunks.chunks_of_type(PngChunkType::tEXt);
  assert_eq!(texts.len(), 2);
  assert!(texts[0].data().starts_with(b"prompt\0"));
  assert!(texts[1].data().starts_with(b"seed\0"));
  let idats = chunks.chunks_of_type(PngChunkType::IDAT);
  assert_eq!(idats[0].data(), &[1]);
  assert_eq!(idats[1].data(), &[2]);
  // every in-order chunk is in some bucket and counts agree.
  let bucket_total: usize = chunks.by_type().iter().map(|(_, b)| b.len()).sum();
  assert_eq!(bucket_total, chunks.len());
}

#[test]
fn test_truncated_stream_is_always_fatal() {
  let mut png = make_png(&[(b"IHDR", &IHDR_DATA)]);
  // declare more data than the buffer holds.
  png[8..12].copy_from_slice(&500_u32.to_be_bytes());
  for policy in [ValidationFailurePolicy::Abort, ValidationFailurePolicy::SkipChunk] {
    let options = PngParseOptions {
      validate_structure: false,
      on_validation_failure: policy,
      ..Default::default()
    };
    assert_eq!(png_extract_chunks(&png, options), Err(PngError::TruncatedStream));
  }
  // a buffer shorter than the signature is truncated too.
  let lax = PngParseOptions { validate_structure: false, ..Default::default() };
  assert_eq!(png_extract_chunks(&[1, 2, 3], lax), Err(PngError::TruncatedStream));
}

#[test]
fn test_PngRawChunkIter_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(_) => continue,
    };
    for _ in PngRawChunkIter::new(&v) {
      //
    }
  }
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in PngRawChunkIter::new(&v) {
      //
    }
  }
}
