use pngine::{png_extract_chunks, PngParseOptions};

fn main() {
  let args: Vec<String> = std::env::args().collect();
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => {
        println!("got {} bytes.", bytes.len());
        bytes
      }
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    let options = PngParseOptions { validate_checksums: true, ..Default::default() };
    match png_extract_chunks(&bytes, options) {
      Ok(chunks) => {
        for (n, chunk) in chunks.in_order().iter().enumerate() {
          println!("{n}: {chunk:?}");
        }
        for (ty, bucket) in chunks.by_type() {
          println!("{ty:?}: {} chunk(s)", bucket.len());
        }
      }
      Err(e) => println!("extraction failed: {e}"),
    }
  }
}
