#[macro_use] extern crate serde_derive;
#[macro_use] extern crate log;

mod buffer;
mod error;
mod histogram;
mod opbasics;
mod ops;
mod pipeline;
mod raw;

pub use self::buffer::*;
pub use self::error::*;
pub use self::histogram::*;
pub use self::ops::*;
pub use self::ops::levels::ChannelExtrema;
pub use self::pipeline::*;
pub use self::raw::{PakonRaw, decode_file, decode_stream, MAX_DIMENSION};

use std::io::Read;
use std::path::Path;

/// Decodes one raw file and runs it through the whole pipeline
pub fn process_file<P: AsRef<Path>>(path: P, params: &ToneParams) -> Result<ProcessedImage> {
  let mut pipeline = Pipeline::new_from_file(path, params)?;
  pipeline.run()
}

/// Same as process_file for an already opened byte stream
pub fn process_stream<R: Read>(reader: &mut R, params: &ToneParams) -> Result<ProcessedImage> {
  let mut pipeline = Pipeline::new_from_source(raw::decode_stream(reader)?, params);
  pipeline.run()
}
