use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{PakonError, Result};

/// Largest edge any Pakon scanner produces, headers claiming more mean the
/// file is not actually a Pakon raw
pub const MAX_DIMENSION: usize = 5000;
/// Fixed header size in bytes
pub const HEADER_SIZE: usize = 16;
/// Three channels of 16 bit samples
pub const BYTES_PER_PIXEL: usize = 6;

/// A decoded Pakon raw file: the dimensions from the header plus the planar
/// body. The body holds three contiguous planes of little endian 16 bit
/// samples, all red samples first, then green, then blue.
#[derive(Debug, Clone)]
pub struct PakonRaw {
  pub width: usize,
  pub height: usize,
  pub data: Vec<u8>,
}

impl PakonRaw {
  pub fn npixels(&self) -> usize {
    self.width * self.height
  }
}

pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<PakonRaw> {
  let file = File::open(path)?;
  decode_stream(&mut BufReader::new(file))
}

/// Reads the 16 byte header, validates the dimensions and then reads exactly
/// one planar body. The dimension check runs before the body allocation so a
/// bogus header cannot ask for gigabytes.
pub fn decode_stream<R: Read>(reader: &mut R) -> Result<PakonRaw> {
  let mut header = [0u8; HEADER_SIZE];
  reader.read_exact(&mut header)?;

  let width = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
  let height = u32::from_le_bytes([header[8], header[9], header[10], header[11]]) as usize;

  if width > MAX_DIMENSION || height > MAX_DIMENSION {
    return Err(PakonError::Format(format!(
      "dimensions {}x{} are beyond anything a Pakon produces, this is probably not a raw file",
      width, height
    )));
  }
  if width == 0 || height == 0 {
    return Err(PakonError::Format(format!(
      "header declares an empty {}x{} image", width, height
    )));
  }

  let mut data = vec![0u8; width * height * BYTES_PER_PIXEL];
  reader.read_exact(&mut data)?;

  Ok(PakonRaw { width, height, data })
}
