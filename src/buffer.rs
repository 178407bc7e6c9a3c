extern crate rayon;
use self::rayon::prelude::*;

/// An interleaved image buffer of 16 bit samples, the working currency of
/// the pipeline. `monochrome` marks buffers whose three channels have been
/// collapsed to the same gray value.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
  pub width: usize,
  pub height: usize,
  pub colors: usize,
  pub monochrome: bool,
  pub data: Vec<u16>,
}

impl PixelBuffer {
  pub fn default() -> PixelBuffer {
    PixelBuffer {
      width: 0,
      height: 0,
      colors: 0,
      monochrome: false,
      data: Vec::new(),
    }
  }

  pub fn new(width: usize, height: usize, colors: usize, monochrome: bool) -> PixelBuffer {
    PixelBuffer {
      width: width,
      height: height,
      colors: colors,
      monochrome,
      data: vec![0; width*height*(colors as usize)],
    }
  }

  pub fn mutate_lines<F>(&mut self, closure: &F)
    where F : Fn(&mut [u16], usize)+Sync {

    self.data.par_chunks_mut(self.width*self.colors).enumerate().for_each(|(row, line)| {
      closure(line, row);
    });
  }

  pub fn mutate_lines_copying<F>(&self, closure: &F) -> PixelBuffer
    where F : Fn(&mut [u16], usize)+Sync {

    let mut buf = self.clone();
    buf.data.par_chunks_mut(self.width*self.colors).enumerate().for_each(|(row, line)| {
      closure(line, row);
    });
    buf
  }

  /// Folds every line into an accumulator and merges the per split results.
  /// The merge must be associative and commutative so the outcome does not
  /// depend on how rayon partitions the rows.
  pub fn fold_lines<A, F, M>(&self, identity: A, fold: &F, merge: &M) -> A
    where A : Clone+Send+Sync,
          F : Fn(A, &[u16], usize) -> A+Sync,
          M : Fn(A, A) -> A+Sync {

    if self.data.is_empty() {
      return identity
    }
    self.data.par_chunks(self.width*self.colors).enumerate()
      .fold(|| identity.clone(), |acc, (row, line)| fold(acc, line, row))
      .reduce(|| identity.clone(), |a, b| merge(a, b))
  }

  /// Helper function to allow human readable creation of `PixelBuffer` instances
  pub fn from_rgb_pixels(width: usize, height: usize, pixels: &[(u16, u16, u16)]) -> PixelBuffer {
    assert_eq!(pixels.len(), width * height, "need exactly width*height pixels");

    let mut pixel_data: Vec<u16> = Vec::with_capacity(width * height * 3);
    for &(r, g, b) in pixels {
      pixel_data.push(r);
      pixel_data.push(g);
      pixel_data.push(b);
    }

    PixelBuffer {
      width: width,
      height: height,
      colors: 3,
      monochrome: false,
      data: pixel_data,
    }
  }
}
