use crate::opbasics::*;

/// How far the black point gets pulled down on monochrome negatives so
/// shadow detail survives the remap
pub const BW_BLACK_BIAS: u16 = 100;
/// Matching headroom added above the white point
pub const BW_WHITE_BIAS: u16 = 80;
/// White point ceiling that keeps the bias from overflowing u16
pub const BW_WHITE_CEILING: u16 = 65454;
/// Full scale output of the levels remap
pub const LEVELS_SCALE: f64 = 65534.0;

/// Per channel extremes of an interleaved image.
///
/// The names follow negative film reading: the numerically largest stored
/// sample is the darkest point of the scene once inverted, the smallest is
/// the brightest.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelExtrema {
  pub darkest: [u16; 3],
  pub brightest: [u16; 3],
}

impl ChannelExtrema {
  /// The identity of the extrema reduction, merging it with any other
  /// extrema returns them unchanged
  pub fn identity() -> ChannelExtrema {
    ChannelExtrema {
      darkest: [0; 3],
      brightest: [u16::MAX; 3],
    }
  }

  pub fn accumulate(mut self, pix: &[u16]) -> ChannelExtrema {
    for c in 0..3 {
      self.darkest[c] = cmp::max(self.darkest[c], pix[c]);
      self.brightest[c] = cmp::min(self.brightest[c], pix[c]);
    }
    self
  }

  pub fn merge(mut self, other: ChannelExtrema) -> ChannelExtrema {
    for c in 0..3 {
      self.darkest[c] = cmp::max(self.darkest[c], other.darkest[c]);
      self.brightest[c] = cmp::min(self.brightest[c], other.brightest[c]);
    }
    self
  }

  /// A flat channel stores a single value everywhere and has no range left
  /// to remap
  pub fn is_flat(&self, ch: usize) -> bool {
    self.darkest[ch] == self.brightest[ch]
  }
}

/// Scans the whole image for per channel extrema. Each channel keeps its own
/// accumulator, the per split results merge with max/min which is associative
/// and commutative, so any row partitioning gives the same answer.
pub fn analyze_extrema(buf: &PixelBuffer, bw_negative: bool) -> Result<ChannelExtrema> {
  if buf.width == 0 || buf.height == 0 || buf.data.is_empty() {
    return Err(PakonError::Degenerate("no pixels to analyze".to_string()));
  }

  let mut extrema = buf.fold_lines(ChannelExtrema::identity(),
    &(|mut acc: ChannelExtrema, line: &[u16], _| {
      for pix in line.chunks_exact(3) {
        acc = acc.accumulate(pix);
      }
      acc
    }),
    &(|a: ChannelExtrema, b: ChannelExtrema| a.merge(b)));

  if bw_negative {
    // Monochrome negatives get fixed headroom at both ends, clamped so the
    // biased points stay inside u16
    for c in 0..3 {
      extrema.darkest[c] -= cmp::min(extrema.darkest[c], BW_BLACK_BIAS);
      extrema.brightest[c] = cmp::min(extrema.brightest[c], BW_WHITE_CEILING) + BW_WHITE_BIAS;
    }
  }

  Ok(extrema)
}

/// Remaps every channel so its stored extremes span the full output scale,
/// normalizing exposure and color balance in one linear stretch.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct OpLevels {
  pub bw_negative: bool,
}

impl OpLevels {
  pub fn new(params: &ToneParams) -> OpLevels {
    OpLevels {
      bw_negative: params.bw_negative,
    }
  }

  pub fn analyze(&self, buf: &PixelBuffer) -> Result<ChannelExtrema> {
    analyze_extrema(buf, self.bw_negative)
  }

  /// Applies the remap for already computed extrema. Flat channels pass
  /// through unchanged instead of dividing by zero.
  pub fn apply(&self, buf: &PixelBuffer, extrema: &ChannelExtrema) -> PixelBuffer {
    let flat = [extrema.is_flat(0), extrema.is_flat(1), extrema.is_flat(2)];
    for c in 0..3 {
      if flat[c] {
        warn!("levels: channel {} is flat at {}, passing it through", c, extrema.darkest[c]);
      }
    }

    let darkest = extrema.darkest;
    let brightest = extrema.brightest;
    buf.mutate_lines_copying(&(|line: &mut [u16], _| {
      for pix in line.chunks_exact_mut(3) {
        for c in 0..3 {
          if flat[c] { continue }
          let range = (pix[c] as f64 - brightest[c] as f64) /
                      (darkest[c] as f64 - brightest[c] as f64);
          pix[c] = (range.max(0.0).min(1.0) * LEVELS_SCALE) as u16;
        }
      }
    }))
  }
}

impl<'a> ImageOp<'a> for OpLevels {
  fn name(&self) -> &str {"levels"}
  fn run(&self, _pipeline: &PipelineGlobals, buf: Arc<PixelBuffer>) -> Result<Arc<PixelBuffer>> {
    let extrema = self.analyze(&buf)?;
    Ok(Arc::new(self.apply(&buf, &extrema)))
  }
}
