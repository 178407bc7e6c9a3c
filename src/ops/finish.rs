use crate::opbasics::*;

/// Mid gray pivot the contrast adjustment scales around
pub const CONTRAST_PIVOT: f32 = 32767.0;
/// Rec.709 derived luma weights, the same constants the W3C filter effects
/// saturation matrix uses
pub const LUMA_WEIGHTS: [f32; 3] = [0.213, 0.715, 0.072];

/// Final look adjustments after tone mapping. Monochrome negatives invert
/// and collapse to gray, color positives get the contrast and saturation
/// trims. The two modes are mutually exclusive.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct OpFinish {
  pub bw_negative: bool,
  pub contrast: f32,
  pub saturation: f32,
}

impl OpFinish {
  pub fn new(params: &ToneParams) -> OpFinish {
    OpFinish {
      bw_negative: params.bw_negative,
      contrast: params.contrast,
      saturation: params.saturation,
    }
  }
}

impl<'a> ImageOp<'a> for OpFinish {
  fn name(&self) -> &str {"finish"}
  fn run(&self, _pipeline: &PipelineGlobals, buf: Arc<PixelBuffer>) -> Result<Arc<PixelBuffer>> {
    Ok(Arc::new(if self.bw_negative {
      let mut out = saturate(&invert(&buf), 0.0);
      out.monochrome = true;
      out
    } else {
      saturate(&contrast(&buf, self.contrast), self.saturation)
    }))
  }
}

/// Flips a negative into a positive, every sample becomes its complement
pub fn invert(buf: &PixelBuffer) -> PixelBuffer {
  buf.mutate_lines_copying(&(|line: &mut [u16], _| {
    for v in line.iter_mut() {
      *v = u16::MAX - *v;
    }
  }))
}

/// Scales each sample's distance from the mid gray pivot
pub fn contrast(buf: &PixelBuffer, factor: f32) -> PixelBuffer {
  buf.mutate_lines_copying(&(|line: &mut [u16], _| {
    for v in line.iter_mut() {
      let scaled = (*v as f32 - CONTRAST_PIVOT) * factor + CONTRAST_PIVOT;
      *v = scaled.max(0.0).min(65535.0) as u16;
    }
  }))
}

/// Scales each channel's distance from the pixel's luma. A factor of 0.0
/// desaturates to gray, 1.0 leaves the pixel alone.
pub fn saturate(buf: &PixelBuffer, factor: f32) -> PixelBuffer {
  buf.mutate_lines_copying(&(|line: &mut [u16], _| {
    for pix in line.chunks_exact_mut(3) {
      let luma = LUMA_WEIGHTS[0] * pix[0] as f32 +
                 LUMA_WEIGHTS[1] * pix[1] as f32 +
                 LUMA_WEIGHTS[2] * pix[2] as f32;
      for c in 0..3 {
        let scaled = luma + (pix[c] as f32 - luma) * factor;
        pix[c] = scaled.max(0.0).min(65535.0) as u16;
      }
    }
  }))
}
