use crate::opbasics::*;

/// Fixed per channel balance folded into the gamma exponent, tuned for the
/// scanner's color response
pub const GAMMA_BALANCE: [f64; 3] = [0.98, 1.02, 1.03];
/// Scale the transfer function normalizes against. Slightly below full u16
/// range, so the very top samples push pow() past 1.0 and need clamping.
pub const GAMMA_SCALE: f64 = 65500.0;
/// Encoding gamma for display, 1/2.2
pub const DEFAULT_GAMMA: f64 = 0.4545454545454545;

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct OpGamma {
  pub gamma: f64,
}

impl OpGamma {
  pub fn new(params: &ToneParams) -> OpGamma {
    OpGamma {
      gamma: params.gamma,
    }
  }
}

impl<'a> ImageOp<'a> for OpGamma {
  fn name(&self) -> &str {"gamma"}
  fn run(&self, _pipeline: &PipelineGlobals, buf: Arc<PixelBuffer>) -> Result<Arc<PixelBuffer>> {
    // Three full range lookup tables instead of a pow() per sample
    let luts = [
      gamma_lut(self.gamma, GAMMA_BALANCE[0]),
      gamma_lut(self.gamma, GAMMA_BALANCE[1]),
      gamma_lut(self.gamma, GAMMA_BALANCE[2]),
    ];

    Ok(Arc::new(buf.mutate_lines_copying(&(|line: &mut [u16], _| {
      for pix in line.chunks_exact_mut(3) {
        pix[0] = luts[0][pix[0] as usize];
        pix[1] = luts[1][pix[1] as usize];
        pix[2] = luts[2][pix[2] as usize];
      }
    }))))
  }
}

/// Builds the full 16 bit transfer table for one channel. Inputs above
/// `GAMMA_SCALE` would map past the u16 range, the output is clamped there
/// instead of being left to wrap.
pub fn gamma_lut(gamma: f64, balance: f64) -> Vec<u16> {
  let mut lut = vec![0u16; 65536];
  for (i, out) in lut.iter_mut().enumerate() {
    let corrected = (i as f64 / GAMMA_SCALE).powf(gamma * balance) * GAMMA_SCALE;
    *out = corrected.max(0.0).min(65535.0) as u16;
  }
  lut
}
