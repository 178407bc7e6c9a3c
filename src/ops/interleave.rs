use crate::opbasics::*;

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct OpInterleave {
}

impl OpInterleave {
  pub fn new(_params: &ToneParams) -> OpInterleave {
    OpInterleave{}
  }
}

impl<'a> ImageOp<'a> for OpInterleave {
  fn name(&self) -> &str {"interleave"}
  fn run(&self, pipeline: &PipelineGlobals, _buf: Arc<PixelBuffer>) -> Result<Arc<PixelBuffer>> {
    let img = &pipeline.image;
    Ok(Arc::new(interleave(&img.data, img.width, img.height)?))
  }
}

/// Turns the planar file body into an interleaved RGB buffer. Pixel `i`
/// takes its red sample from the little endian byte pair at planar offset
/// `i*2`, green from `2*w*h + i*2` and blue from `4*w*h + i*2`.
pub fn interleave(planar: &[u8], width: usize, height: usize) -> Result<PixelBuffer> {
  let needed = width * height * BYTES_PER_PIXEL;
  if planar.len() < needed {
    return Err(PakonError::BufferSize { needed, got: planar.len() });
  }

  let plane = width * height * 2;
  let mut out = PixelBuffer::new(width, height, 3, false);
  out.mutate_lines(&(|line: &mut [u16], row| {
    let offset = row * width * 2;
    let reds = &planar[offset..offset + width*2];
    let greens = &planar[plane + offset..plane + offset + width*2];
    let blues = &planar[2*plane + offset..2*plane + offset + width*2];

    for (((pix, r), g), b) in line.chunks_exact_mut(3)
      .zip(reds.chunks_exact(2))
      .zip(greens.chunks_exact(2))
      .zip(blues.chunks_exact(2)) {
      pix[0] = u16::from_le_bytes([r[0], r[1]]);
      pix[1] = u16::from_le_bytes([g[0], g[1]]);
      pix[2] = u16::from_le_bytes([b[0], b[1]]);
    }
  }));
  Ok(out)
}
