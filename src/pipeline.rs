use crate::ops::*;

extern crate serde;
extern crate serde_yaml;
use self::serde::{Serialize,Deserialize};

use std::fmt::Debug;
use std::sync::Arc;
use std::path::Path;
use std::time::Instant;

/// Caller chosen parameters for one conversion. Every value travels with the
/// pipeline it configures, there is no ambient state, so concurrent
/// conversions with different parameters never observe each other.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
pub struct ToneParams {
  pub bw_negative: bool,
  pub gamma: f64,
  pub contrast: f32,
  pub saturation: f32,
}

impl Default for ToneParams {
  fn default() -> Self {
    Self {
      bw_negative: false,
      gamma: gamma::DEFAULT_GAMMA,
      contrast: 1.08,
      saturation: 1.08,
    }
  }
}

macro_rules! do_timing {
  ($name:expr, $body:expr) => {
    {
      let from_time = Instant::now();
      let ret = {
        $body
      };
      let duration = from_time.elapsed();
      info!("timing: {:>7} ms for |{}", duration.as_millis(), $name);
      ret
    }
  }
}

pub trait ImageOp<'a>: Debug+Serialize+Deserialize<'a> {
  fn name(&self) -> &str;
  fn run(&self, pipeline: &PipelineGlobals, buf: Arc<PixelBuffer>) -> Result<Arc<PixelBuffer>>;
  fn to_settings(&self) -> String {
    serde_yaml::to_string(self).unwrap()
  }
}

#[derive(Debug)]
pub struct PipelineGlobals {
  pub image: PakonRaw,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOps {
  pub interleave: interleave::OpInterleave,
  pub levels: levels::OpLevels,
  pub gamma: gamma::OpGamma,
  pub finish: finish::OpFinish,
}

impl PipelineOps {
  fn new(params: &ToneParams) -> Self {
    Self {
      interleave: interleave::OpInterleave::new(params),
      levels: levels::OpLevels::new(params),
      gamma: gamma::OpGamma::new(params),
      finish: finish::OpFinish::new(params),
    }
  }
}

#[derive(Debug)]
pub struct Pipeline {
  pub globals: PipelineGlobals,
  pub ops: PipelineOps,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineSerialization {
  pub version: u32,
}

/// A fully processed image, the finished interleaved buffer plus the extrema
/// the levels analysis found. The extrema double as a scan quality readout,
/// the converter prints them per file.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
  pub buffer: PixelBuffer,
  pub extrema: levels::ChannelExtrema,
}

impl ProcessedImage {
  /// Downsamples the 16 bit buffer to 8 bits per channel for the JPEG path
  pub fn to_8bit(&self) -> Vec<u8> {
    self.buffer.data.iter().map(|&v| (v / 257) as u8).collect()
  }

  /// Collapses a monochrome buffer to one gray sample per pixel
  pub fn to_gray16(&self) -> Vec<u16> {
    self.buffer.data.chunks_exact(3).map(|pix| pix[0]).collect()
  }
}

impl Pipeline {
  pub fn new_from_file<P: AsRef<Path>>(path: P, params: &ToneParams) -> Result<Pipeline> {
    do_timing!("total new_from_file()", {
      let img = do_timing!("  raw decode", crate::raw::decode_file(path))?;
      Ok(Self::new_from_source(img, params))
    })
  }

  pub fn new_from_source(img: PakonRaw, params: &ToneParams) -> Pipeline {
    Pipeline {
      globals: PipelineGlobals {
        image: img,
      },
      ops: PipelineOps::new(params),
    }
  }

  pub fn to_serial(&self) -> String {
    let serial = (PipelineSerialization {
      version: 0,
    }, &self.ops);

    serde_yaml::to_string(&serial).unwrap()
  }

  pub fn new_from_serial(img: PakonRaw, serial: &str) -> Result<Pipeline> {
    let serial: (PipelineSerialization, PipelineOps) = serde_yaml::from_str(serial)
      .map_err(|err| PakonError::Format(format!("settings do not parse: {}", err)))?;

    Ok(Pipeline {
      globals: PipelineGlobals {
        image: img,
      },
      ops: serial.1,
    })
  }

  /// Runs the full pipeline: interleave, levels analysis and remap, gamma,
  /// finishing. The analysis result is captured between the levels stages so
  /// the image is only scanned once.
  pub fn run(&mut self) -> Result<ProcessedImage> {
    do_timing!("  total pipeline", {
      // Start from a dummy buffer, interleave reads the planar body instead
      let bufin = Arc::new(PixelBuffer::default());
      let interleaved = do_timing!("    interleave",
        self.ops.interleave.run(&self.globals, bufin))?;
      let extrema = do_timing!("    analyze",
        self.ops.levels.analyze(&interleaved))?;
      let leveled = do_timing!("    levels",
        Arc::new(self.ops.levels.apply(&interleaved, &extrema)));
      let gammaed = do_timing!("    gamma",
        self.ops.gamma.run(&self.globals, leveled))?;
      let finished = do_timing!("    finish",
        self.ops.finish.run(&self.globals, gammaed))?;

      // Every stage buffer stays inside the pipeline so unwrapping always works
      Ok(ProcessedImage {
        buffer: Arc::try_unwrap(finished).unwrap(),
        extrema,
      })
    })
  }
}
