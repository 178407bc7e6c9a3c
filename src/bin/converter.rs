use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;
use image::ColorType;

extern crate env_logger;
extern crate image;
extern crate pakonpipe;
extern crate rayon;

use rayon::prelude::*;

use pakonpipe::{ProcessedImage, ToneParams};

#[derive(Debug, Copy, Clone, PartialEq)]
enum OutputFormat {
  Png16,
  Jpeg,
  Tiff16,
}

fn usage() {
  println!("converter [options] <file> [file ...]");
  println!("");
  println!("Options:");
  println!("  -b           inputs are black and white negatives");
  println!("  -g <gamma>   encoding gamma (default 1/2.2)");
  println!("  -c <factor>  contrast factor (default 1.08)");
  println!("  -s <factor>  saturation factor (default 1.08)");
  println!("  -f <format>  output format, one of png16, jpeg, tiff16 (default png16)");
  std::process::exit(1);
}

fn error(err: &str) {
  println!("ERROR: {}", err);
  std::process::exit(2);
}

fn main() {
  env_logger::init();

  let args: Vec<_> = env::args().collect();
  if args.len() < 2 {
    usage();
  }

  let mut params = ToneParams::default();
  let mut format = OutputFormat::Png16;
  let mut files: Vec<String> = Vec::new();
  let mut iter = args[1..].iter();
  while let Some(arg) = iter.next() {
    match arg.as_str() {
      "-b" => params.bw_negative = true,
      "-g" => params.gamma = numeric_flag(&mut iter, "-g"),
      "-c" => params.contrast = numeric_flag(&mut iter, "-c"),
      "-s" => params.saturation = numeric_flag(&mut iter, "-s"),
      "-f" => format = format_flag(&mut iter),
      "-h" | "--help" => usage(),
      _ => files.push(arg.clone()),
    }
  }
  if files.is_empty() {
    usage();
  }

  // One conversion per file, rayon spreads the files over the worker pool and
  // a failed file only takes itself down
  let failed: usize = files.par_iter().map(|file| {
    match convert(file, &params, format) {
      Ok(_) => 0,
      Err(e) => {
        println!("ERROR: {}: {}", file, e);
        1
      },
    }
  }).sum();

  if failed > 0 {
    error(&format!("{} of {} files failed", failed, files.len()));
  }
}

fn numeric_flag<T: std::str::FromStr>(iter: &mut std::slice::Iter<String>, flag: &str) -> T {
  match iter.next().and_then(|v| v.parse().ok()) {
    Some(val) => val,
    None => {
      println!("ERROR: {} needs a numeric value", flag);
      std::process::exit(1);
    },
  }
}

fn format_flag(iter: &mut std::slice::Iter<String>) -> OutputFormat {
  match iter.next().map(|v| v.as_str()) {
    Some("png16") => OutputFormat::Png16,
    Some("jpeg") | Some("jpg") => OutputFormat::Jpeg,
    Some("tiff16") | Some("tiff") => OutputFormat::Tiff16,
    _ => {
      println!("ERROR: -f needs one of png16, jpeg or tiff16");
      std::process::exit(1);
    },
  }
}

fn convert(file: &str, params: &ToneParams, format: OutputFormat) -> Result<(), String> {
  let from_time = Instant::now();
  let processed = pakonpipe::process_file(file, params).map_err(|e| e.to_string())?;
  let duration = from_time.elapsed();

  println!("{}: {}x{} pixels processed in {} ms",
           file, processed.buffer.width, processed.buffer.height, duration.as_millis());
  println!("  darkest points are {:?}", processed.extrema.darkest);
  println!("  brightest points are {:?}", processed.extrema.brightest);

  let outfile = output_name(file, params.bw_negative, format);
  save(&processed, &outfile, format)?;
  println!("  saved \"{}\"", outfile.display());
  Ok(())
}

fn output_name(file: &str, bw_negative: bool, format: OutputFormat) -> PathBuf {
  // BW negatives always come out as 16 bit grayscale PNGs
  let ext = if bw_negative {
    "png"
  } else {
    match format {
      OutputFormat::Png16 => "png",
      OutputFormat::Jpeg => "jpg",
      OutputFormat::Tiff16 => "tiff",
    }
  };
  Path::new(file).with_extension(ext)
}

fn save(processed: &ProcessedImage, outfile: &Path, format: OutputFormat) -> Result<(), String> {
  let width = processed.buffer.width as u32;
  let height = processed.buffer.height as u32;

  if processed.buffer.monochrome {
    let gray = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(
      width, height, processed.to_gray16())
      .ok_or_else(|| "gray output buffer has the wrong size".to_string())?;
    return image::DynamicImage::ImageLuma16(gray)
      .save_with_format(outfile, image::ImageFormat::Png)
      .map_err(|e| e.to_string());
  }

  match format {
    OutputFormat::Jpeg => {
      let uf = File::create(outfile).map_err(|e| e.to_string())?;
      let mut f = BufWriter::new(uf);
      let mut jpg_encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut f, 80);
      jpg_encoder
        .encode(&processed.to_8bit(), width, height, ColorType::Rgb8)
        .map_err(|e| e.to_string())
    },
    OutputFormat::Png16 | OutputFormat::Tiff16 => {
      let rgb = image::ImageBuffer::<image::Rgb<u16>, Vec<u16>>::from_raw(
        width, height, processed.buffer.data.clone())
        .ok_or_else(|| "rgb output buffer has the wrong size".to_string())?;
      let imgformat = if format == OutputFormat::Png16 {
        image::ImageFormat::Png
      } else {
        image::ImageFormat::Tiff
      };
      image::DynamicImage::ImageRgb16(rgb)
        .save_with_format(outfile, imgformat)
        .map_err(|e| e.to_string())
    },
  }
}
