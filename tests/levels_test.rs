use pakonpipe::levels::{analyze_extrema, OpLevels, LEVELS_SCALE};
use pakonpipe::{PakonError, PixelBuffer, ToneParams};

fn op(bw_negative: bool) -> OpLevels {
  OpLevels::new(&ToneParams { bw_negative, ..ToneParams::default() })
}

#[test]
fn finds_per_channel_extrema() {
  let buf = PixelBuffer::from_rgb_pixels(2, 2, &[
    (100, 5000, 40),
    (900, 5000, 41),
    (500, 5000, 39),
    (100, 5000, 40),
  ]);
  let extrema = analyze_extrema(&buf, false).unwrap();
  assert_eq!(extrema.darkest, [900, 5000, 41]);
  assert_eq!(extrema.brightest, [100, 5000, 39]);
}

#[test]
fn extrema_ignore_row_partitioning() {
  let pixels: Vec<(u16, u16, u16)> = (0..97).map(|i| {
    ((i * 523) as u16, (i * 277) as u16, (i * 101) as u16)
  }).collect();
  let row = PixelBuffer::from_rgb_pixels(97, 1, &pixels);
  let column = PixelBuffer::from_rgb_pixels(1, 97, &pixels);
  assert_eq!(analyze_extrema(&row, false).unwrap(),
             analyze_extrema(&column, false).unwrap());
}

#[test]
fn flat_image_has_equal_extrema() {
  let buf = PixelBuffer::from_rgb_pixels(4, 4, &[(0x1000, 0x2000, 0x3000); 16]);
  let extrema = analyze_extrema(&buf, false).unwrap();
  assert_eq!(extrema.darkest, extrema.brightest);
  assert_eq!(extrema.darkest, [0x1000, 0x2000, 0x3000]);
}

#[test]
fn flat_channels_pass_through_unchanged() {
  let buf = PixelBuffer::from_rgb_pixels(4, 4, &[(0x1000, 0x2000, 0x3000); 16]);
  let levels = op(false);
  let extrema = levels.analyze(&buf).unwrap();
  let out = levels.apply(&buf, &extrema);
  assert_eq!(out.data, buf.data);
}

#[test]
fn remap_hits_both_endpoints() {
  let buf = PixelBuffer::from_rgb_pixels(2, 1, &[
    (1000, 1000, 1000),
    (3000, 3000, 3000),
  ]);
  let levels = op(false);
  let extrema = levels.analyze(&buf).unwrap();
  let out = levels.apply(&buf, &extrema);
  // The smallest stored value maps to zero, the largest to full scale
  assert_eq!(&out.data[0..3], &[0, 0, 0]);
  assert_eq!(&out.data[3..6], &[65534, 65534, 65534]);
}

#[test]
fn midpoint_lands_in_the_middle() {
  let buf = PixelBuffer::from_rgb_pixels(3, 1, &[
    (1000, 1000, 1000),
    (2000, 2000, 2000),
    (3000, 3000, 3000),
  ]);
  let levels = op(false);
  let extrema = levels.analyze(&buf).unwrap();
  let out = levels.apply(&buf, &extrema);
  assert_eq!(out.data[3], (LEVELS_SCALE / 2.0) as u16);
}

#[test]
fn remap_is_monotonic() {
  let pixels: Vec<(u16, u16, u16)> = (0..64).map(|i| {
    let v = (i * 1000) as u16;
    (v, v, v)
  }).collect();
  let buf = PixelBuffer::from_rgb_pixels(64, 1, &pixels);
  let levels = op(false);
  let extrema = levels.analyze(&buf).unwrap();
  let out = levels.apply(&buf, &extrema);

  let reds: Vec<u16> = out.data.chunks_exact(3).map(|pix| pix[0]).collect();
  for pair in reds.windows(2) {
    assert!(pair[1] >= pair[0], "remap went backwards: {:?}", pair);
  }
}

#[test]
fn bw_bias_spreads_the_extremes() {
  let buf = PixelBuffer::from_rgb_pixels(2, 1, &[
    (500, 500, 500),
    (60000, 60000, 60000),
  ]);
  let extrema = analyze_extrema(&buf, true).unwrap();
  assert_eq!(extrema.darkest, [59900; 3]);
  assert_eq!(extrema.brightest, [580; 3]);
}

#[test]
fn bw_black_bias_clamps_at_zero() {
  let buf = PixelBuffer::from_rgb_pixels(2, 1, &[(30, 30, 30), (90, 90, 90)]);
  let extrema = analyze_extrema(&buf, true).unwrap();
  assert_eq!(extrema.darkest, [0; 3]);
  assert_eq!(extrema.brightest, [110; 3]);
}

#[test]
fn bw_white_bias_stays_inside_u16() {
  let buf = PixelBuffer::from_rgb_pixels(2, 1, &[
    (65460, 65460, 65460),
    (65500, 65500, 65500),
  ]);
  let extrema = analyze_extrema(&buf, true).unwrap();
  assert_eq!(extrema.darkest, [65400; 3]);
  assert_eq!(extrema.brightest, [65534; 3]);
}

#[test]
fn empty_buffer_is_degenerate() {
  let buf = PixelBuffer::new(0, 0, 3, false);
  match analyze_extrema(&buf, false) {
    Err(PakonError::Degenerate(_)) => {},
    other => panic!("expected a degenerate image error, got {:?}", other),
  }
}
