use crate::buffer::*;

/// Intensity buckets per channel
pub const BUCKETS: usize = 256;

/// Computes the intensity histograms of a finished image. Color images get
/// one histogram per channel, monochrome images a single one bucketed on the
/// channel average. Counts accumulate per row split and merge by addition,
/// so the totals do not depend on how rayon partitions the rows.
pub fn histogram(buf: &PixelBuffer, monochrome: bool) -> Vec<[u32; BUCKETS]> {
  if monochrome {
    vec![gray_histogram(buf)]
  } else {
    rgb_histogram(buf).to_vec()
  }
}

/// One histogram per channel, sample `v` lands in bucket `v / 256`
pub fn rgb_histogram(buf: &PixelBuffer) -> [[u32; BUCKETS]; 3] {
  buf.fold_lines([[0u32; BUCKETS]; 3],
    &(|mut acc: [[u32; BUCKETS]; 3], line: &[u16], _| {
      for pix in line.chunks_exact(3) {
        acc[0][(pix[0] / 256) as usize] += 1;
        acc[1][(pix[1] / 256) as usize] += 1;
        acc[2][(pix[2] / 256) as usize] += 1;
      }
      acc
    }),
    &(|a: [[u32; BUCKETS]; 3], b: [[u32; BUCKETS]; 3]| {
      [merge(a[0], b[0]), merge(a[1], b[1]), merge(a[2], b[2])]
    }))
}

/// A single histogram over the integer average of the three channels
pub fn gray_histogram(buf: &PixelBuffer) -> [u32; BUCKETS] {
  buf.fold_lines([0u32; BUCKETS],
    &(|mut acc: [u32; BUCKETS], line: &[u16], _| {
      for pix in line.chunks_exact(3) {
        let avg = (pix[0] as u32 + pix[1] as u32 + pix[2] as u32) / 3;
        acc[(avg / 256) as usize] += 1;
      }
      acc
    }),
    &(|a: [u32; BUCKETS], b: [u32; BUCKETS]| merge(a, b)))
}

fn merge(mut a: [u32; BUCKETS], b: [u32; BUCKETS]) -> [u32; BUCKETS] {
  for (total, count) in a.iter_mut().zip(b.iter()) {
    *total += count;
  }
  a
}
