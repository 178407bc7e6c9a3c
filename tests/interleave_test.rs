use pakonpipe::interleave::interleave;
use pakonpipe::PakonError;

fn planar_from_channels(reds: &[u16], greens: &[u16], blues: &[u16]) -> Vec<u8> {
  let mut planar = Vec::with_capacity(reds.len() * 6);
  for plane in [reds, greens, blues].iter() {
    for &sample in plane.iter() {
      planar.extend_from_slice(&sample.to_le_bytes());
    }
  }
  planar
}

#[test]
fn picks_samples_from_the_three_planes() {
  let planar = planar_from_channels(&[1, 2, 3, 4], &[5, 6, 7, 8], &[9, 10, 11, 12]);
  let buf = interleave(&planar, 2, 2).unwrap();
  assert_eq!(buf.width, 2);
  assert_eq!(buf.height, 2);
  assert_eq!(buf.colors, 3);
  assert_eq!(buf.data, vec![1, 5, 9, 2, 6, 10, 3, 7, 11, 4, 8, 12]);
}

#[test]
fn samples_are_little_endian() {
  let planar = planar_from_channels(&[0x1234], &[0xabcd], &[0x00ff]);
  assert_eq!(planar[0], 0x34);
  assert_eq!(planar[1], 0x12);
  let buf = interleave(&planar, 1, 1).unwrap();
  assert_eq!(buf.data, vec![0x1234, 0xabcd, 0x00ff]);
}

#[test]
fn planar_to_interleaved_is_a_bijection() {
  // A deterministic scramble of sample values
  let mut state: u32 = 0x2545f491;
  let mut next = move || {
    state ^= state << 13;
    state ^= state >> 17;
    state ^= state << 5;
    (state & 0xffff) as u16
  };

  let width = 31;
  let height = 17;
  let n = width * height;
  let reds: Vec<u16> = (0..n).map(|_| next()).collect();
  let greens: Vec<u16> = (0..n).map(|_| next()).collect();
  let blues: Vec<u16> = (0..n).map(|_| next()).collect();

  let planar = planar_from_channels(&reds, &greens, &blues);
  let buf = interleave(&planar, width, height).unwrap();

  // Taking the interleaved buffer apart plane by plane recovers the
  // original body byte for byte
  let mut rebuilt = Vec::with_capacity(planar.len());
  for channel in 0..3 {
    for pix in buf.data.chunks_exact(3) {
      rebuilt.extend_from_slice(&pix[channel].to_le_bytes());
    }
  }
  assert_eq!(rebuilt, planar);
}

#[test]
fn too_small_planar_buffer_is_rejected() {
  let planar = vec![0u8; 4 * 4 * 6 - 1];
  match interleave(&planar, 4, 4) {
    Err(PakonError::BufferSize { needed, got }) => {
      assert_eq!(needed, 96);
      assert_eq!(got, 95);
    },
    other => panic!("expected a buffer size error, got {:?}", other),
  }
}
