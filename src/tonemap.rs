use crate::algebra::Vec3;
use indicatif::ProgressBar;

/// Linear colors, row-major: `buffer[y][x]`, rows top to bottom.
pub type PixelBuffer = Vec<Vec<Vec3>>;

/// Display-ready 8-bit RGBA pixels, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 4]>,
}

impl ColorBuffer {
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// Linear [0, 1] color to 8-bit RGBA, opaque.
#[inline]
pub fn to_rgba(c: Vec3) -> [u8; 4] {
    let c = c.map(|x| (x * 255.0).round().clamp(0.0, 255.0));
    [c.0 as u8, c.1 as u8, c.2 as u8, 255]
}

/// Box-filter `factor × factor` blocks down to one pixel each, then map to
/// RGBA. Rows and columns left over when the size is not divisible by
/// `factor` are dropped.
pub fn downsample(buffer: &PixelBuffer, factor: u32, bar: Option<&ProgressBar>) -> ColorBuffer {
    let f = factor.max(1) as usize;
    let in_h = buffer.len();
    let in_w = buffer.first().map_or(0, |row| row.len());
    let (out_w, out_h) = (in_w / f, in_h / f);

    let weight = 1.0 / (f * f) as f32;
    let mut pixels = Vec::with_capacity(out_w * out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let mut sum = Vec3::ZERO;
            for row in &buffer[y * f..(y + 1) * f] {
                for &p in &row[x * f..(x + 1) * f] {
                    sum = sum + p;
                }
            }
            pixels.push(to_rgba(sum * weight));
        }
        if let Some(b) = bar {
            b.inc(1);
        }
    }

    ColorBuffer { width: out_w as u32, height: out_h as u32, pixels }
}

/// Nearest-neighbour upscale: every pixel becomes a `spacing × spacing`
/// block. Gives the blocky look of a low-resolution render shown full size.
pub fn pixelate(image: &ColorBuffer, spacing: u32) -> ColorBuffer {
    if spacing <= 1 {
        return image.clone();
    }
    let width = image.width * spacing;
    let height = image.height * spacing;
    let pixels = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| image.get(x / spacing, y / spacing))
        .collect();
    ColorBuffer { width, height, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(w: usize, h: usize, c: Vec3) -> PixelBuffer {
        vec![vec![c; w]; h]
    }

    #[test]
    fn test_to_rgba_rounds_and_clamps() {
        assert_eq!(to_rgba(Vec3(0.0, 1.0, 0.5)), [0, 255, 128, 255]);
        assert_eq!(to_rgba(Vec3(-0.3, 1.7, 0.2)), [0, 255, 51, 255]);
    }

    #[test]
    fn test_constant_buffer_stays_constant() {
        let c = Vec3(0.2, 0.4, 1.0);
        let expected = to_rgba(c);
        assert_eq!(expected, [51, 102, 255, 255]);
        for factor in 1..=5 {
            let out = downsample(&constant(30, 20, c), factor, None);
            assert_eq!(out.width, 30 / factor);
            assert_eq!(out.height, 20 / factor);
            assert!(out.pixels.iter().all(|&p| p == expected), "factor {factor}");
        }
    }

    #[test]
    fn test_block_average() {
        // 2x2 checkerboard of black/white averages to mid grey.
        let black = Vec3::ZERO;
        let white = Vec3::ONE;
        let buffer = vec![vec![black, white], vec![white, black]];
        let out = downsample(&buffer, 2, None);
        assert_eq!(out.width, 1);
        assert_eq!(out.height, 1);
        assert_eq!(out.get(0, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn test_remainder_rows_and_columns_are_dropped() {
        let mut buffer = constant(7, 5, Vec3::ZERO);
        // Only the truncated column and row are lit.
        for row in buffer.iter_mut() {
            row[6] = Vec3::ONE;
        }
        buffer[4] = vec![Vec3::ONE; 7];
        let out = downsample(&buffer, 2, None);
        assert_eq!((out.width, out.height), (3, 2));
        assert!(out.pixels.iter().all(|&p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn test_output_keeps_scanline_order() {
        let buffer: PixelBuffer = (0..4)
            .map(|y| (0..4).map(|x| Vec3(x as f32 / 3.0, y as f32 / 3.0, 0.0)).collect())
            .collect();
        let out = downsample(&buffer, 2, None);
        // Top-left block is darkest, bottom-right brightest.
        let tl = out.get(0, 0);
        let tr = out.get(1, 0);
        let bl = out.get(0, 1);
        assert!(tr[0] > tl[0] && tr[1] == tl[1]);
        assert!(bl[1] > tl[1] && bl[0] == tl[0]);
    }

    #[test]
    fn test_pixelate_blocks() {
        let image = ColorBuffer {
            width: 2,
            height: 1,
            pixels: vec![[10, 20, 30, 255], [40, 50, 60, 255]],
        };
        let big = pixelate(&image, 3);
        assert_eq!((big.width, big.height), (6, 3));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(big.get(x, y), [10, 20, 30, 255]);
                assert_eq!(big.get(x + 3, y), [40, 50, 60, 255]);
            }
        }
        assert_eq!(pixelate(&image, 1), image);
        assert_eq!(big.pixels.len(), 6 * 3);
    }
}
