use crate::color::{self, RGB, RGBA};

/// Rendered image, premultiplied RGBA, row-major with row 0 at the top
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<RGBA>,
}

impl FrameBuffer {
    /// Fully transparent frame
    pub fn new(width: usize, height: usize) -> FrameBuffer {
        FrameBuffer {
            width,
            height,
            pixels: vec![color::zero(); width * height],
        }
    }

    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn clear(&mut self) {
        self.pixels.fill(color::zero());
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&RGBA> {
        if x >= self.width {
            return None;
        }
        self.pixels.get(x + y * self.width)
    }

    pub fn set(&mut self, x: usize, y: usize, rgba: RGBA) {
        if x < self.width && y < self.height {
            self.pixels[x + y * self.width] = rgba;
        }
    }

    pub fn pixels(&self) -> &[RGBA] {
        &self.pixels
    }

    /// Highest opacity of any pixel
    pub fn max_alpha(&self) -> f32 {
        self.pixels.iter().map(|p| p.w).fold(0.0, f32::max)
    }

    fn over(pixel: &RGBA, background: &RGB) -> [u8; 3] {
        let rest = 1.0 - pixel.w;
        let channel = |c: f32, bg: f32| (color::clamp_unit(c + rest * bg) * 255.0).round() as u8;
        [
            channel(pixel.x, background.x),
            channel(pixel.y, background.y),
            channel(pixel.z, background.z),
        ]
    }

    /// Packed `0RGB` words composited over `background`, as window buffers expect
    pub fn to_0rgb(&self, background: &RGB) -> Vec<u32> {
        self.pixels
            .iter()
            .map(|p| {
                let [r, g, b] = Self::over(p, background);
                (r as u32) << 16 | (g as u32) << 8 | b as u32
            })
            .collect()
    }

    /// Three bytes per pixel composited over `background`
    pub fn to_rgb_bytes(&self, background: &RGB) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| Self::over(p, background))
            .collect()
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    #[test]
    fn transparent_shows_background() {
        let frame = FrameBuffer::new(2, 1);
        let bg = vector![1.0, 0.5, 0.0];

        assert_eq!(frame.to_0rgb(&bg), vec![0x00FF8000; 2]);
        assert_eq!(frame.to_rgb_bytes(&bg), vec![255, 128, 0, 255, 128, 0]);
        assert_eq!(frame.max_alpha(), 0.0);
    }

    #[test]
    fn opaque_hides_background() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.set(1, 1, color::new(1.0, 0.0, 0.0, 1.0));

        let words = frame.to_0rgb(&vector![0.0, 0.0, 1.0]);
        assert_eq!(words[3], 0x00FF0000);
        assert_eq!(words[0], 0x000000FF);
        assert_eq!(frame.max_alpha(), 1.0);
    }

    #[test]
    fn premultiplied_over_black() {
        let mut frame = FrameBuffer::new(1, 1);
        frame.set(0, 0, color::new(0.5, 0.25, 0.0, 0.5));
        assert_eq!(frame.to_rgb_bytes(&color::black()), vec![128, 64, 0]);
    }

    #[test]
    fn bounds() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.set(5, 0, color::mono(1.0, 1.0));
        assert_eq!(frame.max_alpha(), 0.0);
        assert!(frame.get(2, 0).is_none());
        assert!(frame.get(0, 2).is_none());
        frame.set(0, 1, color::mono(1.0, 1.0));
        frame.clear();
        assert_eq!(frame.max_alpha(), 0.0);
    }
}
