use image::RgbImage;

use crate::{
    CardError, CardResult,
    foundation::core::{Canvas, Rgb8},
};

/// Premultiplied RGBA8 pixel buffer, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    pub fn solid(canvas: Canvas, color: Rgb8) -> Self {
        let px = color.opaque_rgba();
        let mut data = Vec::with_capacity(canvas.pixel_count() * 4);
        for _ in 0..canvas.pixel_count() {
            data.extend_from_slice(&px);
        }
        Self {
            width: canvas.width,
            height: canvas.height,
            data,
        }
    }

    pub fn from_rgb(img: &RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for px in img.pixels() {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn from_premul_rgba(width: u32, height: u32, data: Vec<u8>) -> CardResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(CardError::validation("surface byte length mismatch"));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Flatten to opaque RGB, un-premultiplying any partially transparent pixels.
    pub fn to_rgb_image(&self) -> RgbImage {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize * 3);
        for px in self.data.chunks_exact(4) {
            let a = u16::from(px[3]);
            if a == 255 {
                out.extend_from_slice(&px[..3]);
            } else if a == 0 {
                out.extend_from_slice(&[0, 0, 0]);
            } else {
                for &c in &px[..3] {
                    out.push(((u16::from(c) * 255 + a / 2) / a).min(255) as u8);
                }
            }
        }
        // Length is width * height * 3 by construction.
        RgbImage::from_raw(self.width, self.height, out)
            .unwrap_or_else(|| RgbImage::new(self.width, self.height))
    }
}
