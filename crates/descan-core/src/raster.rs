use image::Luma;
use ndarray::{s, Array2};

use crate::geometry::Rect;

/// A single-channel 8-bit image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    /// Pixel data, row-major, shape = (height, width).
    pub data: Array2<u8>,
}

impl Raster {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    pub fn zeros(height: usize, width: usize) -> Self {
        Self::new(Array2::zeros((height, width)))
    }

    pub fn from_elem(height: usize, width: usize, value: u8) -> Self {
        Self::new(Array2::from_elem((height, width), value))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Longer of the two edges, in pixels.
    pub fn long_edge(&self) -> usize {
        self.width().max(self.height())
    }

    /// Surround the image with a constant border `margin` pixels wide.
    pub fn padded(&self, margin: usize, value: u8) -> Raster {
        let (h, w) = self.data.dim();
        let mut out = Array2::from_elem((h + 2 * margin, w + 2 * margin), value);
        out.slice_mut(s![margin..margin + h, margin..margin + w])
            .assign(&self.data);
        Raster::new(out)
    }

    /// Copy out the sub-image covered by `rect`, which must lie within
    /// the image bounds.
    pub fn cropped(&self, rect: &Rect) -> Raster {
        Raster::new(
            self.data
                .slice(s![
                    rect.y..rect.y + rect.height,
                    rect.x..rect.x + rect.width
                ])
                .to_owned(),
        )
    }

    /// XOR every pixel with the same-sized `mask`.
    ///
    /// XOR is its own inverse: applying the same mask twice restores
    /// the original bytes exactly. The lens overlay relies on this.
    pub fn xor_assign(&mut self, mask: &Raster) {
        debug_assert_eq!(self.data.dim(), mask.data.dim());
        self.data.zip_mut_with(&mask.data, |a, &b| *a ^= b);
    }

    /// Draw an axis-aligned rectangle outline with the given line
    /// thickness, clipped to the image bounds.
    pub fn draw_rect_outline(&mut self, rect: &Rect, value: u8, thickness: usize) {
        let (ih, iw) = self.data.dim();
        let x0 = rect.x.min(iw);
        let y0 = rect.y.min(ih);
        let x1 = (rect.x + rect.width).min(iw);
        let y1 = (rect.y + rect.height).min(ih);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let t = thickness.max(1);
        for y in y0..y1 {
            for x in x0..x1 {
                let on_edge = y < y0 + t
                    || y >= y1.saturating_sub(t)
                    || x < x0 + t
                    || x >= x1.saturating_sub(t);
                if on_edge {
                    self.data[[y, x]] = value;
                }
            }
        }
    }

    /// Copy into an `image` crate 8-bit grayscale buffer.
    pub fn to_luma8(&self) -> image::GrayImage {
        let (h, w) = self.data.dim();
        let mut buf = image::GrayImage::new(w as u32, h as u32);
        for ((y, x), &p) in self.data.indexed_iter() {
            buf.put_pixel(x as u32, y as u32, Luma([p]));
        }
        buf
    }

    /// Build from an `image` crate 8-bit grayscale buffer.
    pub fn from_luma8(buf: &image::GrayImage) -> Raster {
        let (w, h) = buf.dimensions();
        let mut data = Array2::<u8>::zeros((h as usize, w as usize));
        for (x, y, p) in buf.enumerate_pixels() {
            data[[y as usize, x as usize]] = p.0[0];
        }
        Raster::new(data)
    }
}
