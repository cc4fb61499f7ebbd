use crate::raster::Raster;

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A zero-area rectangle means "nothing found"; callers must not
    /// crop with it.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink the rectangle to fit a `bound_w` x `bound_h` image, then
    /// translate it so it lies entirely inside. Never fails, whatever
    /// the input.
    pub fn clamped_into(mut self, bound_w: usize, bound_h: usize) -> Rect {
        self.width = self.width.min(bound_w);
        self.height = self.height.min(bound_h);
        self.x = self.x.min(bound_w - self.width);
        self.y = self.y.min(bound_h - self.height);
        self
    }
}

/// Rectangle of the given size centered on `(cx, cy)`, clamped into a
/// `bound_w` x `bound_h` image. Used for the lens inspection window.
pub fn centered_rect(
    cx: usize,
    cy: usize,
    width: usize,
    height: usize,
    bound_w: usize,
    bound_h: usize,
) -> Rect {
    let width = width.clamp(1, bound_w.max(1));
    let height = height.clamp(1, bound_h.max(1));
    let x = (cx as isize - (width / 2) as isize).clamp(0, (bound_w - width) as isize) as usize;
    let y = (cy as isize - (height / 2) as isize).clamp(0, (bound_h - height) as isize) as usize;
    Rect::new(x, y, width, height)
}

/// Tightest rectangle containing every pixel whose intensity lies in
/// `[min, max]` inclusive, expanded by `border` pixels on each side and
/// clamped to the image bounds.
///
/// Returns an empty rectangle when no pixel qualifies (including when
/// `min > max`).
pub fn bounding_box(image: &Raster, min: u8, max: u8, border: usize) -> Rect {
    if image.is_empty() {
        return Rect::default();
    }
    let (h, w) = image.data.dim();
    let mut min_x = w;
    let mut max_x = 0usize;
    let mut min_y = h;
    let mut max_y = 0usize;

    for ((y, x), &p) in image.data.indexed_iter() {
        if p >= min && p <= max {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_x > max_x || min_y > max_y {
        return Rect::default();
    }

    let x0 = min_x.saturating_sub(border);
    let y0 = min_y.saturating_sub(border);
    let x1 = (max_x + border).min(w - 1);
    let y1 = (max_y + border).min(h - 1);
    Rect::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1)
}
