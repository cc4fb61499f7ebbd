/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of transform stages in the fixed pipeline.
pub const STAGE_COUNT: usize = 7;

/// Pixel value used for constant padding (paper background).
pub const PAD_VALUE: u8 = 255;

/// Default long edge of the rescaled image in pixels (stage 3).
pub const DEFAULT_TARGET_SIZE: usize = 10_000;

/// Lower clamp for the target size.
pub const MIN_TARGET_SIZE: usize = 10;

/// Blur kernel size as a percentage of the target size; used when
/// re-deriving the kernel from the target size on reset.
pub const DEFAULT_KERNEL_PERCENT: f64 = 1.5;

/// Default lower bound of the content intensity range.
pub const DEFAULT_THRESHOLD_BLACK: u8 = 0;

/// Default upper bound of the content intensity range. Pixels above
/// this are treated as paper background.
pub const DEFAULT_THRESHOLD_WHITE: u8 = 240;

/// Default margin kept around detected content, in source pixels.
pub const DEFAULT_BORDER: usize = 10;

/// Default contrast gain, in hundredths (stage 5).
pub const DEFAULT_CONTRAST_ALPHA: u32 = 10_000;

/// Default contrast pivot, in hundredths (stage 5).
pub const DEFAULT_CONTRAST_BETA: u32 = 60;

/// Default bilateral filter neighborhood diameter (stage 1).
pub const DEFAULT_BILATERAL_DIAMETER: usize = 15;

/// Default bilateral filter intensity sigma (stage 1).
pub const DEFAULT_BILATERAL_SIGMA_COLOR: f64 = 80.0;

/// Default bilateral filter spatial sigma (stage 1).
pub const DEFAULT_BILATERAL_SIGMA_SPACE: f64 = 80.0;

/// Default binarization cutover (stage 7).
pub const DEFAULT_BINARY_THRESHOLD: u8 = 127;

/// Initial lens magnification.
pub const DEFAULT_LENS_ZOOM: f32 = 1.0;

/// Lens rectangle line thickness is image width divided by this, min 1.
pub const LENS_THICKNESS_DIVISOR: usize = 200;

/// Lens viewport size (pixels) before the front-end reports one.
pub const DEFAULT_LENS_VIEWPORT: (usize, usize) = (256, 256);
