pub mod bilateral;
pub mod gaussian_blur;
pub mod levels;
pub mod resize;
pub mod threshold;
