use std::path::PathBuf;

use descan_core::pipeline::PreviewImage;
use descan_core::raster::Raster;

/// Events delivered back to the UI thread.
pub enum UiEvent {
    /// The file dialog picked an input image.
    Opened { path: PathBuf },
    /// A preview image was published by the pipeline.
    Preview { which: PreviewImage, image: Raster },
    /// The final result was written to disk.
    Saved { path: PathBuf },
    Error { message: String },
}
