use std::path::PathBuf;

/// Edge length of the lens pane, in preview pixels.
pub const LENS_PANE_SIZE: usize = 240;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub file_path: Option<PathBuf>,
    /// Source dimensions after orientation normalization (w, h).
    pub source_size: Option<(usize, usize)>,
    /// True while a save is in flight on a worker thread.
    pub is_saving: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}

/// Preview display state.
#[derive(Default)]
pub struct ViewportState {
    /// Latest full pipeline result.
    pub output: Option<egui::TextureHandle>,
    /// Size of the output image in pixels.
    pub image_size: Option<[usize; 2]>,
    /// Magnified crop under the pointer.
    pub lens: Option<egui::TextureHandle>,
    /// Last pointer position forwarded to the lens, in image coords.
    pub last_pointer: Option<(usize, usize)>,
}
