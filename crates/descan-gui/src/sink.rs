use std::sync::mpsc;

use descan_core::pipeline::{PreviewImage, PreviewSink};
use descan_core::raster::Raster;

use crate::messages::UiEvent;

/// Preview sink that forwards published images to the UI thread and
/// wakes it up for a repaint.
pub struct ChannelSink {
    tx: mpsc::Sender<UiEvent>,
    ctx: egui::Context,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<UiEvent>, ctx: egui::Context) -> Self {
        Self { tx, ctx }
    }

    pub fn send_error(&self, message: impl Into<String>) {
        let _ = self.tx.send(UiEvent::Error {
            message: message.into(),
        });
        self.ctx.request_repaint();
    }
}

impl PreviewSink for ChannelSink {
    fn publish(&mut self, which: PreviewImage, image: &Raster) {
        let _ = self.tx.send(UiEvent::Preview {
            which,
            image: image.clone(),
        });
        self.ctx.request_repaint();
    }
}
