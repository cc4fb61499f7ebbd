use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use descan_core::io::image_io::{load_grayscale, save_png};
use descan_core::params::{Control, Params};
use descan_core::pipeline::{PreviewImage, Session, Stage};

use crate::convert::raster_to_color_image;
use crate::messages::UiEvent;
use crate::panels;
use crate::sink::ChannelSink;
use crate::state::{UIState, ViewportState, LENS_PANE_SIZE};

pub struct DescanApp {
    pub event_tx: mpsc::Sender<UiEvent>,
    event_rx: mpsc::Receiver<UiEvent>,
    /// Active pipeline session, one per opened image.
    pub session: Option<Arc<Session>>,
    /// UI-side copy of the knobs, kept in sync with the session.
    pub params: Params,
    pub ui_state: UIState,
    pub viewport: ViewportState,
}

impl DescanApp {
    pub fn new(_ctx: &egui::Context) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            event_tx,
            event_rx,
            session: None,
            params: Params::default(),
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
        }
    }

    /// Drain all pending events from worker threads.
    fn poll_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                UiEvent::Opened { path } => self.open_image(ctx, path),
                UiEvent::Preview { which, image } => {
                    let color = raster_to_color_image(&image);
                    match which {
                        PreviewImage::Output => {
                            self.viewport.image_size = Some(color.size);
                            self.viewport.output = Some(ctx.load_texture(
                                "output",
                                color,
                                egui::TextureOptions::NEAREST,
                            ));
                        }
                        PreviewImage::Lens => {
                            self.viewport.lens = Some(ctx.load_texture(
                                "lens",
                                color,
                                egui::TextureOptions::NEAREST,
                            ));
                        }
                    }
                }
                UiEvent::Saved { path } => {
                    self.ui_state.is_saving = false;
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                UiEvent::Error { message } => {
                    self.ui_state.is_saving = false;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
            }
        }
    }

    fn open_image(&mut self, ctx: &egui::Context, path: PathBuf) {
        let source = match load_grayscale(&path) {
            Ok(source) => source,
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: {e}"));
                return;
            }
        };
        let (w, h) = (source.width(), source.height());

        match Session::new(source, self.params.clone()) {
            Ok(session) => {
                let session = Arc::new(session);
                session.set_lens_viewport(LENS_PANE_SIZE, LENS_PANE_SIZE);
                self.ui_state
                    .add_log(format!("Opened: {} ({w}x{h} normalized)", path.display()));
                self.ui_state.file_path = Some(path);
                self.ui_state.source_size = Some((w, h));
                self.viewport = ViewportState::default();
                self.session = Some(session);
                self.run_stage(ctx, Stage::Binarize);
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    /// Apply a knob change on a worker thread. Events arriving while a
    /// recompute is running are dropped by the session itself.
    pub fn dispatch_control(&self, ctx: &egui::Context, control: Control) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let mut sink = ChannelSink::new(self.event_tx.clone(), ctx.clone());
        std::thread::spawn(move || {
            if let Err(e) = session.on_control(control, &mut sink) {
                sink.send_error(e.to_string());
            }
        });
    }

    /// Recompute from `stage` onward on a worker thread.
    pub fn run_stage(&self, ctx: &egui::Context, stage: Stage) {
        let Some(session) = self.session.clone() else {
            return;
        };
        let mut sink = ChannelSink::new(self.event_tx.clone(), ctx.clone());
        std::thread::spawn(move || {
            if let Err(e) = session.trigger(stage, &mut sink) {
                sink.send_error(e.to_string());
            }
        });
    }

    /// Restore defaults and rerun the whole pipeline with them.
    pub fn reset_params(&mut self, ctx: &egui::Context) {
        match &self.session {
            Some(session) => {
                if session.reset() {
                    self.params = session.params();
                    self.run_stage(ctx, Stage::Denoise);
                }
            }
            None => self.params.reset(),
        }
    }

    /// Pick an output path and persist the final binarized result.
    pub fn save_result(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.clone() else {
            return;
        };
        self.ui_state.is_saving = true;

        let tx = self.event_tx.clone();
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let Some(path) = rfd::FileDialog::new()
                .add_filter("PNG image", &["png"])
                .set_file_name("scan.png")
                .save_file()
            else {
                let _ = tx.send(UiEvent::Error {
                    message: "save cancelled".into(),
                });
                ctx.request_repaint();
                return;
            };

            let mut sink = ChannelSink::new(tx.clone(), ctx.clone());
            let result = session
                .finish(&mut sink)
                .and_then(|image| save_png(&image, &path));
            let event = match result {
                Ok(()) => UiEvent::Saved { path },
                Err(e) => UiEvent::Error {
                    message: e.to_string(),
                },
            };
            let _ = tx.send(event);
            ctx.request_repaint();
        });
    }
}

impl eframe::App for DescanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events(ctx);

        panels::controls::show(ctx, self);
        panels::status::show(ctx, self);
        panels::viewport::show(ctx, self);
    }
}
