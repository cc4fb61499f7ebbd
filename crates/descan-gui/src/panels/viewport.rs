use descan_core::pipeline::{PointerEvent, Scroll};

use crate::app::DescanApp;
use crate::sink::ChannelSink;

pub fn show(ctx: &egui::Context, app: &mut DescanApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let Some((texture_id, image_size)) = app
            .viewport
            .output
            .as_ref()
            .map(|t| (t.id(), t.size()))
            .filter(|_| app.viewport.image_size.is_some())
        else {
            show_placeholder(ui);
            return;
        };

        let img_rect = fit_rect(rect, image_size);
        draw_image(ui, texture_id, img_rect);

        let response = ui.allocate_rect(img_rect, egui::Sense::hover());
        handle_pointer(ui, &response, app, img_rect, image_size);
    });
}

/// Forward pointer moves and scrolls over the image to the lens,
/// mapped back to image pixel coordinates. Only actual movement or a
/// scroll produces an event, so idle hovering does not re-render.
fn handle_pointer(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut DescanApp,
    img_rect: egui::Rect,
    image_size: [usize; 2],
) {
    if !response.hovered() {
        app.viewport.last_pointer = None;
        return;
    }
    let Some(pos) = response.hover_pos() else {
        return;
    };

    let scale_x = image_size[0] as f32 / img_rect.width();
    let scale_y = image_size[1] as f32 / img_rect.height();
    let x = (((pos.x - img_rect.min.x) * scale_x) as usize).min(image_size[0] - 1);
    let y = (((pos.y - img_rect.min.y) * scale_y) as usize).min(image_size[1] - 1);

    let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
    let scroll = if scroll_delta > 0.0 {
        Some(Scroll::In)
    } else if scroll_delta < 0.0 {
        Some(Scroll::Out)
    } else {
        None
    };

    if scroll.is_none() && app.viewport.last_pointer == Some((x, y)) {
        return;
    }
    app.viewport.last_pointer = Some((x, y));

    if let Some(session) = &app.session {
        let mut sink = ChannelSink::new(app.event_tx.clone(), ui.ctx().clone());
        session.on_pointer(PointerEvent { x, y, scroll }, &mut sink);
    }
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Largest rect with the image's aspect ratio that fits the panel.
fn fit_rect(rect: egui::Rect, image_size: [usize; 2]) -> egui::Rect {
    let image = egui::vec2(image_size[0] as f32, image_size[1] as f32);
    let scale = (rect.width() / image.x).min(rect.height() / image.y);
    egui::Rect::from_center_size(rect.center(), image * scale)
}

fn draw_image(ui: &egui::Ui, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter().image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open a scanned page to begin")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
