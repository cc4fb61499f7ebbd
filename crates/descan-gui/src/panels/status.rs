use crate::app::DescanApp;

const LOG_PANEL_HEIGHT: f32 = 90.0;

pub fn show(ctx: &egui::Context, app: &mut DescanApp) {
    egui::TopBottomPanel::bottom("status")
        .exact_height(LOG_PANEL_HEIGHT)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for msg in &app.ui_state.log_messages {
                        ui.small(msg.as_str());
                    }
                });
        });
}
