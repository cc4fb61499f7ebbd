use descan_core::params::Control;
use descan_core::pipeline::Stage;

use crate::app::DescanApp;
use crate::messages::UiEvent;
use crate::state::LENS_PANE_SIZE;

const LEFT_PANEL_WIDTH: f32 = 280.0;

pub fn show(ctx: &egui::Context, app: &mut DescanApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                file_section(ui, app);
                ui.separator();
                denoise_section(ctx, ui, app);
                ui.separator();
                content_section(ctx, ui, app);
                ui.separator();
                rescale_section(ctx, ui, app);
                ui.separator();
                blur_section(ctx, ui, app);
                ui.separator();
                contrast_section(ctx, ui, app);
                ui.separator();
                binarize_section(ctx, ui, app);
                ui.separator();
                lens_section(ui, app);
                ui.separator();
                actions_section(ctx, ui, app);
            });
        });
}

fn section_header(ui: &mut egui::Ui, label: &str) {
    ui.strong(label);
    ui.add_space(4.0);
}

fn file_section(ui: &mut egui::Ui, app: &mut DescanApp) {
    section_header(ui, "File");

    if ui.button("Open...").clicked() {
        let tx = app.event_tx.clone();
        let ctx = ui.ctx().clone();
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["png", "jpg", "jpeg", "tif", "tiff", "bmp"])
                .add_filter("All files", &["*"])
                .pick_file()
            {
                let _ = tx.send(UiEvent::Opened { path });
                ctx.request_repaint();
            }
        });
    }

    if let Some(ref path) = app.ui_state.file_path {
        ui.label(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
    }
    if let Some((w, h)) = app.ui_state.source_size {
        ui.small(format!("{w}x{h} (portrait-normalized)"));
    }
}

fn denoise_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut DescanApp) {
    section_header(ui, "Denoise");

    if ui
        .add(egui::Slider::new(&mut app.params.bilateral_diameter, 0..=100).text("Diameter"))
        .changed()
    {
        app.dispatch_control(ctx, Control::BilateralDiameter(app.params.bilateral_diameter));
    }
    if ui
        .add(
            egui::Slider::new(&mut app.params.bilateral_sigma_color, 0.0..=200.0)
                .text("Sigma color"),
        )
        .changed()
    {
        app.dispatch_control(
            ctx,
            Control::BilateralSigmaColor(app.params.bilateral_sigma_color),
        );
    }
    if ui
        .add(
            egui::Slider::new(&mut app.params.bilateral_sigma_space, 0.0..=200.0)
                .text("Sigma space"),
        )
        .changed()
    {
        app.dispatch_control(
            ctx,
            Control::BilateralSigmaSpace(app.params.bilateral_sigma_space),
        );
    }
}

fn content_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut DescanApp) {
    section_header(ui, "Content range");

    if ui
        .add(egui::Slider::new(&mut app.params.threshold_black, 0..=255).text("Black"))
        .changed()
    {
        app.dispatch_control(ctx, Control::ThresholdBlack(app.params.threshold_black));
    }
    if ui
        .add(egui::Slider::new(&mut app.params.threshold_white, 0..=255).text("White"))
        .changed()
    {
        app.dispatch_control(ctx, Control::ThresholdWhite(app.params.threshold_white));
    }
    if ui
        .add(egui::Slider::new(&mut app.params.border, 0..=150).text("Border"))
        .changed()
    {
        app.dispatch_control(ctx, Control::Border(app.params.border));
    }
}

fn rescale_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut DescanApp) {
    section_header(ui, "Rescale");

    if ui
        .add(
            egui::Slider::new(&mut app.params.target_size, 10..=20_000)
                .text("Target size")
                .logarithmic(true),
        )
        .changed()
    {
        app.dispatch_control(ctx, Control::TargetSize(app.params.target_size));
    }
}

fn blur_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut DescanApp) {
    section_header(ui, "Blur");

    // Even values are bumped to the next odd size by the stage itself.
    if ui
        .add(egui::Slider::new(&mut app.params.kernel_size, 1..=501).text("Kernel"))
        .changed()
    {
        app.dispatch_control(ctx, Control::KernelSize(app.params.kernel_size));
    }
}

fn contrast_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut DescanApp) {
    section_header(ui, "Contrast");

    if ui
        .add(egui::Slider::new(&mut app.params.contrast_alpha, 0..=25_500).text("Gain x100"))
        .changed()
    {
        app.dispatch_control(ctx, Control::ContrastAlpha(app.params.contrast_alpha));
    }
    if ui
        .add(egui::Slider::new(&mut app.params.contrast_beta, 0..=100).text("Pivot x100"))
        .changed()
    {
        app.dispatch_control(ctx, Control::ContrastBeta(app.params.contrast_beta));
    }
}

fn binarize_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut DescanApp) {
    section_header(ui, "Binarize");

    if ui
        .add(egui::Slider::new(&mut app.params.binary_threshold, 0..=255).text("Threshold"))
        .changed()
    {
        app.dispatch_control(ctx, Control::BinaryThreshold(app.params.binary_threshold));
    }
}

fn lens_section(ui: &mut egui::Ui, app: &mut DescanApp) {
    section_header(ui, "Lens");

    let pane = egui::vec2(LENS_PANE_SIZE as f32, LENS_PANE_SIZE as f32);
    match &app.viewport.lens {
        Some(texture) => {
            ui.add(egui::Image::new(texture).fit_to_exact_size(pane));
            ui.small("Scroll over the preview to zoom");
        }
        None => {
            let (rect, _) = ui.allocate_exact_size(pane, egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
            ui.small("Hover the preview to magnify");
        }
    }
}

fn actions_section(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut DescanApp) {
    section_header(ui, "Actions");

    let has_session = app.session.is_some();
    ui.horizontal(|ui| {
        if ui
            .add_enabled(has_session, egui::Button::new("Process All"))
            .clicked()
        {
            app.run_stage(ctx, Stage::Binarize);
        }
        if ui.button("Reset").clicked() {
            app.reset_params(ctx);
        }
    });
    if ui
        .add_enabled(
            has_session && !app.ui_state.is_saving,
            egui::Button::new("Save..."),
        )
        .clicked()
    {
        app.save_result(ctx);
    }
    if app.ui_state.is_saving {
        ui.small("Saving...");
    }
}
