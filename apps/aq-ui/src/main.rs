#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod views;

use app::AirQualityApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Airqual"),
        ..Default::default()
    };

    eframe::run_native(
        "Airqual",
        options,
        Box::new(|cc| Ok(Box::new(AirQualityApp::new(cc)))),
    )
}
