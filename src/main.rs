mod app;
mod config;
mod engine;
mod error;
mod selection;
mod types;

use app::ImageConverterApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config::WINDOW_SIZE)
            .with_min_inner_size(config::MIN_WINDOW_SIZE)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Simple Image Converter",
        options,
        Box::new(|_cc| Ok(Box::new(ImageConverterApp::new()))),
    )
}
