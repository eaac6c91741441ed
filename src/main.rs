// src/main.rs
mod engine;
mod export;
mod gui;
mod source;
mod types;
mod viewer;
use anyhow::Context;
use eframe::egui;
use source::{JsonFileSource, RecordSource, SimulatedSource};

const SIMULATED_PATIENTS: usize = 23;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    // An archive path on the command line replaces the built-in simulator;
    // the HTTP backend stays behind the RecordSource seam either way.
    let source: Box<dyn RecordSource> = match std::env::args().nth(1) {
        Some(path) => Box::new(JsonFileSource::load(&path).context("loading record archive")?),
        None => {
            log::info!("no archive given, serving {SIMULATED_PATIENTS} simulated patients");
            Box::new(SimulatedSource::new(SIMULATED_PATIENTS))
        }
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 820.0])
        .with_min_inner_size([900.0, 640.0])
        .with_title("Cardioscope");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Cardioscope",
        options,
        Box::new(move |_cc| Box::new(gui::CardioscopeApp::new(source))),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch ui: {err}"))
}
