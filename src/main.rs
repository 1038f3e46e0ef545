//! Native preview window for the starfield background
//!
//! Run with: cargo run --features native --bin starfield-viewer
//! Optional: STARFIELD_CONFIG=path/to/config.json

use starfield::core::StarfieldConfig;
use starfield::viewer::{StarfieldApp, DEFAULT_SIZE};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,starfield=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = load_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Starfield")
            .with_inner_size(DEFAULT_SIZE),
        ..Default::default()
    };

    eframe::run_native(
        "Starfield",
        options,
        Box::new(move |cc| Ok(Box::new(StarfieldApp::new(cc, config)))),
    )
}

fn load_config() -> StarfieldConfig {
    let Ok(path) = std::env::var("STARFIELD_CONFIG") else {
        return StarfieldConfig::default();
    };
    match StarfieldConfig::from_file(&path) {
        Ok(config) => {
            info!(path = %path, "Loaded starfield config");
            config
        }
        Err(e) => {
            warn!(path = %path, error = %e, "Ignoring starfield config, using defaults");
            StarfieldConfig::default()
        }
    }
}
