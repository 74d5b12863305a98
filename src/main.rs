use clap::Parser;
use ecosegrega::core::config;
use ecosegrega::{CameraAccess, tui};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "ecosegrega", about = "Waste segregation helper demo")]
struct Args {
    /// Simulated camera behavior
    #[arg(short, long, value_enum)]
    camera: Option<CameraAccess>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to ecosegrega.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("ecosegrega.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        config::EcoConfig::default()
    });
    let resolved = config::resolve(&file_config, args.camera);

    log::info!("EcoSegrega starting up (camera: {:?})", resolved.camera_access);

    tui::run(resolved)
}
