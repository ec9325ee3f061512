use std::fs::File;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn data_dir() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("com", "mltui", "mltui") {
        dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".mltui")
    }
}

pub fn initialize_logging() -> color_eyre::Result<()> {
    let dir = data_dir();
    std::fs::create_dir_all(&dir)?;
    let log_file = File::create(dir.join("mltui.log"))?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true);

    let filter = EnvFilter::try_from_env("MLTUI_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
