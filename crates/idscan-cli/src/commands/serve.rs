//! Serve command - run the HTTP scan service.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use idscan_core::models::config::{IdScanConfig, RecordBackend};

use super::load_config;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Serve member records from a local JSON file
    #[arg(long)]
    records_file: Option<PathBuf>,

    /// OCR provider API key
    #[arg(long, env = "IDSCAN_OCR_API_KEY", hide_env_values = true)]
    ocr_api_key: Option<String>,

    /// Record store API key
    #[arg(long, env = "IDSCAN_RECORDS_API_KEY", hide_env_values = true)]
    records_api_key: Option<String>,

    /// Face similarity API key
    #[arg(long, env = "IDSCAN_FACE_API_KEY", hide_env_values = true)]
    face_api_key: Option<String>,

    /// Face similarity API secret
    #[arg(long, env = "IDSCAN_FACE_API_SECRET", hide_env_values = true)]
    face_api_secret: Option<String>,

    /// Push relay access token
    #[arg(long, env = "IDSCAN_PUSH_ACCESS_TOKEN", hide_env_values = true)]
    push_access_token: Option<String>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    apply_overrides(&mut config, args);

    info!(
        "Verifying {} documents against collection '{}'",
        config.extraction.jurisdiction, config.records.collection
    );

    idscan_server::serve(&config).await?;
    Ok(())
}

fn apply_overrides(config: &mut IdScanConfig, args: ServeArgs) {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(path) = args.records_file {
        config.records.backend = RecordBackend::File;
        config.records.path = path;
    }

    config.ocr.api_key = args.ocr_api_key.or(config.ocr.api_key.take());
    config.records.api_key = args.records_api_key.or(config.records.api_key.take());
    config.face.api_key = args.face_api_key.or(config.face.api_key.take());
    config.face.api_secret = args.face_api_secret.or(config.face.api_secret.take());
    config.push.access_token = args.push_access_token.or(config.push.access_token.take());
}
