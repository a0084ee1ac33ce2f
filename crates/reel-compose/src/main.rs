//! Compose worker binary.
//!
//! Runs one compose job from a request JSON file and writes the rendered
//! video to the given output path:
//!
//! ```text
//! reel-compose <request.json> <output-file>
//! ```

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reel_compose::{ComposeConfig, ComposeRequest, Composer};
use reel_media::FfmpegCompositor;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    if let Err(e) = run().await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("reel=info".parse().expect("static directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

async fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        bail!("usage: reel-compose <request.json> <output-file>");
    }
    let request_path = &args[1];
    let output_path = &args[2];

    let config = ComposeConfig::from_env();
    info!("Compose config: {:?}", config);

    reel_media::check_ffmpeg().context("FFmpeg is required")?;
    reel_media::check_ffprobe().context("FFprobe is required")?;

    let raw = tokio::fs::read_to_string(request_path)
        .await
        .with_context(|| format!("Failed to read request file {}", request_path))?;
    let request: ComposeRequest =
        serde_json::from_str(&raw).context("Request file is not valid JSON")?;

    let compositor = Arc::new(FfmpegCompositor::new(config.encoding.clone()));
    let composer = Composer::new(compositor, config);

    let video = composer.compose(&request).await?;

    tokio::fs::write(output_path, &video.bytes)
        .await
        .with_context(|| format!("Failed to write output file {}", output_path))?;

    info!(
        output = %output_path,
        bytes = video.bytes.len(),
        format = %video.format,
        "Rendered video written"
    );
    Ok(())
}
