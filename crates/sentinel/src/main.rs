//! Sentinel daemon entry point

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;

use alerting::{EmailNotifier, Notifier};
use detection::{DangerSet, Detector, DetectorConfig, OnnxDetector};
use sentinel::{init_logging, FrameLoop, SentinelConfig};
use video_source::{open_source, FrameSink, NullSink, PngDirSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Sentinel v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1);
    let config = SentinelConfig::load(config_path.as_deref()).context("loading configuration")?;

    // Startup failures (model load, source open) abort before the loop
    let mut detector: Box<dyn Detector + Send> = Box::new(
        OnnxDetector::new(DetectorConfig {
            model_path: config.model_path.clone(),
            class_names: config.class_names.clone(),
            ..Default::default()
        })
        .context("loading detection model")?,
    );

    let mut source = open_source(&config.source).context("opening frame source")?;

    let mut sink: Box<dyn FrameSink + Send> = match &config.output_dir {
        Some(dir) => Box::new(
            PngDirSink::create(PathBuf::from(dir)).context("creating output directory")?,
        ),
        None => Box::new(NullSink),
    };

    let mut notifier: Box<dyn Notifier + Send> = Box::new(EmailNotifier::new(config.email.clone()));

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received");
            cancel_signal.store(true, Ordering::Relaxed);
        }
    });

    let mut frame_loop = FrameLoop::new(
        DangerSet::new(&config.danger_set),
        config.confidence_threshold,
        Duration::from_secs_f64(config.cooldown_seconds),
        cancel,
    );

    let outcome = tokio::task::spawn_blocking(move || {
        frame_loop.run(
            source.as_mut(),
            detector.as_mut(),
            notifier.as_mut(),
            sink.as_mut(),
        )
    })
    .await??;

    info!(
        "Stopped ({:?}). Total dangerous detections: {}",
        outcome.reason, outcome.counters.total_dangerous_detections
    );

    Ok(())
}
