//! Frame loop controller
//!
//! One synchronous iteration per frame; the cooldown gate and the run
//! counters are the only state carried across iterations. Cancellation is
//! cooperative: the flag is polled at the top of each iteration, so an
//! in-flight detect/notify pair always completes first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use alerting::{CooldownGate, Notifier};
use detection::{aggregate, DangerSet, Detector, RunCounters};
use video_source::{FrameSink, FrameSource};

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Source exhausted (end of file/stream)
    EndOfStream,
    /// Operator-requested cancellation
    Cancelled,
}

/// Final report for one run
#[derive(Debug, Clone, Copy)]
pub struct LoopOutcome {
    pub reason: StopReason,
    pub frames_processed: u64,
    pub counters: RunCounters,
}

/// Drives the per-frame cycle against the injected collaborators.
pub struct FrameLoop {
    danger_set: DangerSet,
    confidence_threshold: f32,
    cooldown: Duration,
    cancel: Arc<AtomicBool>,
    gate: CooldownGate,
    counters: RunCounters,
}

impl FrameLoop {
    pub fn new(
        danger_set: DangerSet,
        confidence_threshold: f32,
        cooldown: Duration,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            danger_set,
            confidence_threshold,
            cooldown,
            cancel,
            gate: CooldownGate::new(),
            counters: RunCounters::default(),
        }
    }

    /// Run until the source is exhausted or cancellation is observed.
    ///
    /// Source and detector errors are fatal and propagate; notifier failures
    /// are logged and leave the gate unchanged, so the next dangerous frame
    /// may retry immediately.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        detector: &mut dyn Detector,
        notifier: &mut dyn Notifier,
        sink: &mut dyn FrameSink,
    ) -> Result<LoopOutcome, crate::PipelineError> {
        let mut frames_processed = 0u64;

        let reason = loop {
            if self.cancel.load(Ordering::Relaxed) {
                info!("Cancellation requested, stopping");
                break StopReason::Cancelled;
            }

            let Some(mut frame) = source.next_frame()? else {
                info!("Source exhausted, stopping");
                break StopReason::EndOfStream;
            };

            let detections = detector.detect(&frame, self.confidence_threshold)?;
            let verdict = aggregate(&detections, &self.danger_set, &mut self.counters);

            if verdict.is_dangerous {
                warn!(
                    "Dangerous frame {}: {:?} (total {})",
                    frame.sequence, verdict.dangerous_labels, self.counters.total_dangerous_detections
                );

                let now = Instant::now();
                if self.gate.is_open(now, self.cooldown) {
                    match notifier.notify(&verdict.dangerous_labels) {
                        Ok(()) => {
                            // The gate moves only on success
                            self.gate.record_success(Instant::now());
                            info!("Alert dispatched for {:?}", verdict.dangerous_labels);
                        }
                        Err(e) => {
                            error!("Alert dispatch failed: {e}");
                        }
                    }
                }
            }

            // Display path runs regardless of verdict and gate state
            overlay::annotate(
                &mut frame,
                &detections,
                &self.danger_set,
                self.counters.total_dangerous_detections,
            );
            sink.present(&frame)?;

            frames_processed += 1;
        };

        info!(
            "Run finished: {} frames, {} dangerous detections",
            frames_processed, self.counters.total_dangerous_detections
        );

        Ok(LoopOutcome {
            reason,
            frames_processed,
            counters: self.counters,
        })
    }

    /// Cumulative counters so far
    pub fn counters(&self) -> RunCounters {
        self.counters
    }
}
