//! Background execution of pipeline runs.
//!
//! Each run gets one dedicated worker thread so the caller is never blocked.
//! The worker reports over a channel: zero or more progress notices, then
//! exactly one terminal event. Cancellation is coarse: dropping the handle
//! detaches the worker, and a worker that dies without a terminal event is
//! reported as a fatal failure.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::debug;
use uuid::Uuid;

use xpub_engine::TransformationEngine;
use xpub_model::{
    FailureKind, RunFailure, RunId, StatisticsReport, TransformationResult,
};
use xpub_validate::RecordStore;

use crate::orchestrator::{PipelineConfig, run_pipeline};
use crate::registry::{RunRecord, RunRegistry};

/// Signals a worker sends back to its caller.
#[derive(Debug, Clone)]
pub enum RunEvent {
    /// Human-readable progress notice, one per stage entry.
    Progress(String),
    /// Terminal success payload.
    Finished {
        result: TransformationResult,
        statistics: StatisticsReport,
    },
    /// Terminal failure payload.
    Failed(RunFailure),
}

/// Handle on one background run.
pub struct RunHandle {
    run_id: RunId,
    events: Receiver<RunEvent>,
    thread: JoinHandle<()>,
}

impl RunHandle {
    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    /// The event stream: progress notices followed by one terminal event.
    pub fn events(&self) -> &Receiver<RunEvent> {
        &self.events
    }

    /// Block until the run terminates, forwarding progress notices.
    pub fn wait(
        self,
        mut notice: impl FnMut(&str),
    ) -> std::result::Result<(TransformationResult, StatisticsReport), RunFailure> {
        let mut terminal = None;
        for event in self.events.iter() {
            match event {
                RunEvent::Progress(message) => notice(&message),
                RunEvent::Finished { result, statistics } => {
                    terminal = Some(Ok((result, statistics)));
                }
                RunEvent::Failed(failure) => terminal = Some(Err(failure)),
            }
        }
        let _ = self.thread.join();
        terminal.unwrap_or_else(|| {
            Err(RunFailure {
                run_id: self.run_id,
                kind: FailureKind::Fatal,
                message: "worker terminated without a result".to_string(),
                missing_references: Vec::new(),
            })
        })
    }
}

/// Start one pipeline run on a dedicated worker thread.
///
/// Successful runs are retained in `registry` before the terminal event is
/// delivered, so a caller seeing `Finished` can immediately address the
/// artifacts by run id.
pub fn spawn_run(
    config: PipelineConfig,
    engine: Box<dyn TransformationEngine + Send>,
    store: Box<dyn RecordStore + Send>,
    registry: Arc<RunRegistry>,
) -> io::Result<RunHandle> {
    let run_id = RunId::new(Uuid::new_v4().to_string());
    let (sender, events) = unbounded();
    let worker_run_id = run_id.clone();
    let thread = thread::Builder::new()
        .name(format!("xpub-run-{}", run_id.short()))
        .spawn(move || run_worker(worker_run_id, config, engine, store, &registry, &sender))?;
    Ok(RunHandle {
        run_id,
        events,
        thread,
    })
}

fn run_worker(
    run_id: RunId,
    config: PipelineConfig,
    engine: Box<dyn TransformationEngine + Send>,
    store: Box<dyn RecordStore + Send>,
    registry: &RunRegistry,
    sender: &Sender<RunEvent>,
) {
    let outcome = run_pipeline(run_id, &config, engine.as_ref(), store.as_ref(), |stage| {
        // a dropped receiver only means the caller stopped listening
        let _ = sender.send(RunEvent::Progress(stage.notice().to_string()));
    });
    match outcome {
        Ok(outcome) => {
            registry.insert(RunRecord {
                result: outcome.result.clone(),
                workspace: outcome.workspace,
            });
            let _ = sender.send(RunEvent::Finished {
                result: outcome.result,
                statistics: outcome.statistics,
            });
        }
        Err(failure) => {
            debug!(run_id = %failure.run_id, kind = %failure.kind, "run failed");
            let _ = sender.send(RunEvent::Failed(failure));
        }
    }
}
