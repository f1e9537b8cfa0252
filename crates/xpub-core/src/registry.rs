//! Registry of completed runs and their retained artifacts.
//!
//! Results used to live in an unbounded in-process map; this registry bounds
//! retention explicitly: when full, the oldest run is evicted and its
//! workspace deleted.

use std::collections::{BTreeMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use xpub_model::{RunId, TransformationResult};

use crate::workspace::Workspace;

/// A retained run: its result plus the workspace holding the artifacts.
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub result: TransformationResult,
    pub workspace: Workspace,
}

/// Concurrency-safe map run id -> retained run, with bounded capacity and
/// oldest-first eviction.
#[derive(Debug)]
pub struct RunRegistry {
    capacity: usize,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    order: VecDeque<RunId>,
    runs: BTreeMap<RunId, RunRecord>,
}

impl RunRegistry {
    pub const DEFAULT_CAPACITY: usize = 16;

    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Retain a completed run, evicting (and deleting) the oldest runs once
    /// the capacity is exceeded.
    pub fn insert(&self, record: RunRecord) {
        let mut inner = self.lock();
        let run_id = record.result.run_id.clone();
        inner.order.push_back(run_id.clone());
        inner.runs.insert(run_id, record);
        while inner.order.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            if let Some(evicted) = inner.runs.remove(&oldest) {
                debug!(run_id = %oldest, "evicting retained run");
                evicted.workspace.discard();
            }
        }
    }

    pub fn result(&self, run_id: &RunId) -> Option<TransformationResult> {
        self.lock().runs.get(run_id).map(|record| record.result.clone())
    }

    /// Archive location of a retained run.
    pub fn archive_path(&self, run_id: &RunId) -> Option<PathBuf> {
        self.lock()
            .runs
            .get(run_id)
            .map(|record| record.result.archive_path.clone())
    }

    /// Path of one top-level output file, addressed by run id and name.
    /// Only names in the run's viewable file list resolve.
    pub fn file_path(&self, run_id: &RunId, name: &str) -> Option<PathBuf> {
        let inner = self.lock();
        let record = inner.runs.get(run_id)?;
        if !record.result.files.iter().any(|file| file == name) {
            return None;
        }
        Some(record.result.output_dir.join(name))
    }

    /// Drop a retained run and delete its workspace. Returns whether the run
    /// was known.
    pub fn discard(&self, run_id: &RunId) -> bool {
        let mut inner = self.lock();
        inner.order.retain(|id| id != run_id);
        match inner.runs.remove(run_id) {
            Some(record) => {
                record.workspace.discard();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
