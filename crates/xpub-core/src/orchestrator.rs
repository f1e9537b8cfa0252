//! Pipeline orchestration with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Cleaning**: read the export, repair known malformations
//! 2. **Fusing**: combine it with the configuration documents
//! 3. **Validating**: gate on unresolved project references
//! 4. **Transforming**: hand the fused document to the external engine
//! 5. **Packaging**: write the run report, decode entities, build the archive
//!
//! Transitions are strictly forward; nothing is retried within a run. Every
//! exit path removes the workspace, fully on failure and partially (the
//! fused intermediate) on success.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use tracing::{debug, info, info_span, warn};

use xpub_engine::TransformationEngine;
use xpub_fuse::{extract_statistics, fuse_documents};
use xpub_ingest::{clean_document, read_source_document, slot_paths};
use xpub_model::{
    PipelineError, ReferenceSet, Result, RunFailure, RunId, SourceDocument, StatisticsReport,
    TransformationRequest, TransformationResult,
};
use xpub_report::{
    REPORT_FILE_NAME, RunReport, count_output_files, decode_output_entities, package_results,
    write_run_report,
};
use xpub_validate::{RecordStore, required_references};

use crate::workspace::{Workspace, default_workspace_base};

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Idle,
    Cleaning,
    Fusing,
    Validating,
    Transforming,
    Packaging,
    Done,
}

impl Stage {
    /// Human-readable progress notice emitted on stage entry.
    pub fn notice(self) -> &'static str {
        match self {
            Self::Idle => "waiting",
            Self::Cleaning => "cleaning source document",
            Self::Fusing => "fusing configuration documents",
            Self::Validating => "validating project references",
            Self::Transforming => "running transformation engine",
            Self::Packaging => "packaging results",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notice())
    }
}

/// Inputs of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// The per-run XML export.
    pub export_path: PathBuf,
    /// Transformation program handed to the engine.
    pub stylesheet_path: PathBuf,
    /// Directory holding the configuration slot documents.
    pub data_dir: PathBuf,
    /// Static assets copied into the archive, when configured.
    pub statics_dir: Option<PathBuf>,
    /// Base directory for run workspaces.
    pub workspace_base: PathBuf,
}

impl PipelineConfig {
    pub fn new(
        export_path: impl Into<PathBuf>,
        stylesheet_path: impl Into<PathBuf>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            export_path: export_path.into(),
            stylesheet_path: stylesheet_path.into(),
            data_dir: data_dir.into(),
            statics_dir: None,
            workspace_base: default_workspace_base(),
        }
    }
}

/// Everything a successful run leaves behind.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub result: TransformationResult,
    pub statistics: StatisticsReport,
    pub references: ReferenceSet,
    /// Retained workspace; owned by the registry afterwards.
    pub workspace: Workspace,
}

/// Execute one pipeline run synchronously on the calling thread.
///
/// `progress` is invoked on entry to each stage. Exactly one terminal value
/// comes back: the outcome, or a failure report carrying the taxonomy kind.
pub fn run_pipeline(
    run_id: RunId,
    config: &PipelineConfig,
    engine: &dyn TransformationEngine,
    store: &dyn RecordStore,
    mut progress: impl FnMut(Stage),
) -> std::result::Result<PipelineOutcome, RunFailure> {
    let span = info_span!("pipeline_run", run_id = %run_id);
    let _guard = span.enter();
    let run_started = Instant::now();

    // Cleaning
    progress(Stage::Cleaning);
    let workspace = match Workspace::create(&config.workspace_base, &run_id) {
        Ok(workspace) => workspace,
        Err(error) => return Err(RunFailure::new(run_id, error)),
    };
    let primary = match read_cleaned_export(&config.export_path) {
        Ok(primary) => primary,
        Err(error) => return Err(abort(run_id, &workspace, error)),
    };
    debug!(origin = %primary.origin, bytes = primary.content.len(), "source cleaned");

    // Fusing
    progress(Stage::Fusing);
    let slots = slot_paths(&config.data_dir);
    let fused = match fuse_documents(&primary, &slots) {
        Ok(fused) => fused,
        Err(error) => return Err(abort(run_id, &workspace, error)),
    };
    for (slot, error) in &fused.slot_errors {
        warn!(slot = %slot, error = %error, "configuration slot recorded as error");
    }
    let fused_path = workspace.fused_document_path();
    if let Err(error) = fs::write(&fused_path, &fused.xml) {
        let error =
            PipelineError::Workspace(format!("write {}: {error}", fused_path.display()));
        return Err(abort(run_id, &workspace, error));
    }
    let statistics = extract_statistics(&fused.xml);
    debug!(
        total_elements = statistics.total_elements,
        max_depth = statistics.max_depth,
        references = statistics.project_references.len(),
        "statistics extracted"
    );

    // Validating: one record-store snapshot, taken here and never re-read.
    progress(Stage::Validating);
    let available = match store.record_ids() {
        Ok(available) => available,
        Err(error) => return Err(abort(run_id, &workspace, error)),
    };
    let required = match required_references(&fused.xml) {
        Ok(required) => required,
        Err(error) => return Err(abort(run_id, &workspace, error)),
    };
    let references = ReferenceSet::check(required, available);
    if !references.passes() {
        let missing = references.missing_list();
        info!(missing = missing.len(), "reference gate blocked the run");
        let error = PipelineError::MissingReferences { missing };
        return Err(abort(run_id, &workspace, error));
    }

    // Transforming
    progress(Stage::Transforming);
    let request = TransformationRequest {
        input: fused_path.clone(),
        stylesheet: config.stylesheet_path.clone(),
    };
    let program = match engine.compile(&request.stylesheet) {
        Ok(program) => program,
        Err(error) => {
            return Err(abort(run_id, &workspace, PipelineError::Engine(error.to_string())));
        }
    };
    let output_dir = workspace.output_dir();
    let primary_output = output_dir.join(REPORT_FILE_NAME);
    let engine_started = Instant::now();
    if let Err(error) = program.run(&request.input, &primary_output, &output_dir) {
        return Err(abort(run_id, &workspace, PipelineError::Engine(error.to_string())));
    }
    let duration = engine_started.elapsed();
    workspace.discard_intermediates();
    info!(duration_ms = duration.as_millis() as u64, "transformation complete");

    // Packaging
    progress(Stage::Packaging);
    let summary = match package_workspace(config, &primary, &workspace, duration.as_secs_f64()) {
        Ok(summary) => summary,
        Err(error) => return Err(abort(run_id, &workspace, error)),
    };

    let result = TransformationResult {
        run_id: run_id.clone(),
        duration_secs: duration.as_secs_f64(),
        output_files_count: summary.output_files_count,
        files: summary.files,
        archive_path: summary.archive_path,
        output_dir,
    };
    progress(Stage::Done);
    info!(
        files = result.output_files_count,
        archive = %result.archive_path.display(),
        duration_ms = run_started.elapsed().as_millis() as u64,
        "run complete"
    );
    Ok(PipelineOutcome {
        result,
        statistics,
        references,
        workspace,
    })
}

struct PackagedWorkspace {
    output_files_count: usize,
    files: Vec<String>,
    archive_path: PathBuf,
}

fn package_workspace(
    config: &PipelineConfig,
    primary: &SourceDocument,
    workspace: &Workspace,
    duration_secs: f64,
) -> Result<PackagedWorkspace> {
    let output_dir = workspace.output_dir();
    let primary_output = output_dir.join(REPORT_FILE_NAME);

    // The count covers everything under output/, the report file included,
    // whether or not the engine produced the nominal primary output itself.
    let mut output_files_count = count_output_files(&output_dir);
    if !primary_output.exists() {
        output_files_count += 1;
    }

    let report = RunReport {
        source_file: primary.origin.clone(),
        stylesheet_file: file_label(&config.stylesheet_path),
        transform_date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        duration_secs,
        run_id: workspace.run_id().clone(),
        output_files_count,
    };
    write_run_report(&primary_output, &report)?;
    decode_output_entities(&output_dir)?;

    let summary = package_results(
        &output_dir,
        &workspace.archive_path(),
        config.statics_dir.as_deref(),
    )?;
    Ok(PackagedWorkspace {
        output_files_count,
        files: summary.files,
        archive_path: summary.archive_path,
    })
}

/// Read the export and apply the textual cleaner.
fn read_cleaned_export(path: &Path) -> Result<SourceDocument> {
    let source = read_source_document(path)?;
    let content = clean_document(&source.content);
    Ok(SourceDocument { content, ..source })
}

/// Discard the workspace and convert the error into the terminal report.
fn abort(run_id: RunId, workspace: &Workspace, error: PipelineError) -> RunFailure {
    workspace.discard();
    RunFailure::new(run_id, error)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|v| v.to_str())
        .unwrap_or("unknown")
        .to_string()
}
