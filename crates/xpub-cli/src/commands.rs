//! Command implementations.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use xpub_core::{PipelineConfig, RunRegistry, spawn_run};
use xpub_engine::CommandEngine;
use xpub_model::ConfigSlot;
use xpub_validate::XmlRecordStore;

use crate::cli::RunArgs;
use crate::summary::{print_failure, print_success};

/// Run one pipeline on a background worker and stream its signals. Returns
/// whether the run succeeded.
pub fn run_transformation(args: &RunArgs) -> Result<bool> {
    let mut config = PipelineConfig::new(&args.export, &args.stylesheet, &args.data_dir);
    config.statics_dir = args.statics_dir.clone();
    if let Some(dir) = &args.workspace_dir {
        config.workspace_base = dir.clone();
    }

    let engine = CommandEngine::new(&args.engine);
    // the projects registry document doubles as the record store
    let store = XmlRecordStore::new(args.data_dir.join(ConfigSlot::Projects.file_name()));
    let registry = Arc::new(RunRegistry::new(RunRegistry::DEFAULT_CAPACITY));

    let handle = spawn_run(
        config,
        Box::new(engine),
        Box::new(store),
        Arc::clone(&registry),
    )
    .context("spawn pipeline worker")?;
    info!(run_id = %handle.run_id(), "pipeline started");

    match handle.wait(|notice| info!("{notice}")) {
        Ok((result, statistics)) => {
            print_success(&result, &statistics);
            if args.discard {
                registry.discard(&result.run_id);
                info!(run_id = %result.run_id, "workspace discarded");
            }
            Ok(true)
        }
        Err(failure) => {
            print_failure(&failure);
            Ok(false)
        }
    }
}

/// List the configuration slots in their fusion order.
pub fn run_slots() {
    for slot in ConfigSlot::ALL {
        println!("{:<22} {}", slot.wrapper_name(), slot.file_name());
    }
}
