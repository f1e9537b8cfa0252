//! Archive packaging of transformation outputs.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use xpub_model::{PipelineError, Result};

/// What packaging left behind for the caller.
#[derive(Debug, Clone)]
pub struct PackageSummary {
    pub archive_path: PathBuf,
    /// Top-level output file names, individually retrievable by callers.
    pub files: Vec<String>,
    /// Entries written into the archive, statics included.
    pub archived_count: usize,
}

/// Number of files under the output directory, recursively.
pub fn count_output_files(output_dir: &Path) -> usize {
    WalkDir::new(output_dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}

/// Build the result archive: every file under `output_dir` as
/// `output/<relative path>`, plus the statics tree (when present) under
/// `output/statics/`. A failed build removes the partial archive; it must
/// never be offered for download.
pub fn package_results(
    output_dir: &Path,
    archive_path: &Path,
    statics_dir: Option<&Path>,
) -> Result<PackageSummary> {
    match build_archive(output_dir, archive_path, statics_dir) {
        Ok(summary) => Ok(summary),
        Err(error) => {
            let _ = fs::remove_file(archive_path);
            Err(error)
        }
    }
}

fn build_archive(
    output_dir: &Path,
    archive_path: &Path,
    statics_dir: Option<&Path>,
) -> Result<PackageSummary> {
    let file = File::create(archive_path).map_err(|error| {
        PipelineError::Packaging(format!("create {}: {error}", archive_path.display()))
    })?;
    let mut zip = ZipWriter::new(file);
    let mut archived_count = 0usize;

    for entry in WalkDir::new(output_dir) {
        let entry = packaging(entry)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = format!("output/{}", entry_name(entry.path(), output_dir)?);
        append_file(&mut zip, entry.path(), &name)?;
        archived_count += 1;
    }

    if let Some(statics) = statics_dir {
        if statics.is_dir() {
            for entry in WalkDir::new(statics) {
                let entry = packaging(entry)?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let name = format!("output/statics/{}", entry_name(entry.path(), statics)?);
                append_file(&mut zip, entry.path(), &name)?;
                archived_count += 1;
            }
        }
    }

    zip.finish()
        .map_err(|error| PipelineError::Packaging(format!("finish archive: {error}")))?;

    let files = top_level_files(output_dir)?;
    debug!(
        archive = %archive_path.display(),
        entries = archived_count,
        viewable = files.len(),
        "archive written"
    );
    Ok(PackageSummary {
        archive_path: archive_path.to_path_buf(),
        files,
        archived_count,
    })
}

/// Flat list of file names directly inside the output directory, sorted.
/// These are the files callers may fetch individually by name.
pub fn top_level_files(output_dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(output_dir).map_err(|error| {
        PipelineError::Packaging(format!("list {}: {error}", output_dir.display()))
    })?;
    for entry in entries {
        let entry = entry
            .map_err(|error| PipelineError::Packaging(format!("list output: {error}")))?;
        let file_type = entry
            .file_type()
            .map_err(|error| PipelineError::Packaging(format!("list output: {error}")))?;
        if file_type.is_file() {
            files.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    files.sort();
    Ok(files)
}

fn append_file(zip: &mut ZipWriter<File>, path: &Path, name: &str) -> Result<()> {
    zip.start_file(name, SimpleFileOptions::default())
        .map_err(|error| PipelineError::Packaging(format!("add {name}: {error}")))?;
    let mut source = File::open(path)
        .map_err(|error| PipelineError::Packaging(format!("open {}: {error}", path.display())))?;
    io::copy(&mut source, zip)
        .map_err(|error| PipelineError::Packaging(format!("add {name}: {error}")))?;
    Ok(())
}

/// Archive entry name relative to `base`, always `/`-separated.
fn entry_name(path: &Path, base: &Path) -> Result<String> {
    let relative = path.strip_prefix(base).map_err(|_| {
        PipelineError::Packaging(format!("{} escapes {}", path.display(), base.display()))
    })?;
    let parts: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn packaging(entry: walkdir::Result<walkdir::DirEntry>) -> Result<walkdir::DirEntry> {
    entry.map_err(|error| PipelineError::Packaging(format!("walk output: {error}")))
}
