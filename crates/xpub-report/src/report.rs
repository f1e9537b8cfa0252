//! Machine-readable run report, written by the pipeline (not the engine)
//! over the engine's nominal primary output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use xpub_model::{PipelineError, Result, RunId};

/// File name of the run report inside the output directory.
pub const REPORT_FILE_NAME: &str = "report.xml";

/// Metadata of one successful transformation, as recorded in `report.xml`.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub source_file: String,
    pub stylesheet_file: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`.
    pub transform_date: String,
    /// Engine wall-clock duration in seconds.
    pub duration_secs: f64,
    pub run_id: RunId,
    /// Files under the output directory, the report itself included.
    pub output_files_count: usize,
}

/// Write the fixed-schema `transformation-report` document.
pub fn write_run_report(path: &Path, report: &RunReport) -> Result<()> {
    let file = File::create(path)
        .map_err(|error| PipelineError::Packaging(format!("create {}: {error}", path.display())))?;
    let mut xml = Writer::new_with_indent(BufWriter::new(file), b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(write_error)?;
    xml.write_event(Event::Start(BytesStart::new("transformation-report")))
        .map_err(write_error)?;

    xml.write_event(Event::Start(BytesStart::new("metadata")))
        .map_err(write_error)?;
    write_text_element(&mut xml, "source-file", &report.source_file)?;
    write_text_element(&mut xml, "stylesheet-file", &report.stylesheet_file)?;
    write_text_element(&mut xml, "transform-date", &report.transform_date)?;
    write_text_element(
        &mut xml,
        "transform-time",
        &format!("{:.2} secondes", report.duration_secs),
    )?;
    write_text_element(&mut xml, "transform-id", report.run_id.as_str())?;
    xml.write_event(Event::End(BytesEnd::new("metadata")))
        .map_err(write_error)?;

    xml.write_event(Event::Start(BytesStart::new("transformation-result")))
        .map_err(write_error)?;
    write_text_element(&mut xml, "status", "success")?;
    write_text_element(
        &mut xml,
        "output-files-count",
        &report.output_files_count.to_string(),
    )?;
    xml.write_event(Event::End(BytesEnd::new("transformation-result")))
        .map_err(write_error)?;

    xml.write_event(Event::End(BytesEnd::new("transformation-report")))
        .map_err(write_error)?;

    let mut inner = xml.into_inner();
    inner.flush().map_err(write_error)?;
    Ok(())
}

fn write_text_element<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new(name)))
        .map_err(write_error)?;
    xml.write_event(Event::Text(BytesText::new(text)))
        .map_err(write_error)?;
    xml.write_event(Event::End(BytesEnd::new(name)))
        .map_err(write_error)?;
    Ok(())
}

fn write_error(error: std::io::Error) -> PipelineError {
    PipelineError::Packaging(format!("write run report: {error}"))
}
