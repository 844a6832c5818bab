//! Markdown context writer
//!
//! Produces one document: a project header followed by a fenced block per
//! file, in discovery order. File contents are read in parallel in bounded
//! batches and written through a single writer, so the output is identical to
//! a sequential run.

use crate::progress::ProgressTracker;
use crate::scan::DiscoveredFile;
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Files read concurrently before being written out
const READ_BATCH_SIZE: usize = 64;

/// Outcome of writing a context document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    pub files_written: usize,
    pub files_skipped: usize,
    pub bytes_written: u64,
}

/// Why a file produced no block
#[derive(Debug)]
enum ReadFailure {
    Io(std::io::Error),
    NotUtf8,
}

/// Document header line
pub fn header(project_name: &str) -> String {
    format!("# Context for Project: {project_name}\n\n")
}

/// One file block, including the trailing separator
pub fn file_block(file: &DiscoveredFile, content: &str) -> String {
    format!(
        "## File: `{}`\n\n```{}\n{}\n```\n\n---\n\n",
        file.relative_path,
        file.language(),
        content
    )
}

/// Write the context document for `files` into `writer`
///
/// Files that cannot be read or are not UTF-8 text are skipped with a
/// warning and counted in the summary.
pub fn write_context<W: Write>(
    project_name: &str,
    files: &[DiscoveredFile],
    writer: &mut W,
    progress: &ProgressTracker,
) -> Result<AggregateSummary> {
    let mut summary = AggregateSummary::default();

    let header = header(project_name);
    writer
        .write_all(header.as_bytes())
        .context("Failed to write context header")?;
    summary.bytes_written += header.len() as u64;

    for batch in files.chunks(READ_BATCH_SIZE) {
        let contents: Vec<_> = batch.par_iter().map(|file| read_text(&file.path)).collect();

        for (file, content) in batch.iter().zip(contents) {
            match content {
                Ok(content) => {
                    let block = file_block(file, &content);
                    writer
                        .write_all(block.as_bytes())
                        .with_context(|| format!("Failed to write block for {}", file.relative_path))?;
                    summary.bytes_written += block.len() as u64;
                    summary.files_written += 1;
                    tracing::debug!("Added {}", file.relative_path);
                }
                Err(ReadFailure::NotUtf8) => {
                    tracing::warn!(
                        "Skipping {}: not valid UTF-8 text",
                        file.relative_path
                    );
                    summary.files_skipped += 1;
                }
                Err(ReadFailure::Io(e)) => {
                    tracing::warn!("Could not read file {}: {}", file.relative_path, e);
                    summary.files_skipped += 1;
                }
            }
            progress.file_written();
        }
    }

    writer.flush().context("Failed to flush context output")?;
    Ok(summary)
}

/// Create `output` and write the context document into it
pub fn write_context_file(
    project_name: &str,
    files: &[DiscoveredFile],
    output: &Path,
    progress: &ProgressTracker,
) -> Result<AggregateSummary> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_context(project_name, files, &mut writer, progress)
        .with_context(|| format!("Failed to write {}", output.display()))
}

fn read_text(path: &Path) -> std::result::Result<String, ReadFailure> {
    let bytes = std::fs::read(path).map_err(ReadFailure::Io)?;
    String::from_utf8(bytes).map_err(|_| ReadFailure::NotUtf8)
}
