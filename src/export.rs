//! CSV export of the papers found.
//!
//! Author lists are flattened into single cells, names separated by `|`.

use crate::error::Result;
use crate::models::Paper;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// CSV column order
pub const COLUMNS: &[&str] = &[
    "id",
    "submitted",
    "updated",
    "authors_of_interest",
    "authors",
    "title",
    "abstract",
    "url",
];

/// Separator between author names within a cell
pub const AUTHOR_SEPARATOR: &str = "|";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One CSV row
#[derive(Debug, Serialize)]
struct PaperRow<'a> {
    id: &'a str,
    submitted: String,
    updated: String,
    authors_of_interest: String,
    authors: String,
    title: &'a str,
    #[serde(rename = "abstract")]
    abstract_text: &'a str,
    url: &'a str,
}

impl<'a> From<&'a Paper> for PaperRow<'a> {
    fn from(paper: &'a Paper) -> Self {
        Self {
            id: &paper.id,
            submitted: format_timestamp(&paper.submitted),
            updated: format_timestamp(&paper.updated),
            authors_of_interest: paper.authors_of_interest.join(AUTHOR_SEPARATOR),
            authors: paper.authors.join(AUTHOR_SEPARATOR),
            title: &paper.title,
            abstract_text: &paper.abstract_text,
            url: &paper.url,
        }
    }
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Output file name for a query window, such as `papers_2025-01-28_2025-03-20.csv`.
pub fn output_file_name(start: NaiveDate, end: NaiveDate) -> String {
    format!("papers_{}_{}.csv", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
}

/// Output path for a query window inside `output_dir`.
pub fn output_path(output_dir: &Path, start: NaiveDate, end: NaiveDate) -> PathBuf {
    output_dir.join(output_file_name(start, end))
}

/// Write papers to any writer, ascending by id. The header is always written.
pub fn write_csv<W: std::io::Write>(writer: W, papers: &[Paper]) -> Result<()> {
    let mut sorted: Vec<&Paper> = papers.iter().collect();
    sorted.sort_by(|a, b| a.id.cmp(&b.id));

    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for paper in sorted {
        wtr.serialize(PaperRow::from(paper))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save papers to a CSV file.
///
/// The file only appears under `path` once it has been written completely.
pub fn save_csv(path: &Path, papers: &[Paper]) -> Result<()> {
    write_atomically(path, |file| write_csv(file, papers))?;
    info!(path = %path.display(), count = papers.len(), "Saved CSV");
    Ok(())
}

/// Write into a temporary file next to `path`, then move it into place.
///
/// On error the temporary file is removed and `path` is left untouched.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
