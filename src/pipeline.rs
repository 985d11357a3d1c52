//! Query pipeline: configuration in, deduplicated papers out.
//!
//! Every (category, person) pair is queried in turn with the same client, so
//! all requests share one rate limit. Any error aborts the whole run.

use crate::arxiv::{Search, SearchClient};
use crate::error::Result;
use crate::export;
use crate::models::{Configuration, Paper};
use crate::parser::parse_entry;
use crate::query::build_query;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Papers keyed by arXiv id.
///
/// A paper found again by a later query is not duplicated; its authors of
/// interest are merged instead.
#[derive(Debug, Default)]
pub struct PaperSet {
    papers: BTreeMap<String, Paper>,
}

impl PaperSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, paper: Paper) {
        match self.papers.get_mut(&paper.id) {
            Some(existing) => existing.merge_authors_of_interest(&paper.authors_of_interest),
            None => {
                self.papers.insert(paper.id.clone(), paper);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    /// The papers in ascending order of id.
    pub fn into_sorted_vec(self) -> Vec<Paper> {
        self.papers.into_values().collect()
    }
}

impl Extend<Paper> for PaperSet {
    fn extend<I: IntoIterator<Item = Paper>>(&mut self, iter: I) {
        for paper in iter {
            self.insert(paper);
        }
    }
}

/// Query arXiv for all papers of the configured people.
///
/// Returns each paper once, in ascending order of id.
pub async fn arxiv_papers<C>(client: &C, config: &Configuration) -> Result<Vec<Paper>>
where
    C: SearchClient + ?Sized,
{
    let mut papers = PaperSet::new();

    for category_query in &config.category_queries {
        let category = category_query.category.as_str();

        for person in &category_query.authors {
            info!(category, author = %person, "Querying arXiv");

            let search = Search::new(build_query(category, person, config.start, config.end));

            let entries = client.search(&search).await?;
            let found = entries
                .iter()
                .map(|entry| parse_entry(entry, &category_query.authors))
                .collect::<Result<Vec<_>>>()?;

            info!(category, author = %person, count = found.len(), "Parsed arXiv results");
            papers.extend(found);
        }
    }

    info!(total = papers.len(), "arXiv queries complete");
    Ok(papers.into_sorted_vec())
}

/// Run every query and save the papers as CSV in `output_dir`.
///
/// Nothing is written unless all queries succeed. Returns the path of the
/// CSV file and the number of papers in it.
pub async fn export_papers<C>(
    client: &C,
    config: &Configuration,
    output_dir: &Path,
) -> Result<(PathBuf, usize)>
where
    C: SearchClient + ?Sized,
{
    let papers = arxiv_papers(client, config).await?;

    std::fs::create_dir_all(output_dir)?;
    let out = export::output_path(output_dir, config.start, config.end);
    export::save_csv(&out, &papers)?;
    Ok((out, papers.len()))
}
