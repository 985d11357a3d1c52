//! Configuration file support.
//!
//! The file lists, per arXiv category, the people to query:
//!
//! ```toml
//! [arxiv.astro-ph]
//! authors = ["Smith, Jane", "Doe, John"]
//!
//! [arxiv."cs.LG"]
//! authors = ["van Beethoven, Ludwig"]
//! ```
//!
//! Author names are written as `Family Name, Given Name`. Categories are
//! queried in the order they appear in the file.

use crate::error::{PapersError, Result};
use crate::models::{CategoryQuery, Person};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Configuration file structure
#[derive(Debug, Deserialize)]
struct ConfigFile {
    /// Category code -> category section, in document order
    arxiv: toml::Table,
}

/// One `[arxiv.<category>]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategorySection {
    authors: Vec<String>,
}

/// Load the category queries from a configuration file.
pub fn load_category_queries(path: &Path) -> Result<Vec<CategoryQuery>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        PapersError::Config(format!("Cannot read config file {}: {}", path.display(), e))
    })?;
    let queries = parse_category_queries(&content)
        .map_err(|e| match e {
            PapersError::Config(msg) => PapersError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
    debug!(path = %path.display(), categories = queries.len(), "Loaded configuration");
    Ok(queries)
}

/// Parse the category queries from the content of a configuration file.
pub fn parse_category_queries(content: &str) -> Result<Vec<CategoryQuery>> {
    let file: ConfigFile =
        toml::from_str(content).map_err(|e| PapersError::Config(e.to_string()))?;

    file.arxiv
        .into_iter()
        .map(|(category, section)| {
            if category.trim().is_empty() {
                return Err(PapersError::Config("Category must not be empty".to_string()));
            }
            let section: CategorySection = section.try_into().map_err(|e: toml::de::Error| {
                PapersError::Config(format!("Invalid section for category {}: {}", category, e.message()))
            })?;
            let authors = section
                .authors
                .iter()
                .map(|author| {
                    parse_author(author).map_err(|e| match e {
                        PapersError::Config(msg) => {
                            PapersError::Config(format!("Category {}: {}", category, msg))
                        }
                        other => other,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(CategoryQuery { category, authors })
        })
        .collect()
}

/// Parse an author name of the form `Family Name, Given Name`.
pub fn parse_author(author: &str) -> Result<Person> {
    let parts: Vec<&str> = author.split(',').collect();
    if parts.len() != 2 {
        return Err(PapersError::Config(format!(
            "Invalid author \"{}\": the author name must be of the form \"Family Name, Given Name\". \
             Neither the given name nor the family name may contain a comma.",
            author
        )));
    }

    let family_name = parts[0].trim();
    if family_name.is_empty() {
        return Err(PapersError::Config(format!(
            "Invalid author \"{}\": the family name must not be empty.",
            author
        )));
    }

    Ok(Person::new(parts[1].trim(), family_name))
}
