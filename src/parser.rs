//! Conversion of raw arXiv entries into [`Paper`]s.

use crate::arxiv::Entry;
use crate::error::{OptionExt, Result};
use crate::models::{Paper, Person};
use chrono::{DateTime, Timelike, Utc};

/// Convert a feed entry into a paper.
///
/// `queried` is the full list of people queried for the category the entry
/// was found in; it decides which authors are authors of interest.
pub fn parse_entry(entry: &Entry, queried: &[Person]) -> Result<Paper> {
    let id = entry
        .id
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_parse("Entry id has no identifier segment")?
        .to_string();

    let authors: Vec<String> = entry.authors.iter().map(|a| a.name.clone()).collect();
    let authors_of_interest = authors_of_interest(&authors, queried);

    Ok(Paper {
        id,
        submitted: truncate_to_minute(entry.published)?,
        updated: truncate_to_minute(entry.updated)?,
        authors,
        authors_of_interest,
        title: entry.title.clone(),
        abstract_text: entry.summary.clone(),
        url: entry.id.clone(),
    })
}

/// Authors whose name contains the family name of any queried person.
///
/// Matching is case-insensitive. Each author is listed at most once, in the
/// order of `authors`.
pub fn authors_of_interest(authors: &[String], queried: &[Person]) -> Vec<String> {
    let family_names: Vec<String> = queried
        .iter()
        .map(|p| p.family_name.to_lowercase())
        .collect();

    authors
        .iter()
        .filter(|author| {
            let author = author.to_lowercase();
            family_names.iter().any(|family| author.contains(family.as_str()))
        })
        .cloned()
        .collect()
}

fn truncate_to_minute(at: DateTime<Utc>) -> Result<DateTime<Utc>> {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .ok_or_parse("Timestamp cannot be truncated to the minute")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arxiv::EntryAuthor;
    use chrono::TimeZone;

    fn entry(authors: &[&str]) -> Entry {
        Entry {
            id: "http://arxiv.org/abs/2502.01234v1".into(),
            updated: Utc.with_ymd_and_hms(2025, 2, 5, 9, 12, 45).unwrap(),
            published: Utc.with_ymd_and_hms(2025, 2, 3, 18, 59, 59).unwrap(),
            title: "Dark matter in dwarf galaxies".into(),
            summary: "We study dwarfs.".into(),
            authors: authors
                .iter()
                .map(|name| EntryAuthor { name: name.to_string() })
                .collect(),
        }
    }

    #[test]
    fn test_parse_entry() {
        let queried = vec![Person::new("Jane", "Smith")];
        let paper = parse_entry(&entry(&["Jane Smith", "John Doe"]), &queried).unwrap();

        assert_eq!(paper.id, "2502.01234v1");
        assert_eq!(paper.submitted, Utc.with_ymd_and_hms(2025, 2, 3, 18, 59, 0).unwrap());
        assert_eq!(paper.updated, Utc.with_ymd_and_hms(2025, 2, 5, 9, 12, 0).unwrap());
        assert_eq!(paper.authors, vec!["Jane Smith", "John Doe"]);
        assert_eq!(paper.authors_of_interest, vec!["Jane Smith"]);
        assert_eq!(paper.title, "Dark matter in dwarf galaxies");
        assert_eq!(paper.abstract_text, "We study dwarfs.");
        assert_eq!(paper.url, "http://arxiv.org/abs/2502.01234v1");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let queried = vec![Person::new("Jane", "Smith"), Person::new("John", "Doe")];
        let raw = entry(&["Jane Smith", "John Doe"]);
        assert_eq!(parse_entry(&raw, &queried).unwrap(), parse_entry(&raw, &queried).unwrap());
    }

    #[test]
    fn test_id_without_url_prefix() {
        let mut raw = entry(&[]);
        raw.id = "2502.01234v1".into();
        assert_eq!(parse_entry(&raw, &[]).unwrap().id, "2502.01234v1");
    }

    #[test]
    fn test_empty_id_is_parse_error() {
        let mut raw = entry(&[]);
        raw.id = "http://arxiv.org/abs/".into();
        assert!(parse_entry(&raw, &[]).is_err());
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let authors = vec!["Jane A. SMITH-Jones".to_string()];
        assert_eq!(
            authors_of_interest(&authors, &[Person::new("Jane", "Smith")]),
            vec!["Jane A. SMITH-Jones"]
        );
    }

    #[test]
    fn test_longer_family_name_does_not_match() {
        let authors = vec!["J. Smith".to_string()];
        assert!(authors_of_interest(&authors, &[Person::new("Paul", "Smithson")]).is_empty());
    }

    #[test]
    fn test_author_matching_several_people_listed_once() {
        let authors = vec![
            "Ann Doe-Smith".to_string(),
            "Bo Lee".to_string(),
            "John Doe".to_string(),
        ];
        let queried = vec![Person::new("Jane", "Smith"), Person::new("John", "Doe")];
        assert_eq!(
            authors_of_interest(&authors, &queried),
            vec!["Ann Doe-Smith", "John Doe"]
        );
    }
}
