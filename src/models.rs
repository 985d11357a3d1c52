//! Domain types: the people we track, what to query for them, and the papers found.

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// A person whose papers should be found.
///
/// arXiv author queries only use the family name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    pub given_name: String,
    pub family_name: String,
}

impl Person {
    pub fn new(given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        Self {
            given_name: given_name.into(),
            family_name: family_name.into(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.given_name, self.family_name)
    }
}

/// A subject category (such as `astro-ph` or `q-bio`) and the people to query in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryQuery {
    pub category: String,
    pub authors: Vec<Person>,
}

/// What to query and for which submission window.
///
/// `start` is inclusive and `end` exclusive: papers submitted in April 2025 are
/// covered by a start of 1 April 2025 and an end of 1 May 2025.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub category_queries: Vec<CategoryQuery>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Configuration {
    pub fn new(category_queries: Vec<CategoryQuery>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            category_queries,
            start,
            end,
        }
    }
}

/// A paper on arXiv.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Paper {
    /// Entry id without URL prefix, such as `2503.02829v1`
    pub id: String,
    /// First submission, truncated to the minute
    pub submitted: DateTime<Utc>,
    /// Last update, truncated to the minute
    pub updated: DateTime<Utc>,
    /// Author names in the order arXiv lists them
    pub authors: Vec<String>,
    /// The subset of `authors` matching a queried person
    pub authors_of_interest: Vec<String>,
    pub title: String,
    pub abstract_text: String,
    /// The arXiv page for the paper
    pub url: String,
}

impl Paper {
    /// Add the authors of interest found by another query for the same paper.
    ///
    /// The result keeps the order of `authors` and lists each name once.
    pub fn merge_authors_of_interest(&mut self, other: &[String]) {
        if other.iter().all(|name| self.authors_of_interest.contains(name)) {
            return;
        }
        let merged = self
            .authors
            .iter()
            .filter(|name| self.authors_of_interest.contains(name) || other.contains(name))
            .fold(Vec::new(), |mut acc: Vec<String>, name| {
                if !acc.contains(name) {
                    acc.push(name.clone());
                }
                acc
            });
        self.authors_of_interest = merged;
    }
}
