//! arXiv search query construction.
//!
//! A query combines a category prefix match, an author match on the family
//! name and a submission date filter:
//!
//! ```text
//! cat:astro-ph.* AND au:smith AND submittedDate:[202501280000 TO 202503200000]
//! ```

use crate::models::Person;
use chrono::NaiveDate;

/// Author term for a person: lowercase family name, spaces replaced by underscores.
pub fn author_term(person: &Person) -> String {
    person.family_name.to_lowercase().replace(' ', "_")
}

/// Submission date filter covering midnight of `start` up to midnight of `end`.
pub fn date_filter(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "submittedDate:[{} TO {}]",
        start.format("%Y%m%d0000"),
        end.format("%Y%m%d0000")
    )
}

/// Build the search query for one person in one category.
pub fn build_query(category: &str, person: &Person, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "cat:{}.* AND au:{} AND {}",
        category,
        author_term(person),
        date_filter(start, end)
    )
}
