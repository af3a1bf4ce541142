//! Privacy-policy text analysis.
//!
//! - [`analyzer`] — counts dictionary-term occurrences per category and
//!   subgroup and derives the weighted risk score and level.
//! - [`flaws`] — flattens a report's hits into severity-ranked flaw
//!   records and maps the risk score to a letter grade.

pub mod analyzer;
pub mod flaws;
