//! Cookie disclosure auditing.
//!
//! - [`parser`] — normalizes a pasted cookie listing into distinct names.
//! - [`classifier`] — maps a cookie name to a tracking category.
//! - [`audit`] — checks disclosure language and consent timing, then
//!   grades how truthful the policy's claims are.

pub mod audit;
pub mod classifier;
pub mod parser;
