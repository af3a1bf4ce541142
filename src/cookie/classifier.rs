use crate::models::CookieCategory;
use crate::rules;

/// Classify a cookie name into a tracking category.
///
/// The name is lower-cased and tested against each category's patterns
/// in the fixed order analytics → advertising → session → functional;
/// the first category with any match wins, so a name matching two
/// categories always resolves to the earlier one. Unmatched names are
/// [`CookieCategory::Unknown`].
pub fn classify_cookie(name: &str) -> CookieCategory {
    let lower = name.to_lowercase();
    for (category, regexes) in rules::tracker_regexes() {
        if regexes.iter().any(|re| re.is_match(&lower)) {
            return *category;
        }
    }
    CookieCategory::Unknown
}
