//! The immutable rule tables and the term → regex compiler.
//!
//! Three tables drive the whole engine:
//! - [`TERM_DICTIONARY`] — category → subgroup → phrases scanned for in
//!   policy text.
//! - [`TRACKER_PATTERNS`] — cookie-name fragments per tracking category,
//!   tried in declaration order (first match wins).
//! - [`DISCLOSURE_PHRASES`] — phrases whose presence counts as the policy
//!   disclosing that tracking category.
//!
//! All three are `const` data; the compiled regex forms live in
//! process-wide [`Lazy`] caches and are built once on first use.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{Category, CookieCategory};

/// A named run of related terms within one category.
pub struct TermSubgroup {
    pub name: &'static str,
    pub terms: &'static [&'static str],
}

/// One category's slice of the term dictionary.
pub struct TermCategory {
    pub category: Category,
    pub subgroups: &'static [TermSubgroup],
}

pub const TERM_DICTIONARY: &[TermCategory] = &[
    TermCategory {
        category: Category::DataCollection,
        subgroups: &[
            TermSubgroup {
                name: "Explicit Data",
                terms: &[
                    "collect",
                    "gather",
                    "provided by you",
                    "registration",
                    "account creation",
                ],
            },
            TermSubgroup {
                name: "Automated Tracking",
                terms: &[
                    "automatically collect",
                    "tracking technologies",
                    "cookies",
                    "web beacons",
                    "pixel tags",
                    "Local Shared Objects",
                ],
            },
            TermSubgroup {
                name: "High-Risk Identifiers",
                terms: &[
                    "IP address",
                    "device identifier",
                    "geolocation",
                    "biometric data",
                    "browsing history",
                    "SSN",
                    "government-issued ID",
                ],
            },
        ],
    },
    TermCategory {
        category: Category::DataSharing,
        subgroups: &[
            TermSubgroup {
                name: "The Entities",
                terms: &[
                    "third party",
                    "affiliates",
                    "service providers",
                    "subsidiaries",
                    "business partners",
                    "advertising networks",
                    "data broker",
                ],
            },
            TermSubgroup {
                name: "The Actions",
                terms: &[
                    "share",
                    "don't Currently sell",
                    "sell",
                    "disclose",
                    "transfer",
                ],
            },
            TermSubgroup {
                name: "The Exceptions (Loopholes for sharing)",
                terms: &[
                    "business transfers",
                    "legal requirements",
                    "law enforcement",
                    "subpoena",
                    "merger",
                    "bankruptcy",
                ],
            },
        ],
    },
    TermCategory {
        category: Category::UserRights,
        subgroups: &[
            TermSubgroup {
                name: "Access & Deletion",
                terms: &[
                    "right to access",
                    "right to be forgotten",
                    "request deletion",
                    "rectify",
                    "update your information",
                ],
            },
            TermSubgroup {
                name: "Consent Mechanisms",
                terms: &[
                    "opt-out",
                    "withdraw consent",
                    "unsubscribe",
                    "Do Not Sell or Share My Personal Information",
                    "privacy choices",
                ],
            },
        ],
    },
    TermCategory {
        category: Category::SecurityRetention,
        subgroups: &[
            TermSubgroup {
                name: "Security Standards",
                terms: &[
                    "encryption",
                    "Secure Socket Layer (SSL)",
                    "anonymize",
                    "pseudonymization",
                    "safeguards",
                ],
            },
            TermSubgroup {
                name: "Timelines",
                terms: &[
                    "retain",
                    "retention period",
                    "as long as necessary",
                    "delete after",
                ],
            },
        ],
    },
    TermCategory {
        category: Category::WeaselWords,
        subgroups: &[
            TermSubgroup {
                name: "Vague Qualifiers",
                terms: &["may include", "might collect", "possibly", "could"],
            },
            TermSubgroup {
                name: "Open-Ended Lists",
                terms: &["such as", "including, but not limited to"],
            },
            TermSubgroup {
                name: "Conditional Promises",
                terms: &[
                    "commercially reasonable",
                    "generally",
                    "as applicable",
                    "as needed",
                ],
            },
        ],
    },
];

/// Cookie-name regex fragments per tracking category. Declaration order
/// is the classification order.
pub struct TrackerPatterns {
    pub category: CookieCategory,
    pub patterns: &'static [&'static str],
}

pub const TRACKER_PATTERNS: &[TrackerPatterns] = &[
    TrackerPatterns {
        category: CookieCategory::Analytics,
        patterns: &["_ga", "_gid", "_gat", "analytics", "mixpanel", "amplitude", "segment"],
    },
    TrackerPatterns {
        category: CookieCategory::Advertising,
        patterns: &["_fbp", "doubleclick", "ad[sx]?", "ttclid", "gcl_au", "criteo"],
    },
    TrackerPatterns {
        category: CookieCategory::Session,
        patterns: &["session", "sess", "csrf", "auth", "token"],
    },
    TrackerPatterns {
        category: CookieCategory::Functional,
        patterns: &["pref", "lang", "theme", "remember"],
    },
];

/// Phrases whose presence in (lower-cased) policy text counts as a
/// disclosure of the matching tracking category.
pub struct DisclosurePhrases {
    pub category: CookieCategory,
    pub phrases: &'static [&'static str],
}

pub const DISCLOSURE_PHRASES: &[DisclosurePhrases] = &[
    DisclosurePhrases {
        category: CookieCategory::Analytics,
        phrases: &[
            "analytics",
            "measurement",
            "google analytics",
            "mixpanel",
            "amplitude",
            "segment",
        ],
    },
    DisclosurePhrases {
        category: CookieCategory::Advertising,
        phrases: &[
            "advertising",
            "ad network",
            "targeted ads",
            "remarketing",
            "doubleclick",
            "facebook pixel",
        ],
    },
    DisclosurePhrases {
        category: CookieCategory::Session,
        phrases: &[
            "strictly necessary",
            "essential cookies",
            "authentication",
            "session cookies",
        ],
    },
    DisclosurePhrases {
        category: CookieCategory::Functional,
        phrases: &[
            "preferences",
            "functional cookies",
            "site settings",
            "language settings",
        ],
    },
];

/// Build the regex source for one dictionary term.
///
/// Metacharacters are escaped, then spaces relax to `\s+` (terms match
/// across line wraps) and commas to `\s*,\s*`. Terms made up purely of
/// letters and hyphens get `\b` anchors so "sell" cannot match inside
/// "reseller"; terms with digits or punctuation stay open-ended
/// substrings.
pub fn pattern_for_term(term: &str) -> String {
    let mut pattern = regex::escape(term);
    pattern = pattern.replace(' ', r"\s+");
    pattern = pattern.replace(',', r"\s*,\s*");
    let plain_word = !term.is_empty()
        && term.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
    if plain_word {
        pattern = format!(r"\b{}\b", pattern);
    }
    pattern
}

/// Compiled, case-insensitive pattern for every dictionary term.
static TERM_REGEXES: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    TERM_DICTIONARY
        .iter()
        .flat_map(|category| category.subgroups)
        .flat_map(|subgroup| subgroup.terms)
        .map(|&term| {
            let pattern = format!("(?i){}", pattern_for_term(term));
            let regex = Regex::new(&pattern).expect("dictionary term patterns are valid");
            (term, regex)
        })
        .collect()
});

/// Cached regex for a dictionary term.
///
/// Panics on terms outside [`TERM_DICTIONARY`]; callers iterate the
/// dictionary itself.
pub fn term_regex(term: &'static str) -> &'static Regex {
    &TERM_REGEXES[term]
}

static TRACKER_REGEXES: Lazy<Vec<(CookieCategory, Vec<Regex>)>> = Lazy::new(|| {
    TRACKER_PATTERNS
        .iter()
        .map(|entry| {
            let regexes = entry
                .patterns
                .iter()
                .map(|pattern| Regex::new(pattern).expect("tracker patterns are valid"))
                .collect();
            (entry.category, regexes)
        })
        .collect()
});

/// Compiled tracker patterns in classification order.
pub fn tracker_regexes() -> &'static [(CookieCategory, Vec<Regex>)] {
    &TRACKER_REGEXES
}

/// Disclosure phrases for one tracking category.
pub fn disclosure_phrases(category: CookieCategory) -> &'static [&'static str] {
    DISCLOSURE_PHRASES
        .iter()
        .find(|entry| entry.category == category)
        .map(|entry| entry.phrases)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_plain_word_gets_boundaries() {
        assert_eq!(pattern_for_term("sell"), r"\bsell\b");
        assert_eq!(pattern_for_term("opt-out"), r"\bopt\-out\b");
    }

    #[test]
    fn test_pattern_spaces_relax_to_whitespace() {
        assert_eq!(pattern_for_term("third party"), r"third\s+party");
    }

    #[test]
    fn test_pattern_commas_allow_surrounding_whitespace() {
        // The comma in the source term is followed by a space, so the
        // compiled form carries both relaxations back to back.
        assert_eq!(
            pattern_for_term("including, but not limited to"),
            r"including\s*,\s*\s+but\s+not\s+limited\s+to"
        );
    }

    #[test]
    fn test_pattern_punctuation_stays_substring() {
        let pattern = pattern_for_term("Secure Socket Layer (SSL)");
        assert!(!pattern.starts_with(r"\b"));
        assert!(pattern.contains(r"\("));
    }

    #[test]
    fn test_every_term_compiles() {
        for category in TERM_DICTIONARY {
            for subgroup in category.subgroups {
                for &term in subgroup.terms {
                    assert!(term_regex(term).is_match(term), "term should match itself: {}", term);
                }
            }
        }
    }

    #[test]
    fn test_tracker_regexes_cover_all_categories() {
        let categories: Vec<CookieCategory> =
            tracker_regexes().iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![
                CookieCategory::Analytics,
                CookieCategory::Advertising,
                CookieCategory::Session,
                CookieCategory::Functional,
            ]
        );
    }

    #[test]
    fn test_disclosure_phrases_unknown_is_empty() {
        assert!(disclosure_phrases(CookieCategory::Unknown).is_empty());
    }
}
