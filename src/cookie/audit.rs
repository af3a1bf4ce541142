use crate::models::{
    CategoryCounts, ConsentState, CookieAuditReport, CookieCategory, CookieClassification, Grade,
    Issue, RiskLevel, Severity,
};
use crate::rules;

use super::{classifier, parser};

/// Which tracking purposes the policy text admits to, one independent
/// flag per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisclosureMap {
    pub analytics: bool,
    pub advertising: bool,
    pub session: bool,
    pub functional: bool,
}

/// Check the policy text for disclosure language.
///
/// The text is lower-cased once; a category counts as disclosed when
/// any of its phrases appears as a literal substring. Flags are
/// independent — several categories can be disclosed (or missing) at
/// the same time.
pub fn policy_disclosures(policy_text: &str) -> DisclosureMap {
    let lower = policy_text.to_lowercase();
    let mentions = |category: CookieCategory| {
        rules::disclosure_phrases(category)
            .iter()
            .any(|phrase| lower.contains(phrase))
    };

    DisclosureMap {
        analytics: mentions(CookieCategory::Analytics),
        advertising: mentions(CookieCategory::Advertising),
        session: mentions(CookieCategory::Session),
        functional: mentions(CookieCategory::Functional),
    }
}

/// Grade how truthfully the policy describes the observed cookies.
///
/// Starts at 100 and deducts per finding; deductions are additive, so
/// their order only fixes the issue list's insertion order. Missing or
/// empty inputs degrade to zero counts rather than failing.
pub fn grade_cookie_truthfulness(
    policy_text: &str,
    observed_cookie_text: &str,
    consent_state: ConsentState,
) -> CookieAuditReport {
    let cookies: Vec<CookieClassification> = parser::parse_observed_cookies(observed_cookie_text)
        .into_iter()
        .map(|name| {
            let category = classifier::classify_cookie(&name);
            CookieClassification { name, category }
        })
        .collect();

    let mut category_counts = CategoryCounts::default();
    for cookie in &cookies {
        category_counts.bump(cookie.category);
    }

    let disclosed = policy_disclosures(policy_text);

    let mut issues: Vec<Issue> = Vec::new();
    let mut score: i32 = 100;

    let non_essential = category_counts.non_essential();

    if consent_state.blocks_non_essential() && non_essential > 0 {
        score -= (non_essential as i32 * 12).min(45);
        issues.push(Issue {
            severity: Severity::High,
            title: "Non-essential cookies loaded before consent",
            detail: "Analytics/advertising cookies were observed when they should usually be blocked.",
        });
    }

    if category_counts.analytics > 0 && !disclosed.analytics {
        score -= 20;
        issues.push(Issue {
            severity: Severity::High,
            title: "Undisclosed analytics tracking",
            detail: "Analytics-like cookies were observed but analytics disclosure language is weak or missing.",
        });
    }

    if category_counts.advertising > 0 && !disclosed.advertising {
        score -= 25;
        issues.push(Issue {
            severity: Severity::High,
            title: "Undisclosed advertising tracking",
            detail: "Ad/remarketing-like cookies were observed but advertising disclosure language is weak or missing.",
        });
    }

    if category_counts.unknown > 3 {
        score -= 10;
        issues.push(Issue {
            severity: Severity::Medium,
            title: "Many unknown cookies",
            detail: "Several cookies could not be classified; manually verify vendor and purpose.",
        });
    }

    let lower_policy = policy_text.to_lowercase();
    if !lower_policy.contains("opt-out") && !lower_policy.contains("do not sell") {
        score -= 8;
        issues.push(Issue {
            severity: Severity::Medium,
            title: "Weak opt-out language",
            detail: "Policy text does not clearly mention opt-out or Do Not Sell controls.",
        });
    }

    let score = score.clamp(0, 100) as u32;
    let (grade, risk_level) = grade_for_score(score);

    // Stable: issues within a rank keep the order they were raised in.
    issues.sort_by_key(|issue| issue.severity.rank());

    CookieAuditReport {
        score,
        grade,
        risk_level,
        issues,
        cookies,
        category_counts,
        consent_state,
    }
}

fn grade_for_score(score: u32) -> (Grade, RiskLevel) {
    if score >= 85 {
        (Grade::A, RiskLevel::Low)
    } else if score >= 70 {
        (Grade::B, RiskLevel::Low)
    } else if score >= 55 {
        (Grade::C, RiskLevel::Medium)
    } else if score >= 40 {
        (Grade::D, RiskLevel::High)
    } else {
        (Grade::F, RiskLevel::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISCLOSING_POLICY: &str = "We use Google Analytics for measurement and ad network \
        partners for advertising. You can opt-out at any time.";

    #[test]
    fn test_disclosures_are_independent() {
        let map = policy_disclosures("We use google analytics and session cookies.");
        assert!(map.analytics);
        assert!(!map.advertising);
        assert!(map.session);
        assert!(!map.functional);
    }

    #[test]
    fn test_empty_policy_with_trackers_before_consent() {
        let report = grade_cookie_truthfulness("", "_ga, doubleclick", ConsentState::BeforeConsent);

        // 100 - 24 (2 non-essential before consent) - 20 - 25 - 8 = 23.
        assert_eq!(report.score, 23);
        assert_eq!(report.grade, Grade::F);
        assert_eq!(report.risk_level, RiskLevel::High);
        assert_eq!(report.issues.len(), 4);
        assert_eq!(report.category_counts.analytics, 1);
        assert_eq!(report.category_counts.advertising, 1);
    }

    #[test]
    fn test_consent_deduction_caps_at_45() {
        let report = grade_cookie_truthfulness(
            "",
            "_ga, _gid, doubleclick, criteo",
            ConsentState::BeforeConsent,
        );

        // 100 - 45 (cap) - 20 - 25 - 8 = 2.
        assert_eq!(report.score, 2);
        assert_eq!(report.grade, Grade::F);
    }

    #[test]
    fn test_disclosed_trackers_after_accept_grade_well() {
        let report =
            grade_cookie_truthfulness(DISCLOSING_POLICY, "_ga, doubleclick", ConsentState::AfterAccept);

        assert_eq!(report.score, 100);
        assert_eq!(report.grade, Grade::A);
        assert_eq!(report.risk_level, RiskLevel::Low);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_lone_consent_deduction_reaches_medium_band() {
        // Disclosed trackers loaded before consent: only the 45-point
        // cap applies, landing exactly on the C/Medium band.
        let report = grade_cookie_truthfulness(
            DISCLOSING_POLICY,
            "_ga, _gid, doubleclick, criteo",
            ConsentState::BeforeConsent,
        );

        assert_eq!(report.score, 55);
        assert_eq!(report.grade, Grade::C);
        assert_eq!(report.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_many_unknown_cookies_flagged() {
        let report = grade_cookie_truthfulness(
            DISCLOSING_POLICY,
            "aaa1, bbb2, ccc3, ddd4",
            ConsentState::AfterAccept,
        );

        assert_eq!(report.category_counts.unknown, 4);
        assert_eq!(report.score, 90);
        assert!(report
            .issues
            .iter()
            .any(|i| i.title == "Many unknown cookies"));
    }

    #[test]
    fn test_do_not_sell_counts_as_opt_out_language() {
        let report = grade_cookie_truthfulness(
            "See our Do Not Sell page.",
            "",
            ConsentState::AfterAccept,
        );
        assert_eq!(report.score, 100);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_issues_sorted_high_before_medium() {
        let report = grade_cookie_truthfulness(
            "",
            "_ga, a1, b2, c3, d4",
            ConsentState::BeforeConsent,
        );

        let ranks: Vec<u8> = report.issues.iter().map(|i| i.severity.rank()).collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
        assert_eq!(report.issues[0].severity, Severity::High);
    }

    #[test]
    fn test_empty_inputs_degrade_gracefully() {
        let report = grade_cookie_truthfulness("", "", ConsentState::BeforeConsent);

        // Only the weak opt-out deduction applies with no cookies at all.
        assert_eq!(report.score, 92);
        assert_eq!(report.grade, Grade::A);
        assert!(report.cookies.is_empty());
        assert_eq!(report.consent_state, ConsentState::BeforeConsent);
    }
}
