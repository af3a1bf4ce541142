use serde::{Serialize, Serializer};

/// Three-step risk scale shared by both analysis pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Ordering rank, lowest risk first.
    pub fn rank(self) -> u8 {
        match self {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Display priority of an issue or flaw. Rank 0 sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "high"),
            Severity::Medium => write!(f, "medium"),
            Severity::Low => write!(f, "low"),
        }
    }
}

/// Letter grade. `A` is best; there is no `E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Ordering rank, best grade first.
    pub fn rank(self) -> u8 {
        match self {
            Grade::A => 0,
            Grade::B => 1,
            Grade::C => 2,
            Grade::D => 3,
            Grade::F => 4,
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grade::A => write!(f, "A"),
            Grade::B => write!(f, "B"),
            Grade::C => write!(f, "C"),
            Grade::D => write!(f, "D"),
            Grade::F => write!(f, "F"),
        }
    }
}

/// Top-level grouping of related policy-language concerns.
///
/// The declaration order is the canonical dictionary order; ranking
/// tie-breaks and the report layout both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "Data Collection")]
    DataCollection,
    #[serde(rename = "Data Sharing")]
    DataSharing,
    #[serde(rename = "User Rights & Controls")]
    UserRights,
    #[serde(rename = "Security & Retention")]
    SecurityRetention,
    #[serde(rename = "Weasel Words")]
    WeaselWords,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::DataCollection => write!(f, "Data Collection"),
            Category::DataSharing => write!(f, "Data Sharing"),
            Category::UserRights => write!(f, "User Rights & Controls"),
            Category::SecurityRetention => write!(f, "Security & Retention"),
            Category::WeaselWords => write!(f, "Weasel Words"),
        }
    }
}

/// Tracking purpose a cookie name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieCategory {
    Analytics,
    Advertising,
    Session,
    Functional,
    Unknown,
}

impl std::fmt::Display for CookieCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CookieCategory::Analytics => write!(f, "analytics"),
            CookieCategory::Advertising => write!(f, "advertising"),
            CookieCategory::Session => write!(f, "session"),
            CookieCategory::Functional => write!(f, "functional"),
            CookieCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Point in the consent lifecycle at which the cookies were observed.
///
/// Callers may supply strings outside the known set; those flow through
/// untouched and never trigger the consent penalty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentState {
    BeforeConsent,
    AfterReject,
    AfterAccept,
    Other(String),
}

impl ConsentState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "before_consent" => ConsentState::BeforeConsent,
            "after_reject" => ConsentState::AfterReject,
            "after_accept" => ConsentState::AfterAccept,
            other => ConsentState::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ConsentState::BeforeConsent => "before_consent",
            ConsentState::AfterReject => "after_reject",
            ConsentState::AfterAccept => "after_accept",
            ConsentState::Other(raw) => raw,
        }
    }

    /// True at the lifecycle points where non-essential cookies should
    /// still be blocked.
    pub fn blocks_non_essential(&self) -> bool {
        matches!(self, ConsentState::BeforeConsent | ConsentState::AfterReject)
    }
}

impl std::fmt::Display for ConsentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ConsentState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One dictionary term's occurrence count within one subgroup scan.
#[derive(Debug, Clone, Serialize)]
pub struct TermMatch {
    pub term: &'static str,
    pub count: usize,
}

/// Matched terms of one subgroup, sorted count-descending then
/// term-ascending (case-insensitive). Zero-count terms are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct SubgroupHits {
    pub subgroup: &'static str,
    pub hits: Vec<TermMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryHits {
    pub category: Category,
    pub total_hits: usize,
    pub subgroups: Vec<SubgroupHits>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicySummary {
    pub total_hits: usize,
    pub weasel_word_hits: usize,
    pub weasel_density_percent: f64,
    pub text_word_count: usize,
}

/// One entry of the flat category ranking.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRank {
    pub category: Category,
    pub total_hits: usize,
}

/// Aggregate output of the policy text analyzer.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyReport {
    pub summary: PolicySummary,
    /// Per-category hit detail in dictionary order.
    pub categories: Vec<CategoryHits>,
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    /// Categories ranked by total hits descending, dictionary order on ties.
    pub categories_sorted: Vec<CategoryRank>,
}

/// One matched term flattened out of a [`PolicyReport`] with its
/// display severity attached.
#[derive(Debug, Clone, Serialize)]
pub struct Flaw {
    pub category: Category,
    pub subgroup: &'static str,
    pub term: &'static str,
    pub count: usize,
    pub severity: Severity,
}

/// A policy-level problem found by the cookie audit.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub title: &'static str,
    pub detail: &'static str,
}

/// One observed cookie mapped to a tracking category.
#[derive(Debug, Clone, Serialize)]
pub struct CookieClassification {
    pub name: String,
    pub category: CookieCategory,
}

/// Tally of classified cookies per category.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CategoryCounts {
    pub analytics: usize,
    pub advertising: usize,
    pub session: usize,
    pub functional: usize,
    pub unknown: usize,
}

impl CategoryCounts {
    pub fn bump(&mut self, category: CookieCategory) {
        match category {
            CookieCategory::Analytics => self.analytics += 1,
            CookieCategory::Advertising => self.advertising += 1,
            CookieCategory::Session => self.session += 1,
            CookieCategory::Functional => self.functional += 1,
            CookieCategory::Unknown => self.unknown += 1,
        }
    }

    /// Analytics plus advertising: the cookies a consent banner must gate.
    pub fn non_essential(&self) -> usize {
        self.analytics + self.advertising
    }
}

/// Aggregate output of the cookie truthfulness grader.
#[derive(Debug, Clone, Serialize)]
pub struct CookieAuditReport {
    pub score: u32,
    pub grade: Grade,
    pub risk_level: RiskLevel,
    /// Sorted by severity rank; insertion order preserved within a rank.
    pub issues: Vec<Issue>,
    pub cookies: Vec<CookieClassification>,
    pub category_counts: CategoryCounts,
    pub consent_state: ConsentState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_state_round_trip() {
        assert_eq!(ConsentState::parse("before_consent"), ConsentState::BeforeConsent);
        assert_eq!(ConsentState::parse("after_accept").as_str(), "after_accept");
        assert_eq!(
            ConsentState::parse("mystery_state"),
            ConsentState::Other("mystery_state".to_string())
        );
    }

    #[test]
    fn test_consent_state_penalty_window() {
        assert!(ConsentState::BeforeConsent.blocks_non_essential());
        assert!(ConsentState::AfterReject.blocks_non_essential());
        assert!(!ConsentState::AfterAccept.blocks_non_essential());
        assert!(!ConsentState::Other("whatever".to_string()).blocks_non_essential());
    }

    #[test]
    fn test_severity_ranks() {
        assert!(Severity::High.rank() < Severity::Medium.rank());
        assert!(Severity::Medium.rank() < Severity::Low.rank());
    }

    #[test]
    fn test_category_counts_bump() {
        let mut counts = CategoryCounts::default();
        counts.bump(CookieCategory::Analytics);
        counts.bump(CookieCategory::Advertising);
        counts.bump(CookieCategory::Advertising);
        counts.bump(CookieCategory::Unknown);
        assert_eq!(counts.non_essential(), 3);
        assert_eq!(counts.unknown, 1);
    }
}
