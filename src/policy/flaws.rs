use crate::models::{Category, Flaw, Grade, PolicyReport, Severity};

/// Flatten every matched term into a flaw record and order for display.
///
/// Sorted by severity rank, then count descending, then term ascending
/// (case-insensitive). High and medium entries are the ones renderers
/// should treat as dangerous.
pub fn extract_flaws(report: &PolicyReport) -> Vec<Flaw> {
    let mut flaws = Vec::new();

    for category in &report.categories {
        for subgroup in &category.subgroups {
            for hit in &subgroup.hits {
                flaws.push(Flaw {
                    category: category.category,
                    subgroup: subgroup.subgroup,
                    term: hit.term,
                    count: hit.count,
                    severity: severity_for(category.category, subgroup.subgroup),
                });
            }
        }
    }

    flaws.sort_by(|a, b| {
        a.severity
            .rank()
            .cmp(&b.severity.rank())
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.term.to_lowercase().cmp(&b.term.to_lowercase()))
    });
    flaws
}

/// Severity precedence, checked in order: weasel words and sharing
/// language always rank high, high-risk identifiers rank high,
/// retention timelines rank low, everything else defaults to medium.
fn severity_for(category: Category, subgroup: &str) -> Severity {
    match (category, subgroup) {
        (Category::WeaselWords, _) => Severity::High,
        (Category::DataSharing, _) => Severity::High,
        (Category::DataCollection, "High-Risk Identifiers") => Severity::High,
        (Category::SecurityRetention, "Timelines") => Severity::Low,
        _ => Severity::Medium,
    }
}

/// Letter grade for a policy risk score. Higher risk, worse grade.
pub fn privacy_grade(risk_score: u32) -> Grade {
    if risk_score >= 70 {
        Grade::F
    } else if risk_score >= 55 {
        Grade::D
    } else if risk_score >= 40 {
        Grade::C
    } else if risk_score >= 25 {
        Grade::B
    } else {
        Grade::A
    }
}
