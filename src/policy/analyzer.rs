use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    Category, CategoryHits, CategoryRank, PolicyReport, PolicySummary, RiskLevel, SubgroupHits,
    TermMatch,
};
use crate::rules::{self, TERM_DICTIONARY};

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

/// Scan policy text against the term dictionary and derive the weighted
/// risk score.
///
/// Matching is case-insensitive and whitespace-tolerant (see
/// [`rules::pattern_for_term`]). Within a subgroup, matched terms sort
/// by count descending then term ascending; zero-count terms are
/// dropped. The word count floors at 1 so the weasel density is always
/// defined.
pub fn analyze_policy_text(text: &str) -> PolicyReport {
    let mut total_hits = 0;
    let mut weasel_hits = 0;
    let mut categories = Vec::with_capacity(TERM_DICTIONARY.len());

    for entry in TERM_DICTIONARY {
        let mut cat_total = 0;
        let mut subgroups = Vec::with_capacity(entry.subgroups.len());

        for subgroup in entry.subgroups {
            let mut hits: Vec<TermMatch> = subgroup
                .terms
                .iter()
                .map(|&term| TermMatch {
                    term,
                    count: rules::term_regex(term).find_iter(text).count(),
                })
                .filter(|hit| hit.count > 0)
                .collect();

            for hit in &hits {
                cat_total += hit.count;
                total_hits += hit.count;
                if entry.category == Category::WeaselWords {
                    weasel_hits += hit.count;
                }
            }

            hits.sort_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.term.to_lowercase().cmp(&b.term.to_lowercase()))
            });
            subgroups.push(SubgroupHits {
                subgroup: subgroup.name,
                hits,
            });
        }

        categories.push(CategoryHits {
            category: entry.category,
            total_hits: cat_total,
            subgroups,
        });
    }

    let text_word_count = WORD_RE.find_iter(text).count().max(1);
    let weasel_density = weasel_hits as f64 / text_word_count as f64 * 100.0;

    let risk_score = risk_score(&categories, weasel_density);
    let risk_level = risk_level_for(risk_score);

    // Stable sort: ties keep dictionary order.
    let mut categories_sorted: Vec<CategoryRank> = categories
        .iter()
        .map(|c| CategoryRank {
            category: c.category,
            total_hits: c.total_hits,
        })
        .collect();
    categories_sorted.sort_by(|a, b| b.total_hits.cmp(&a.total_hits));

    PolicyReport {
        summary: PolicySummary {
            total_hits,
            weasel_word_hits: weasel_hits,
            weasel_density_percent: (weasel_density * 1000.0).round() / 1000.0,
            text_word_count,
        },
        categories,
        risk_score,
        risk_level,
        categories_sorted,
    }
}

/// Weighted sum of capped contributions. The four caps add up to 100,
/// so the score cannot exceed it.
fn risk_score(categories: &[CategoryHits], weasel_density: f64) -> u32 {
    let total = |wanted: Category| -> u32 {
        categories
            .iter()
            .find(|c| c.category == wanted)
            .map_or(0, |c| c.total_hits as u32)
    };

    let mut score = 0;
    score += (total(Category::DataSharing) * 2).min(30);
    score += total(Category::DataCollection).min(25);
    score += total(Category::SecurityRetention).min(20);
    score += ((weasel_density * 20.0) as u32).min(25);
    score
}

fn risk_level_for(score: u32) -> RiskLevel {
    if score >= 70 {
        RiskLevel::High
    } else if score >= 40 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
