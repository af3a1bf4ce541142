use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{CookieAuditReport, CookieCategory, Flaw, Grade, PolicyReport, RiskLevel, Severity};

/// Render a colored terminal report for a policy analysis.
pub fn render_policy(
    report: &PolicyReport,
    flaws: &[Flaw],
    grade: Grade,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    if quiet {
        println!(
            "Risk: {} ({})  Grade: {}  Hits: {}  Weasel density: {}%",
            report.risk_score,
            colorize_risk(report.risk_level),
            colorize_grade(grade),
            report.summary.total_hits,
            report.summary.weasel_density_percent,
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "privacy-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Policy analysis\n");

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Risk score         : {} / 100", report.risk_score)
    );
    println!(
        " │  {:<57} │",
        format!("Risk level         : {}", colorize_risk(report.risk_level))
    );
    println!(
        " │  {:<57} │",
        format!("Privacy grade      : {}", colorize_grade(grade))
    );
    println!(
        " │  {:<48} │",
        format!("Total term hits    : {}", report.summary.total_hits)
    );
    println!(
        " │  {:<48} │",
        format!(
            "Weasel words       : {} ({}% of {} words)",
            report.summary.weasel_word_hits,
            report.summary.weasel_density_percent,
            report.summary.text_word_count
        )
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    // Category ranking
    let mut ranking = Table::new();
    ranking
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Total hits").add_attribute(Attribute::Bold),
        ]);
    for rank in &report.categories_sorted {
        ranking.add_row(vec![
            Cell::new(rank.category.to_string()),
            Cell::new(rank.total_hits.to_string()).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}\n", ranking);

    // Flaw table: dangerous (high/medium) by default, everything with --verbose
    let shown: Vec<&Flaw> = flaws
        .iter()
        .filter(|f| verbose || f.severity != Severity::Low)
        .collect();

    if shown.is_empty() {
        println!(" {} No flagged terms.\n", "✓".green());
        return Ok(());
    }

    println!(" {} Flagged terms:\n", "[FLAWS]".red().bold());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Severity").add_attribute(Attribute::Bold),
            Cell::new("Term").add_attribute(Attribute::Bold),
            Cell::new("Count").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Subgroup").add_attribute(Attribute::Bold),
        ]);

    for flaw in shown {
        table.add_row(vec![
            Cell::new(flaw.severity.to_string()).fg(severity_color(flaw.severity)),
            Cell::new(flaw.term),
            Cell::new(flaw.count.to_string()).set_alignment(CellAlignment::Right),
            Cell::new(flaw.category.to_string()),
            Cell::new(flaw.subgroup),
        ]);
    }
    println!("{}\n", table);

    Ok(())
}

/// Render a colored terminal report for a cookie audit.
pub fn render_audit(report: &CookieAuditReport, verbose: bool, quiet: bool) -> Result<()> {
    if quiet {
        println!(
            "Score: {}  Grade: {}  Risk: {}  Issues: {}",
            report.score,
            colorize_grade(report.grade),
            colorize_risk(report.risk_level),
            report.issues.len(),
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "privacy-checkr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Cookie truthfulness audit\n");

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Score              : {} / 100", report.score)
    );
    println!(
        " │  {:<57} │",
        format!("Grade              : {}", colorize_grade(report.grade))
    );
    println!(
        " │  {:<57} │",
        format!("Risk level         : {}", colorize_risk(report.risk_level))
    );
    println!(
        " │  {:<48} │",
        format!("Consent state      : {}", report.consent_state)
    );
    println!(
        " │  {:<48} │",
        format!(
            "Cookies            : {} ({} analytics, {} advertising)",
            report.cookies.len(),
            report.category_counts.analytics,
            report.category_counts.advertising
        )
    );
    println!(
        " │  {:<48} │",
        format!(
            "                     {} session, {} functional, {} unknown",
            report.category_counts.session,
            report.category_counts.functional,
            report.category_counts.unknown
        )
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if report.issues.is_empty() {
        println!(" {} Policy claims match observed cookies.\n", "✓".green());
    } else {
        println!(" {} Issues found:\n", "[ISSUES]".red().bold());
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Severity").add_attribute(Attribute::Bold),
                Cell::new("Issue").add_attribute(Attribute::Bold),
                Cell::new("Detail").add_attribute(Attribute::Bold),
            ]);
        for issue in &report.issues {
            table.add_row(vec![
                Cell::new(issue.severity.to_string()).fg(severity_color(issue.severity)),
                Cell::new(issue.title),
                Cell::new(issue.detail),
            ]);
        }
        println!("{}\n", table);
    }

    if verbose && !report.cookies.is_empty() {
        println!(" {} Classified cookies:\n", "[COOKIES]".cyan().bold());
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Name").add_attribute(Attribute::Bold),
                Cell::new("Category").add_attribute(Attribute::Bold),
            ]);
        for cookie in &report.cookies {
            table.add_row(vec![
                Cell::new(&cookie.name),
                Cell::new(cookie.category.to_string()).fg(cookie_color(cookie.category)),
            ]);
        }
        println!("{}\n", table);
    }

    Ok(())
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::DarkGrey,
    }
}

fn cookie_color(category: CookieCategory) -> Color {
    match category {
        CookieCategory::Analytics => Color::Yellow,
        CookieCategory::Advertising => Color::Red,
        CookieCategory::Session => Color::Green,
        CookieCategory::Functional => Color::Cyan,
        CookieCategory::Unknown => Color::DarkGrey,
    }
}

fn colorize_risk(level: RiskLevel) -> ColoredString {
    match level {
        RiskLevel::Low => level.to_string().green(),
        RiskLevel::Medium => level.to_string().yellow(),
        RiskLevel::High => level.to_string().red(),
    }
}

fn colorize_grade(grade: Grade) -> ColoredString {
    match grade {
        Grade::A | Grade::B => grade.to_string().green(),
        Grade::C => grade.to_string().yellow(),
        Grade::D | Grade::F => grade.to_string().red(),
    }
}
