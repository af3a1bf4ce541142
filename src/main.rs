//! `privacy-checkr` — scan privacy-policy text and grade cookie disclosure truthfulness.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load the exit-code policy config ([`config::load_config`]).
//! 3. Resolve `--text`/`--file` inputs ([`cli::read_input`]).
//! 4. Run the requested analysis ([`policy`] or [`cookie`]).
//! 5. Render the requested report ([`report`], JSON via `serde_json`).
//! 6. Exit `0` (within policy) or `1` (fail threshold reached).

mod cli;
mod config;
mod cookie;
mod models;
mod policy;
mod report;
mod rules;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, Command, ReportFormat};
use config::load_config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let failed = match cli.command {
        Command::Analyze { text, file } => {
            let content = cli::read_input(text, file.as_deref(), "--text or --file")?;

            if !cli.quiet {
                eprintln!(
                    "  {} analyzing {} characters of policy text",
                    "→".cyan(),
                    content.len()
                );
            }

            let policy_report = policy::analyzer::analyze_policy_text(&content);
            let flaws = policy::flaws::extract_flaws(&policy_report);
            let grade = policy::flaws::privacy_grade(policy_report.risk_score);

            match cli.report {
                ReportFormat::Terminal => {
                    report::terminal::render_policy(
                        &policy_report,
                        &flaws,
                        grade,
                        cli.verbose,
                        cli.quiet,
                    )?;
                }
                ReportFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&policy_report)?);
                }
            }

            config::breaches_risk_policy(&config, &policy_report)
        }

        Command::Audit {
            text,
            file,
            cookies,
            cookies_file,
            consent,
        } => {
            let policy_text = cli::read_input(text, file.as_deref(), "--text or --file")?;
            let cookie_text =
                cli::read_input(cookies, cookies_file.as_deref(), "--cookies or --cookies-file")?;

            let audit_report = cookie::audit::grade_cookie_truthfulness(
                &policy_text,
                &cookie_text,
                (&consent).into(),
            );

            if !cli.quiet {
                eprintln!(
                    "  {} audited {} distinct cookies",
                    "→".cyan(),
                    audit_report.cookies.len()
                );
            }

            match cli.report {
                ReportFormat::Terminal => {
                    report::terminal::render_audit(&audit_report, cli.verbose, cli.quiet)?;
                }
                ReportFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&audit_report)?);
                }
            }

            config::breaches_grade_policy(&config, &audit_report)
        }
    };

    if failed {
        std::process::exit(1);
    }

    Ok(())
}
