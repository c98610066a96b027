// Colored terminal output for check results.
//
// The `check` subcommand delegates here; the JSON form lives in the web
// response types so both surfaces stay in sync.

use colored::Colorize;

use crate::models::{CheckResult, RiskLevel};

/// Display a check result as a short report.
pub fn display_check_result(result: &CheckResult) {
    println!("\n{}", "=== Plagiarism Check ===".bold());
    println!();
    println!(
        "  Plagiarism: {}  ({})",
        format!("{}%", result.plagiarism).bold(),
        colorize_level(result.level)
    );
    println!(
        "  Sentences: {} checked, {} with web matches",
        result.total_sentences,
        result.checked_sentences()
    );

    if result.sources.is_empty() {
        println!("\n  {}", "No matching sources found.".dimmed());
        return;
    }

    println!("\n  Matching sources:");
    for source in &result.sources {
        let preview = super::truncate_chars(&source.sentence, 80);
        println!(
            "    {}. [{:>3.0}%] {}",
            source.index + 1,
            source.score * 100.0,
            preview
        );

        let title = source.candidate.title.as_deref().unwrap_or("(untitled)");
        match source.candidate.link.as_deref() {
            Some(link) => println!("           {} {}", title.dimmed(), link.underline()),
            None => println!("           {}", title.dimmed()),
        }
    }
    println!();
}

/// Colorize a risk level.
fn colorize_level(level: RiskLevel) -> colored::ColoredString {
    match level {
        RiskLevel::High => level.as_str().red().bold(),
        RiskLevel::Medium => level.as_str().yellow(),
        RiskLevel::Safe => level.as_str().green(),
    }
}
