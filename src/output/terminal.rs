// Colored terminal output for score tables, presets and evaluations.
//
// main.rs display paths delegate here so formatting stays in one place.

use colored::Colorize;

use super::ScoreRun;
use crate::coherence::Preset;
use crate::evaluate::Agreement;

/// Display a scoring run, one row per wordset in input order.
pub fn display_scores(run: &ScoreRun) {
    if run.results.is_empty() {
        println!("No wordsets to score. The input file had no non-empty lines.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Coherence ({} wordsets) ===", run.results.len()).bold()
    );
    println!("  {}", run.configuration.dimmed());
    println!();

    println!(
        "  {:>4}  {:>9}  {}",
        "#".dimmed(),
        "Score".dimmed(),
        "Words".dimmed(),
    );
    println!("  {}", "-".repeat(72).dimmed());

    for (i, result) in run.results.iter().enumerate() {
        let words = super::truncate_chars(&result.words.join(" "), 56);
        println!(
            "  {:>4}  {}  {}",
            i + 1,
            colorize_score(result.score),
            words
        );
    }
    println!();

    if let Some(mean) = run.mean_score() {
        println!("  Mean: {:.4}", mean);
    }
    let ranking = run.ranking();
    if let (Some(&best), Some(&worst)) = (ranking.first(), ranking.last()) {
        println!(
            "  Most coherent: #{}  |  Least coherent: #{}",
            best + 1,
            worst + 1
        );
    }
}

/// List the named presets with their full configuration names.
pub fn display_presets(default: Preset) {
    println!("\n{}", "=== Coherence Presets ===".bold());
    println!();
    for preset in Preset::ALL {
        let marker = if preset == default {
            "*".green().bold().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "  {} {:<7} {}",
            marker,
            preset.name(),
            preset.configuration_name("corpus").dimmed()
        );
    }
    println!();
    println!("  {} default (COHERENCE_MEASURE)", "*".green().bold());
}

/// Display the agreement between scores and human ratings.
pub fn display_agreement(agreement: &Agreement) {
    println!(
        "\n{}",
        format!("=== Agreement ({} topics) ===", agreement.samples).bold()
    );
    println!("  Kendall's tau: {}", colorize_score(agreement.kendall_tau));
    println!("  Pearson's r:   {}", colorize_score(agreement.pearson));
}

/// Colorize a score by sign: negative red, near zero yellow, positive green.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{:>9.4}", score);
    if score.is_nan() {
        text.dimmed()
    } else if score < 0.0 {
        text.red()
    } else if score < 0.1 {
        text.yellow()
    } else {
        text.green()
    }
}
