// Markdown reports — a shareable summary of one scoring run.

use anyhow::{Context, Result};
use std::path::Path;

use super::ScoreRun;

/// Render a scoring run as a markdown document, wordsets ranked by score.
pub fn generate_report(run: &ScoreRun) -> String {
    let mut out = String::new();
    let generated = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC");

    out.push_str("# Topic Coherence Report\n\n");
    out.push_str(&format!("- Configuration: `{}`\n", run.configuration));
    out.push_str(&format!("- Scored at: {}\n", run.scored_at));
    out.push_str(&format!("- Generated: {generated}\n"));
    out.push_str(&format!("- Wordsets: {}\n", run.results.len()));
    if let Some(mean) = run.mean_score() {
        out.push_str(&format!("- Mean score: {mean:.4}\n"));
    }
    out.push('\n');

    if run.results.is_empty() {
        out.push_str("_No wordsets were scored._\n");
        return out;
    }

    out.push_str("| Rank | Input # | Score | Words |\n");
    out.push_str("|---:|---:|---:|---|\n");
    for (rank, index) in run.ranking().into_iter().enumerate() {
        let result = &run.results[index];
        let words = escape_cell(&result.words.join(" "));
        out.push_str(&format!(
            "| {} | {} | {:.4} | {} |\n",
            rank + 1,
            index + 1,
            result.score,
            words
        ));
    }
    out
}

pub fn write_report(path: &Path, run: &ScoreRun) -> Result<()> {
    std::fs::write(path, generate_report(run))
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_ranks_wordsets() {
        let run = ScoreRun::new(
            "C(D_t,P_bd,S_one^one,m_lr,σ_a,w_1)".to_string(),
            &[
                vec!["low".to_string(), "one".to_string()],
                vec!["high".to_string(), "a|b".to_string()],
            ],
            &[0.1, 0.9],
        );
        let report = generate_report(&run);
        assert!(report.contains("`C(D_t,P_bd,S_one^one,m_lr,σ_a,w_1)`"));
        assert!(report.contains("| 1 | 2 | 0.9000 | high a\\|b |"));
        assert!(report.contains("| 2 | 1 | 0.1000 | low one |"));
    }

    #[test]
    fn test_empty_report() {
        let run = ScoreRun::new("C(x)".to_string(), &[], &[]);
        assert!(generate_report(&run).contains("No wordsets"));
    }
}
