//! Terminal output formatting.

use codescope_core::{AnalysisResponse, Severity};
use colored::{ColoredString, Colorize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns assumed when stdout is not a terminal.
const PIPED_WIDTH: usize = 100;

/// Print an analysis summary followed by each non-empty section.
pub fn print_analysis(response: &AnalysisResponse) {
    let width = output_width();

    println!("{}", "Analysis Summary".bold());
    println!("{}", "─".repeat(40));
    println!(
        "  Memory Leaks: {}",
        response.leaks().len().to_string().red()
    );
    println!(
        "  Code Issues:  {}",
        response.style_issues().len().to_string().yellow()
    );
    println!("{}", "─".repeat(40));

    if !response.leaks().is_empty() {
        println!();
        println!("{}", "Memory Leaks".red().bold());
        for leak in response.leaks() {
            let severity = Severity::parse(&leak.severity);
            let line = format!("Line {:>4}", leak.line);
            let badge = format!("{:<6}", severity.to_string());
            let prefix = format!("  {} {} ", line, badge);
            println!(
                "  {} {} {}",
                line.dimmed(),
                severity_badge(&severity, badge),
                fit(&prefix, &leak.issue, width)
            );
            println!(
                "        {} {}",
                "Fix:".green(),
                fit("        Fix: ", &leak.fix, width)
            );
        }
    }

    if !response.style_issues().is_empty() {
        println!();
        println!("{}", "Code Analysis".yellow().bold());
        for issue in response.style_issues() {
            let line = format!("Line {:>4}", issue.line);
            let prefix = format!("  {} {} ", line, issue.kind);
            println!(
                "  {} {} {}",
                line.dimmed(),
                issue.kind.yellow(),
                fit(&prefix, &issue.suggestion, width)
            );
        }
    }

    if !response.ai_findings().is_empty() {
        println!();
        println!("{}", "AI Analysis".blue().bold());
        for finding in response.ai_findings() {
            let confidence = format!("{:>3}%", finding.confidence_percent());
            let prefix = format!("  {} ", confidence);
            println!(
                "  {} {}",
                confidence.blue(),
                fit(&prefix, &finding.issue, width)
            );
            println!(
                "       {} {}",
                "Suggestion:".green(),
                fit("       Suggestion: ", &finding.suggestion, width)
            );
        }
    }

    if response.is_clean() {
        println!();
        println!("{} {}", "✓".green().bold(), "No issues found in your code!".green());
    }
}

/// Color an already padded severity label by level.
fn severity_badge(severity: &Severity, text: String) -> ColoredString {
    match severity {
        Severity::High => text.red().bold(),
        Severity::Medium => text.yellow(),
        Severity::Low => text.green(),
        Severity::Other(_) => text.blue(),
    }
}

fn output_width() -> usize {
    match terminal_size::terminal_size() {
        Some((terminal_size::Width(w), _)) => usize::from(w),
        None => PIPED_WIDTH,
    }
}

/// Fit `text` into the columns left on a row of `width` after `prefix`.
///
/// The last column stays free so the cursor never wraps. Cut text ends in `…`.
fn fit(prefix: &str, text: &str, width: usize) -> String {
    let budget = width.saturating_sub(UnicodeWidthStr::width(prefix) + 1);
    if UnicodeWidthStr::width(text) <= budget {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > budget {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    if budget > 0 {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_short_text_untouched() {
        assert_eq!(fit("  Line    1 ", "Unclosed file", 80), "Unclosed file");
    }

    #[test]
    fn test_fit_uses_width_left_after_prefix() {
        // 20 columns, 12 taken by the prefix, 1 kept free: 7 for the text.
        let out = fit("  Line    1 ", "Possible memory leak", 20);
        assert_eq!(out, "Possib…");
        assert_eq!(UnicodeWidthStr::width(out.as_str()), 7);
    }

    #[test]
    fn test_fit_wide_chars() {
        let out = fit("", "変数が使われていません", 9);
        assert!(UnicodeWidthStr::width(out.as_str()) <= 8);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn test_fit_no_room_left() {
        assert_eq!(fit("       Suggestion: ", "Add comments", 10), "");
    }
}
