//! HTML fragments for the results panel.
//!
//! Every fragment is an askama template, so server-provided text is escaped
//! before it reaches the panel.

use askama::Template;
use std::fmt;

use crate::analysis::model::{AnalysisResponse, StyleFinding};
use crate::analysis::severity::Severity;
use crate::error::CodeScopeResult;

pub const VALIDATION_MESSAGE: &str = "Please enter some code to analyze";
pub const LOADING_MESSAGE: &str = "Analyzing Code...";
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to analyze code. Please try again.";
pub const NO_ISSUES_MESSAGE: &str = "No issues found in your code!";

pub const ERROR_TITLE: &str = "Error";
pub const FORMAT_ERROR_TITLE: &str = "Format Error";

/// A rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Html(String);

impl Html {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================
// TEMPLATES
// ============================================================

#[derive(Template)]
#[template(path = "validation.html")]
struct ValidationTemplate<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "loading.html")]
struct LoadingTemplate<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "error_card.html")]
struct ErrorCardTemplate<'a> {
    title: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "analysis.html")]
struct AnalysisTemplate<'a> {
    leak_count: usize,
    issue_count: usize,
    leaks: Vec<LeakView<'a>>,
    issues: &'a [StyleFinding],
    ai: Vec<AiView<'a>>,
    clean: bool,
}

/// View model for a leak finding.
struct LeakView<'a> {
    line: u32,
    severity: &'a str,
    color: &'static str,
    label: String,
    issue: &'a str,
    fix: &'a str,
}

/// View model for an AI finding.
struct AiView<'a> {
    kind: &'a str,
    confidence: i64,
    issue: &'a str,
    suggestion: &'a str,
}

// ============================================================
// FRAGMENTS
// ============================================================

/// Shown instead of calling the service when the editor is empty.
pub fn validation() -> CodeScopeResult<Html> {
    let html = ValidationTemplate {
        message: VALIDATION_MESSAGE,
    }
    .render()?;
    Ok(Html(html))
}

/// Shown while an analysis is in flight.
pub fn loading() -> CodeScopeResult<Html> {
    let html = LoadingTemplate {
        message: LOADING_MESSAGE,
    }
    .render()?;
    Ok(Html(html))
}

/// A single red card with a title and a message.
pub fn error_card(title: &str, message: &str) -> CodeScopeResult<Html> {
    let html = ErrorCardTemplate { title, message }.render()?;
    Ok(Html(html))
}

/// Summary, then leak, style and AI sections, then the "no issues" panel.
///
/// Sections with no findings are omitted. The `error` field is not looked at
/// here; callers render [`error_card`] for those responses instead.
pub fn analysis_results(response: &AnalysisResponse) -> CodeScopeResult<Html> {
    let leaks = response
        .leaks()
        .iter()
        .map(|leak| {
            let severity = Severity::parse(&leak.severity);
            LeakView {
                line: leak.line,
                severity: &leak.severity,
                color: severity.color(),
                label: severity.label(),
                issue: &leak.issue,
                fix: &leak.fix,
            }
        })
        .collect();

    let ai = response
        .ai_findings()
        .iter()
        .map(|finding| AiView {
            kind: &finding.kind,
            confidence: finding.confidence_percent(),
            issue: &finding.issue,
            suggestion: &finding.suggestion,
        })
        .collect();

    let html = AnalysisTemplate {
        leak_count: response.leaks().len(),
        issue_count: response.style_issues().len(),
        leaks,
        issues: response.style_issues(),
        ai,
        clean: response.is_clean(),
    }
    .render()?;
    Ok(Html(html))
}
