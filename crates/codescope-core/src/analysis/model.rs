//! Analysis domain models.
//!
//! Findings deserialize leniently: a missing field takes its default so a
//! partially filled finding still renders.

use serde::{Deserialize, Serialize};

/// Body sent to `/analyze`, `/format` and `/share`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub code: String,
    pub language: String,
}

impl AnalysisRequest {
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: language.into(),
        }
    }
}

/// A potential memory leak.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeakFinding {
    pub line: u32,
    pub severity: String,
    pub issue: String,
    pub fix: String,
}

/// A static style or correctness issue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleFinding {
    #[serde(rename = "type")]
    pub kind: String,
    pub line: u32,
    pub suggestion: String,
}

/// A model-suggested issue with its confidence in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiFinding {
    #[serde(rename = "type")]
    pub kind: String,
    pub confidence: f64,
    pub issue: String,
    pub suggestion: String,
}

impl AiFinding {
    /// Confidence as a whole percentage, rounded half up.
    pub fn confidence_percent(&self) -> i64 {
        (self.confidence * 100.0).round() as i64
    }
}

/// Response of `/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_leaks: Option<Vec<LeakFinding>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_analysis: Option<Vec<StyleFinding>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<Vec<AiFinding>>,
}

impl AnalysisResponse {
    pub fn leaks(&self) -> &[LeakFinding] {
        self.memory_leaks.as_deref().unwrap_or_default()
    }

    pub fn style_issues(&self) -> &[StyleFinding] {
        self.code_analysis.as_deref().unwrap_or_default()
    }

    pub fn ai_findings(&self) -> &[AiFinding] {
        self.ai_analysis.as_deref().unwrap_or_default()
    }

    /// No leaks and no style issues. AI findings are not consulted.
    pub fn is_clean(&self) -> bool {
        self.leaks().is_empty() && self.style_issues().is_empty()
    }
}

/// Response of `/format`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatResponse {
    #[serde(default)]
    pub formatted: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Response of `/share`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResponse {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response of `/api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
