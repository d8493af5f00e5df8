//! Leak severity levels and their display attributes.

use std::fmt;

/// Severity reported for a memory-leak finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
    Other(String),
}

impl Severity {
    /// Parse case-insensitively; unknown values are kept as reported.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            _ => Self::Other(s.to_string()),
        }
    }

    /// Color family used for badges.
    pub fn color(&self) -> &'static str {
        match self {
            Self::High => "red",
            Self::Medium => "yellow",
            Self::Low => "green",
            Self::Other(_) => "blue",
        }
    }

    /// Badge text, e.g. `High Severity`.
    pub fn label(&self) -> String {
        format!("{} Severity", capitalize(&self.to_string()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
