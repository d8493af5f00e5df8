//! CodeScope Core Library
//!
//! Data model, injected capabilities, HTML rendering and the UI controller
//! that drives the remote code-analysis service.

pub mod analysis;
pub mod capability;
pub mod controller;
pub mod error;
pub mod render;
pub mod service;

pub use analysis::model::{
    AiFinding, AnalysisRequest, AnalysisResponse, FormatResponse, HealthResponse, LeakFinding,
    ShareResponse, StyleFinding,
};
pub use analysis::severity::Severity;
pub use capability::{Clipboard, Editor, LanguageSelect, Notifier, ResultsPanel, Trigger};
pub use controller::{Capabilities, UiController};
pub use error::{CodeScopeError, CodeScopeResult};
pub use render::Html;
pub use service::AnalysisService;
