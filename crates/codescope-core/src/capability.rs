//! Capabilities the controller drives.
//!
//! Each one stands in for a piece of the host environment (the code editor,
//! the language picker, the results panel, ...). Implementations use interior
//! mutability so a controller can be shared across concurrent operations.

use crate::error::CodeScopeResult;
use crate::render::Html;

/// The code editor.
pub trait Editor: Send + Sync {
    /// Current contents.
    fn value(&self) -> String;

    /// Replace the contents wholesale.
    fn set_value(&self, text: &str) -> CodeScopeResult<()>;
}

/// The language picker next to the editor.
pub trait LanguageSelect: Send + Sync {
    fn selected(&self) -> String;
}

/// Results panel. Every call overwrites what was shown before.
pub trait ResultsPanel: Send + Sync {
    fn show(&self, html: Html);
}

/// System clipboard.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> CodeScopeResult<()>;
}

/// Synchronous user notification.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// A button that starts an operation.
pub trait Trigger: Send + Sync {
    fn set_enabled(&self, enabled: bool);
    fn set_label(&self, label: &str);
}
