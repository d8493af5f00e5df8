//! The UI controller: Analyze, Format and Share.
//!
//! Each operation reads the editor and the selected language, calls one
//! endpoint, and writes its outcome to the results panel, the editor or the
//! clipboard. Operations take `&self` and hold no locks, so they may overlap;
//! whichever finishes last owns the panel.

use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::analysis::model::{AnalysisRequest, AnalysisResponse};
use crate::capability::{Clipboard, Editor, LanguageSelect, Notifier, ResultsPanel, Trigger};
use crate::error::{CodeScopeError, CodeScopeResult};
use crate::render::{self, Html};
use crate::service::AnalysisService;

pub const FORMAT_LABEL: &str = "Format";
pub const FORMAT_BUSY_LABEL: &str = "Formatting...";
pub const SHARE_NOTICE: &str = "Share URL copied to clipboard!";

/// Host capabilities handed to a [`UiController`].
#[derive(Clone)]
pub struct Capabilities {
    pub editor: Arc<dyn Editor>,
    pub language: Arc<dyn LanguageSelect>,
    pub panel: Arc<dyn ResultsPanel>,
    pub clipboard: Arc<dyn Clipboard>,
    pub notifier: Arc<dyn Notifier>,
    pub format_trigger: Arc<dyn Trigger>,
}

/// Wires user actions to the analysis service.
#[derive(Clone)]
pub struct UiController {
    service: Arc<dyn AnalysisService>,
    caps: Capabilities,
}

impl UiController {
    pub fn new(service: Arc<dyn AnalysisService>, caps: Capabilities) -> Self {
        Self { service, caps }
    }

    fn request(&self) -> AnalysisRequest {
        AnalysisRequest::new(self.caps.editor.value(), self.caps.language.selected())
    }

    fn show(&self, fragment: CodeScopeResult<Html>) {
        match fragment {
            Ok(html) => self.caps.panel.show(html),
            Err(e) => error!(error = %e, "Failed to render results panel"),
        }
    }

    /// Analyze the editor contents and render the findings.
    ///
    /// The panel always reflects the outcome. The return value repeats it for
    /// callers that need it: validation and application errors come back as
    /// `Err` alongside their rendered panel.
    pub async fn analyze(&self) -> CodeScopeResult<AnalysisResponse> {
        let request = self.request();

        if request.code.is_empty() {
            self.show(render::validation());
            return Err(CodeScopeError::validation(render::VALIDATION_MESSAGE));
        }

        self.show(render::loading());
        debug!(language = %request.language, bytes = request.code.len(), "Analyzing code");

        let response = match self.service.analyze(&request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Analysis error");
                self.show(render::error_card(
                    render::ERROR_TITLE,
                    render::ANALYSIS_FAILED_MESSAGE,
                ));
                return Err(e);
            }
        };

        if let Some(message) = response.error.as_deref().filter(|m| !m.is_empty()) {
            warn!(error = %message, "Analysis rejected by server");
            self.show(render::error_card(render::ERROR_TITLE, message));
            return Err(CodeScopeError::Application(message.to_string()));
        }

        debug!(
            memory_leaks = response.leaks().len(),
            code_issues = response.style_issues().len(),
            ai_findings = response.ai_findings().len(),
            "Analysis complete"
        );
        self.show(render::analysis_results(&response));
        Ok(response)
    }

    /// Format the editor contents in place.
    ///
    /// Returns whether the editor was replaced. On failure the editor is left
    /// as it was and a "Format Error" card is shown. The trigger is disabled
    /// for the duration and restored on every exit.
    pub async fn format(&self) -> CodeScopeResult<bool> {
        let request = self.request();
        let _busy = BusyGuard::engage(
            self.caps.format_trigger.as_ref(),
            FORMAT_BUSY_LABEL,
            FORMAT_LABEL,
        );

        let result = self.apply_format(&request).await;
        if let Err(e) = &result {
            error!(error = %e, "Format error");
            self.show(render::error_card(render::FORMAT_ERROR_TITLE, &e.to_string()));
        }
        result
    }

    async fn apply_format(&self, request: &AnalysisRequest) -> CodeScopeResult<bool> {
        let response = self.service.format(request).await?;
        match response.formatted {
            Some(formatted) if !formatted.is_empty() => {
                self.caps.editor.set_value(&formatted)?;
                debug!(bytes = formatted.len(), "Editor replaced with formatted code");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Share the editor contents and copy the returned URL.
    ///
    /// Failures are logged and otherwise silent: no panel, no notification.
    /// Returns the URL that was copied, if any.
    pub async fn share(&self) -> Option<String> {
        let request = self.request();

        let url = match self.service.share(&request).await {
            Ok(response) => response.url.filter(|url| !url.is_empty())?,
            Err(e) => {
                error!(error = %e, "Share error");
                return None;
            }
        };

        if let Err(e) = self.caps.clipboard.write_text(&url) {
            error!(error = %e, "Share error");
            return None;
        }

        self.caps.notifier.notify(SHARE_NOTICE);
        Some(url)
    }
}

/// Puts a trigger in its busy state and restores it when dropped.
struct BusyGuard<'a> {
    trigger: &'a dyn Trigger,
    idle_label: &'static str,
}

impl<'a> BusyGuard<'a> {
    fn engage(trigger: &'a dyn Trigger, busy_label: &str, idle_label: &'static str) -> Self {
        trigger.set_enabled(false);
        trigger.set_label(busy_label);
        Self {
            trigger,
            idle_label,
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.trigger.set_enabled(true);
        self.trigger.set_label(self.idle_label);
    }
}
