//! Terminal-side capabilities for the UI controller.
//!
//! A source file plays the editor, the rendered panel is kept in memory until
//! the command decides where to write it, and the system clipboard is reached
//! through `arboard`.

use codescope_core::controller::FORMAT_LABEL;
use codescope_core::{
    AnalysisService, Capabilities, Clipboard, CodeScopeError, CodeScopeResult, Editor, Html,
    LanguageSelect, Notifier, ResultsPanel, Trigger, UiController,
};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Language sent when the extension is not recognised.
pub const FALLBACK_LANGUAGE: &str = "python";

/// Guess the language identifier from a file extension.
pub fn infer_language(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("py") | Some("pyw") => "python",
        Some("js") | Some("mjs") | Some("cjs") => "javascript",
        Some("ts") => "typescript",
        _ => FALLBACK_LANGUAGE,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================
// EDITOR
// ============================================================

/// A source file acting as the editor.
///
/// Contents are read once on open. `set_value` writes a temp file next to the
/// resolved target, gives it the target's permissions and renames it into
/// place, so a symlink keeps pointing at the updated file.
#[derive(Debug)]
pub struct FileEditor {
    path: PathBuf,
    text: Mutex<String>,
}

impl FileEditor {
    pub fn open(path: &Path) -> CodeScopeResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            text: Mutex::new(text),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(target: &Path) -> PathBuf {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        target.with_file_name(format!(".{}.codescope.tmp", name))
    }

    fn replace(target: &Path, tmp: &Path, text: &str) -> std::io::Result<()> {
        std::fs::write(tmp, text)?;
        std::fs::set_permissions(tmp, std::fs::metadata(target)?.permissions())?;
        std::fs::rename(tmp, target)
    }
}

impl Editor for FileEditor {
    fn value(&self) -> String {
        lock(&self.text).clone()
    }

    fn set_value(&self, text: &str) -> CodeScopeResult<()> {
        let target = std::fs::canonicalize(&self.path)?;
        let tmp = Self::temp_path(&target);
        if let Err(e) = Self::replace(&target, &tmp, text) {
            if tmp.exists() {
                if let Err(cleanup) = std::fs::remove_file(&tmp) {
                    warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temp file");
                }
            }
            return Err(e.into());
        }
        *lock(&self.text) = text.to_string();
        debug!(path = %target.display(), bytes = text.len(), "Editor file replaced");
        Ok(())
    }
}

/// Language chosen on the command line or inferred from the file.
pub struct SelectedLanguage(pub String);

impl LanguageSelect for SelectedLanguage {
    fn selected(&self) -> String {
        self.0.clone()
    }
}

// ============================================================
// PANEL, CLIPBOARD, NOTIFIER, TRIGGER
// ============================================================

/// Holds the most recently shown fragment.
#[derive(Default)]
pub struct HtmlPanel {
    current: Mutex<Option<Html>>,
}

impl HtmlPanel {
    /// The fragment on display, if any.
    pub fn current(&self) -> Option<Html> {
        lock(&self.current).clone()
    }
}

impl ResultsPanel for HtmlPanel {
    fn show(&self, html: Html) {
        debug!(bytes = html.as_str().len(), "Results panel updated");
        *lock(&self.current) = Some(html);
    }
}

/// How long `write_text` keeps serving the selection on X11/Wayland.
///
/// A clipboard manager normally takes the selection within milliseconds, after
/// which the wait ends early.
pub const CLIPBOARD_HANDOFF: Duration = Duration::from_secs(10);

/// The desktop clipboard.
///
/// On X11 and Wayland the selection lives only as long as its owner, so the
/// write blocks until another client takes ownership or [`CLIPBOARD_HANDOFF`]
/// elapses. Elsewhere the OS keeps the contents after the process exits.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> CodeScopeResult<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;
        set_text(&mut clipboard, text).map_err(clipboard_error)
    }
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
))]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    debug!(timeout = ?CLIPBOARD_HANDOFF, "Waiting for clipboard handoff");
    clipboard
        .set()
        .wait_until(std::time::Instant::now() + CLIPBOARD_HANDOFF)
        .text(text)
}

#[cfg(not(all(
    unix,
    not(any(target_os = "macos", target_os = "android", target_os = "emscripten"))
)))]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    clipboard.set_text(text)
}

fn clipboard_error(e: arboard::Error) -> CodeScopeError {
    CodeScopeError::Clipboard(e.to_string())
}

/// Prints notifications to stdout.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }
}

/// A spinner standing in for a button: visible while disabled.
pub struct SpinnerTrigger {
    label: Mutex<String>,
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerTrigger {
    pub fn new(label: &str) -> Self {
        Self {
            label: Mutex::new(label.to_string()),
            bar: Mutex::new(None),
        }
    }

    pub fn label(&self) -> String {
        lock(&self.label).clone()
    }
}

impl Trigger for SpinnerTrigger {
    fn set_enabled(&self, enabled: bool) {
        let mut bar = lock(&self.bar);
        if enabled {
            if let Some(bar) = bar.take() {
                bar.finish_and_clear();
            }
        } else if bar.is_none() {
            *bar = Some(spinner(&self.label()));
        }
    }

    fn set_label(&self, label: &str) {
        *lock(&self.label) = label.to_string();
        if let Some(bar) = lock(&self.bar).as_ref() {
            bar.set_message(label.to_string());
        }
    }
}

/// A steadily ticking spinner with a message.
pub fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

// ============================================================
// SESSION
// ============================================================

/// A controller bound to one source file, with handles to its capabilities.
pub struct Session {
    pub controller: UiController,
    pub editor: Arc<FileEditor>,
    pub panel: Arc<HtmlPanel>,
    pub language: String,
}

impl Session {
    pub fn open(
        service: Arc<dyn AnalysisService>,
        file: &Path,
        language: Option<&str>,
    ) -> CodeScopeResult<Self> {
        let editor = Arc::new(FileEditor::open(file)?);
        let language = language
            .map(str::to_string)
            .unwrap_or_else(|| infer_language(file).to_string());
        let panel = Arc::new(HtmlPanel::default());

        let caps = Capabilities {
            editor: editor.clone(),
            language: Arc::new(SelectedLanguage(language.clone())),
            panel: panel.clone(),
            clipboard: Arc::new(SystemClipboard),
            notifier: Arc::new(TerminalNotifier),
            format_trigger: Arc::new(SpinnerTrigger::new(FORMAT_LABEL)),
        };
        debug!(file = %file.display(), language = %language, "Session opened");

        Ok(Self {
            controller: UiController::new(service, caps),
            editor,
            panel,
            language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_language() {
        assert_eq!(infer_language(Path::new("main.py")), "python");
        assert_eq!(infer_language(Path::new("app.JS")), "javascript");
        assert_eq!(infer_language(Path::new("lib.mjs")), "javascript");
        assert_eq!(infer_language(Path::new("types.ts")), "typescript");
        assert_eq!(infer_language(Path::new("Makefile")), FALLBACK_LANGUAGE);
        assert_eq!(infer_language(Path::new("notes.txt")), FALLBACK_LANGUAGE);
    }

    #[test]
    fn test_file_editor_reads_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaky.py");
        std::fs::write(&path, "f=open('x')").unwrap();

        let editor = FileEditor::open(&path).unwrap();
        assert_eq!(editor.value(), "f=open('x')");

        editor.set_value("f = open('x')\n").unwrap();
        assert_eq!(editor.value(), "f = open('x')\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "f = open('x')\n");
        assert!(!FileEditor::temp_path(&path).exists());
    }

    #[test]
    fn test_file_editor_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileEditor::open(&dir.path().join("absent.py")).unwrap_err();
        assert!(matches!(err, CodeScopeError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_editor_failed_rename_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swapped.py");
        std::fs::write(&path, "x=1").unwrap();
        let editor = FileEditor::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(editor.set_value("x = 1\n").is_err());
        assert_eq!(editor.value(), "x=1");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_editor_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.py");
        std::fs::write(&path, "x=1").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        FileEditor::open(&path).unwrap().set_value("x = 1\n").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_editor_writes_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("real.py");
        let link = dir.path().join("link.py");
        std::fs::write(&target, "x=1").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        FileEditor::open(&link).unwrap().set_value("x = 1\n").unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "x = 1\n");
        assert!(!FileEditor::temp_path(&target).exists());
    }

    #[test]
    fn test_panel_keeps_last_fragment() {
        let panel = HtmlPanel::default();
        assert!(panel.current().is_none());
        panel.show(codescope_core::render::loading().unwrap());
        panel.show(codescope_core::render::validation().unwrap());
        let current = panel.current().unwrap();
        assert!(current.contains(codescope_core::render::VALIDATION_MESSAGE));
    }

    #[test]
    fn test_spinner_trigger_restores_label() {
        let trigger = SpinnerTrigger::new("Format");
        trigger.set_enabled(false);
        trigger.set_label("Formatting...");
        assert!(lock(&trigger.bar).is_some());
        trigger.set_enabled(true);
        trigger.set_label("Format");
        assert!(lock(&trigger.bar).is_none());
        assert_eq!(trigger.label(), "Format");
    }
}
