// ABOUTME: Host editor interface: the exact editor and webview operations the controller uses.
// ABOUTME: Injected as trait objects so a terminal host or a test double can stand in.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::protocol::OutboundMessage;

/// State of the active text editor at the moment a search starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    /// Language identifier of the document, e.g. `rust` or `typescript`.
    pub language_id: String,
    /// Full document text.
    pub text: String,
    /// Text covered by the current selection, if any.
    pub selected_text: Option<String>,
}

/// Options applied to a panel before its HTML is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebviewOptions {
    pub enable_scripts: bool,
    pub local_resource_roots: Vec<PathBuf>,
}

/// Editor-side operations consumed by the controller and the command entry point.
#[async_trait]
pub trait EditorHost: Send + Sync {
    /// Snapshot of the active editor, or `None` when no editor is focused.
    async fn active_editor(&self) -> Option<EditorSnapshot>;

    /// Insert text as a snippet at the caret of the active editor.
    async fn insert_snippet(&self, snippet: &str) -> anyhow::Result<()>;

    /// Show a modal input box. `None` means the user cancelled.
    async fn show_input_box(&self, prompt: &str) -> Option<String>;

    fn register_command(&self, command_id: &str) -> anyhow::Result<()>;

    fn register_webview_provider(&self, view_type: &str) -> anyhow::Result<()>;

    /// Surface an unhandled failure to the user.
    async fn show_error_message(&self, message: &str);
}

/// A host-created panel surface.
#[async_trait]
pub trait PanelView: Send + Sync {
    fn set_options(&self, options: WebviewOptions);

    fn set_html(&self, html: String);

    /// Map a local resource path to a URI the panel is allowed to load.
    fn as_webview_uri(&self, path: &Path) -> String;

    fn is_visible(&self) -> bool;

    fn show(&self, preserve_focus: bool);

    /// Post a message into the panel. Returns whether the panel accepted it.
    async fn post_message(&self, message: OutboundMessage) -> bool;
}
