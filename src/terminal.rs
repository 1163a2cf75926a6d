// ABOUTME: Terminal host: runs the extension outside an editor, over stdio.
// ABOUTME: A file on disk stands in for the active editor; panel output is printed as JSON lines.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::host::{EditorHost, EditorSnapshot, PanelView, WebviewOptions};
use crate::protocol::OutboundMessage;

/// Inclusive, 1-based line range used as the selection, parsed from `START:END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("expected START:END, got '{s}'"))?;
        let start: usize = start
            .trim()
            .parse()
            .map_err(|_| format!("invalid start line '{start}'"))?;
        let end: usize = end
            .trim()
            .parse()
            .map_err(|_| format!("invalid end line '{end}'"))?;
        if start == 0 || end < start {
            return Err(format!("invalid line range {start}:{end}"));
        }
        Ok(Self { start, end })
    }
}

impl LineRange {
    /// The selected lines joined by `\n`, or `None` when the range is past the end.
    pub fn select(&self, text: &str) -> Option<String> {
        let lines: Vec<&str> = text
            .lines()
            .skip(self.start.saturating_sub(1))
            .take(self.end.saturating_add(1).saturating_sub(self.start))
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

/// Map a file extension to an editor language identifier.
pub fn language_id_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "rs" => "rust",
        "ts" => "typescript",
        "tsx" => "typescriptreact",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "javascriptreact",
        "py" => "python",
        "go" => "go",
        "c" | "h" => "c",
        "cc" | "cpp" | "cxx" | "hpp" => "cpp",
        "java" => "java",
        "rb" => "ruby",
        "sh" | "bash" => "shellscript",
        "md" => "markdown",
        "json" => "json",
        "toml" => "toml",
        "yaml" | "yml" => "yaml",
        "html" => "html",
        "css" => "css",
        _ => "plaintext",
    }
}

/// Editor host backed by the terminal.
pub struct TerminalHost {
    editor: Option<EditorSnapshot>,
    /// Answer for the next input box instead of reading stdin.
    scripted_input: Mutex<Option<String>>,
}

impl TerminalHost {
    pub fn new(editor: Option<EditorSnapshot>) -> Self {
        Self {
            editor,
            scripted_input: Mutex::new(None),
        }
    }

    /// Open `path` as the active document, optionally selecting a line range.
    pub fn open(path: &Path, selection: Option<LineRange>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let selected_text = selection.and_then(|range| range.select(&text));
        Ok(Self::new(Some(EditorSnapshot {
            language_id: language_id_for(path).to_string(),
            text,
            selected_text,
        })))
    }

    /// Answer the next input box with `input`.
    pub fn with_input(self, input: Option<String>) -> Self {
        if let Ok(mut slot) = self.scripted_input.lock() {
            *slot = input;
        }
        self
    }

    fn take_scripted_input(&self) -> Option<String> {
        self.scripted_input.lock().ok().and_then(|mut slot| slot.take())
    }
}

#[async_trait]
impl EditorHost for TerminalHost {
    async fn active_editor(&self) -> Option<EditorSnapshot> {
        self.editor.clone()
    }

    async fn insert_snippet(&self, snippet: &str) -> anyhow::Result<()> {
        if self.editor.is_none() {
            tracing::debug!("no active document, snippet dropped");
            return Ok(());
        }
        print_json_line(&json!({"type": "insertSnippet", "value": snippet}))
    }

    async fn show_input_box(&self, prompt: &str) -> Option<String> {
        if let Some(input) = self.take_scripted_input() {
            return Some(input);
        }

        eprint!("{prompt} ");
        if let Err(e) = std::io::stderr().flush() {
            tracing::debug!(error = %e, "failed to flush input prompt");
        }
        let mut line = String::new();
        match BufReader::new(tokio::io::stdin()).read_line(&mut line).await {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }

    fn register_command(&self, command_id: &str) -> anyhow::Result<()> {
        tracing::debug!(command = command_id, "command registered");
        Ok(())
    }

    fn register_webview_provider(&self, view_type: &str) -> anyhow::Result<()> {
        tracing::debug!(view_type, "webview provider registered");
        Ok(())
    }

    async fn show_error_message(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}

/// Panel that prints posted messages to stdout.
pub struct TerminalPanel {
    visible: AtomicBool,
    html: Mutex<String>,
    options: Mutex<Option<WebviewOptions>>,
}

impl TerminalPanel {
    pub fn new(visible: bool) -> Self {
        Self {
            visible: AtomicBool::new(visible),
            html: Mutex::new(String::new()),
            options: Mutex::new(None),
        }
    }

    pub fn html(&self) -> String {
        self.html.lock().map(|h| h.clone()).unwrap_or_default()
    }

    pub fn options(&self) -> Option<WebviewOptions> {
        self.options.lock().ok().and_then(|o| o.clone())
    }
}

#[async_trait]
impl PanelView for TerminalPanel {
    fn set_options(&self, options: WebviewOptions) {
        if let Ok(mut slot) = self.options.lock() {
            *slot = Some(options);
        }
    }

    fn set_html(&self, html: String) {
        if let Ok(mut slot) = self.html.lock() {
            *slot = html;
        }
    }

    fn as_webview_uri(&self, path: &Path) -> String {
        let absolute: PathBuf = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        format!("file://{}", absolute.display())
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn show(&self, _preserve_focus: bool) {
        self.visible.store(true, Ordering::SeqCst);
    }

    async fn post_message(&self, message: OutboundMessage) -> bool {
        match serde_json::to_value(&message) {
            Ok(value) => print_json_line(&value).is_ok(),
            Err(_) => false,
        }
    }
}

fn print_json_line(value: &serde_json::Value) -> anyhow::Result<()> {
    let line = serde_json::to_string(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", line)?;
    stdout.flush()?;
    Ok(())
}
