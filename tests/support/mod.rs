// ABOUTME: Recording test doubles for the host editor, the panel, and the chat client.
// ABOUTME: Shared by the integration tests; every call is captured for assertions.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use chatpanel::chat::ChatClient;
use chatpanel::host::{EditorHost, EditorSnapshot, PanelView, WebviewOptions};
use chatpanel::protocol::OutboundMessage;

pub fn editor(language_id: &str, text: &str, selected: Option<&str>) -> EditorSnapshot {
    EditorSnapshot {
        language_id: language_id.to_string(),
        text: text.to_string(),
        selected_text: selected.map(str::to_string),
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub editor: Option<EditorSnapshot>,
    pub input: Mutex<Option<String>>,
    pub input_prompts: Mutex<Vec<String>>,
    pub snippets: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
    pub commands: Mutex<Vec<String>>,
    pub providers: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn with_editor(editor: Option<EditorSnapshot>) -> Self {
        Self {
            editor,
            ..Default::default()
        }
    }

    pub fn answering(mut self, input: Option<&str>) -> Self {
        self.input = Mutex::new(input.map(str::to_string));
        self
    }
}

#[async_trait]
impl EditorHost for RecordingHost {
    async fn active_editor(&self) -> Option<EditorSnapshot> {
        self.editor.clone()
    }

    async fn insert_snippet(&self, snippet: &str) -> anyhow::Result<()> {
        self.snippets.lock().unwrap().push(snippet.to_string());
        Ok(())
    }

    async fn show_input_box(&self, prompt: &str) -> Option<String> {
        self.input_prompts.lock().unwrap().push(prompt.to_string());
        self.input.lock().unwrap().take()
    }

    fn register_command(&self, command_id: &str) -> anyhow::Result<()> {
        self.commands.lock().unwrap().push(command_id.to_string());
        Ok(())
    }

    fn register_webview_provider(&self, view_type: &str) -> anyhow::Result<()> {
        self.providers.lock().unwrap().push(view_type.to_string());
        Ok(())
    }

    async fn show_error_message(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

pub struct RecordingPanel {
    pub visible: AtomicBool,
    pub show_calls: AtomicUsize,
    pub html: Mutex<String>,
    pub options: Mutex<Option<WebviewOptions>>,
    pub posted: Mutex<Vec<OutboundMessage>>,
    /// Visibility observed at the moment of each post.
    pub visible_at_post: Mutex<Vec<bool>>,
}

impl RecordingPanel {
    pub fn new(visible: bool) -> Self {
        Self {
            visible: AtomicBool::new(visible),
            show_calls: AtomicUsize::new(0),
            html: Mutex::new(String::new()),
            options: Mutex::new(None),
            posted: Mutex::new(Vec::new()),
            visible_at_post: Mutex::new(Vec::new()),
        }
    }

    pub fn posted(&self) -> Vec<OutboundMessage> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl PanelView for RecordingPanel {
    fn set_options(&self, options: WebviewOptions) {
        *self.options.lock().unwrap() = Some(options);
    }

    fn set_html(&self, html: String) {
        *self.html.lock().unwrap() = html;
    }

    fn as_webview_uri(&self, path: &Path) -> String {
        format!("panel-resource:{}", path.display())
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn show(&self, _preserve_focus: bool) {
        self.show_calls.fetch_add(1, Ordering::SeqCst);
        self.visible.store(true, Ordering::SeqCst);
    }

    async fn post_message(&self, message: OutboundMessage) -> bool {
        self.visible_at_post.lock().unwrap().push(self.is_visible());
        self.posted.lock().unwrap().push(message);
        true
    }
}

pub struct ScriptedChat {
    pub signed_in: AtomicBool,
    pub init_calls: AtomicUsize,
    pub sent: Mutex<Vec<String>>,
    pub reply: String,
    pub fail_init: bool,
    pub fail_send: bool,
    /// Answer with `reply to <message>` instead of the fixed reply.
    pub echo: bool,
    /// Messages whose answer is held back for the given time.
    pub delays: Vec<(String, Duration)>,
}

impl ScriptedChat {
    pub fn replying(reply: &str) -> Self {
        Self {
            signed_in: AtomicBool::new(true),
            init_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
            reply: reply.to_string(),
            fail_init: false,
            fail_send: false,
            echo: false,
            delays: Vec::new(),
        }
    }

    /// Echo each message back, delaying the ones listed.
    pub fn echoing(delays: &[(&str, Duration)]) -> Self {
        let mut chat = Self::replying("");
        chat.echo = true;
        chat.delays = delays
            .iter()
            .map(|(text, delay)| (text.to_string(), *delay))
            .collect();
        chat
    }

    pub fn signed_out(self) -> Self {
        self.signed_in.store(false, Ordering::SeqCst);
        self
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn is_signed_in(&self) -> anyhow::Result<bool> {
        Ok(self.signed_in.load(Ordering::SeqCst))
    }

    async fn init(&self) -> anyhow::Result<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            anyhow::bail!("sign-in window closed");
        }
        self.signed_in.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn send_message(&self, text: &str) -> anyhow::Result<String> {
        self.sent.lock().unwrap().push(text.to_string());
        if self.fail_send {
            anyhow::bail!("conversation request failed");
        }
        if let Some((_, delay)) = self.delays.iter().find(|(slow, _)| slow == text) {
            tokio::time::sleep(*delay).await;
        }
        if self.echo {
            return Ok(format!("reply to {text}"));
        }
        Ok(self.reply.clone())
    }
}

pub fn extension_root() -> PathBuf {
    PathBuf::from("/ext/chatpanel")
}
