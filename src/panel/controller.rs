// ABOUTME: Panel controller: owns the chat panel slot and routes messages between panel and chat client.
// ABOUTME: Composes requests from editor context and posts responses back into the panel.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{RwLock, mpsc};
use tokio::task::{JoinHandle, JoinSet};

use crate::chat::{ChatClient, ensure_signed_in};
use crate::config::PanelConfig;
use crate::host::{EditorHost, PanelView, WebviewOptions};
use crate::panel::html::render_panel_html;
use crate::prompt::compose_request;
use crate::protocol::{OutboundMessage, PanelMessage};
use crate::snippet::escape_snippet_dollars;

/// View type under which the panel provider is registered.
pub const VIEW_TYPE: &str = "chatgpt.chatView";

/// Capacity of the inbound panel message channel.
const INBOX_CAPACITY: usize = 32;

/// Handle to the message pump started by [`PanelController::resolve_view`].
///
/// The pump runs until every sender is dropped, then waits for in-flight
/// messages to finish.
pub struct PanelSubscription {
    pub sender: mpsc::Sender<Value>,
    pub task: JoinHandle<()>,
}

impl PanelSubscription {
    /// Drop this sender and wait for the pump to drain.
    pub async fn close(self) {
        drop(self.sender);
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "panel message pump failed");
        }
    }
}

/// Mediates between the panel, the host editor, and the chat client.
pub struct PanelController {
    extension_root: PathBuf,
    config: PanelConfig,
    host: Arc<dyn EditorHost>,
    chat: Arc<dyn ChatClient>,
    view: RwLock<Option<Arc<dyn PanelView>>>,
}

impl PanelController {
    pub fn new(
        extension_root: PathBuf,
        config: PanelConfig,
        host: Arc<dyn EditorHost>,
        chat: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            extension_root,
            config,
            host,
            chat,
            view: RwLock::new(None),
        }
    }

    /// The resolved panel, if the host has created one.
    pub async fn view(&self) -> Option<Arc<dyn PanelView>> {
        self.view.read().await.clone()
    }

    /// Set up a freshly created panel and start listening to its messages.
    ///
    /// Scripts are enabled but restricted to the extension root. Messages sent
    /// on the returned subscription are dispatched to [`Self::handle_message`].
    pub async fn resolve_view(self: &Arc<Self>, view: Arc<dyn PanelView>) -> PanelSubscription {
        view.set_options(WebviewOptions {
            enable_scripts: true,
            local_resource_roots: vec![self.extension_root.clone()],
        });

        let script_uri = view.as_webview_uri(&self.extension_root.join(&self.config.script_path));
        view.set_html(render_panel_html(&script_uri, &self.config.presets));

        *self.view.write().await = Some(view);
        tracing::debug!(view_type = VIEW_TYPE, "panel resolved");

        let (sender, receiver) = mpsc::channel(INBOX_CAPACITY);
        let task = tokio::spawn(Arc::clone(self).run_message_pump(receiver));
        PanelSubscription { sender, task }
    }

    /// Dispatch inbound panel messages until the channel closes.
    ///
    /// Each message runs in its own task, so a slow search never blocks the
    /// next message. Failures go to the host's error surface.
    pub async fn run_message_pump(self: Arc<Self>, mut receiver: mpsc::Receiver<Value>) {
        let mut in_flight = JoinSet::new();

        while let Some(raw) = receiver.recv().await {
            let controller = Arc::clone(&self);
            in_flight.spawn(async move {
                if let Err(e) = controller.handle_message(&raw).await {
                    controller.report_failure(&e).await;
                }
            });
            while let Some(done) = in_flight.try_join_next() {
                log_join_failure(done);
            }
        }

        while let Some(done) = in_flight.join_next().await {
            log_join_failure(done);
        }
    }

    /// Handle one raw panel message.
    pub async fn handle_message(&self, raw: &Value) -> anyhow::Result<()> {
        match PanelMessage::from_value(raw) {
            PanelMessage::CodeSelected(code) => {
                let snippet = escape_snippet_dollars(&code);
                self.host.insert_snippet(&snippet).await
            }
            PanelMessage::Prompt(prompt) => self.search(&prompt).await,
            PanelMessage::Unrecognized { kind } => {
                tracing::debug!(kind = ?kind, "ignoring unrecognized panel message");
                Ok(())
            }
        }
    }

    /// Send a prompt, with editor context, to the chat client and show the reply.
    ///
    /// Signs in first when needed. Sign-in and send failures propagate.
    pub async fn search(&self, prompt: &str) -> anyhow::Result<()> {
        ensure_signed_in(self.chat.as_ref()).await?;

        let editor = self.host.active_editor().await;
        let request = compose_request(prompt, editor.as_ref());
        tracing::debug!(
            has_editor = editor.is_some(),
            request_len = request.len(),
            "sending prompt"
        );

        let response = self.chat.send_message(&request).await?;
        self.post(OutboundMessage::AddResponse(response)).await;
        Ok(())
    }

    /// Post into the panel, revealing it first when hidden.
    async fn post(&self, message: OutboundMessage) {
        let Some(view) = self.view().await else {
            tracing::debug!("no panel resolved, dropping message");
            return;
        };

        if !view.is_visible() {
            view.show(true);
        }
        if !view.post_message(message).await {
            tracing::warn!("panel rejected posted message");
        }
    }

    /// Surface a failed message or command to the user.
    pub async fn report_failure(&self, error: &anyhow::Error) {
        let message = format!("{error:#}");
        tracing::error!(error = %message, "panel request failed");
        self.host.show_error_message(&message).await;
    }
}

fn log_join_failure(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        tracing::error!(error = %e, "panel message task failed");
    }
}
