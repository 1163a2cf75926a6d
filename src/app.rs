// ABOUTME: Extension activation: wires the panel controller and the ask command into the host.
// ABOUTME: Registers the webview provider and command, then dispatches command invocations.

use std::path::PathBuf;
use std::sync::Arc;

use crate::chat::ChatClient;
use crate::command::{ASK_COMMAND_ID, run_ask_command};
use crate::config::Config;
use crate::host::{EditorHost, PanelView};
use crate::panel::{PanelController, PanelSubscription, VIEW_TYPE};

/// An activated extension. State lives until deactivation.
pub struct Extension {
    host: Arc<dyn EditorHost>,
    controller: Arc<PanelController>,
    input_prompt: String,
}

impl Extension {
    /// Create the panel controller and register the provider and command with the host.
    pub fn activate(
        host: Arc<dyn EditorHost>,
        chat: Arc<dyn ChatClient>,
        config: &Config,
        extension_root: PathBuf,
    ) -> anyhow::Result<Self> {
        let controller = Arc::new(PanelController::new(
            extension_root,
            config.panel.clone(),
            Arc::clone(&host),
            chat,
        ));

        host.register_webview_provider(VIEW_TYPE)?;
        host.register_command(ASK_COMMAND_ID)?;
        tracing::info!(view_type = VIEW_TYPE, command = ASK_COMMAND_ID, "extension activated");

        Ok(Self {
            host,
            controller,
            input_prompt: config.panel.input_prompt.clone(),
        })
    }

    pub fn controller(&self) -> &Arc<PanelController> {
        &self.controller
    }

    /// Called by the host once it has created the panel surface.
    pub async fn resolve_view(&self, view: Arc<dyn PanelView>) -> PanelSubscription {
        self.controller.resolve_view(view).await
    }

    /// Run a registered command by id.
    pub async fn execute_command(&self, command_id: &str) -> anyhow::Result<()> {
        match command_id {
            ASK_COMMAND_ID => {
                run_ask_command(self.host.as_ref(), &self.controller, &self.input_prompt).await
            }
            other => anyhow::bail!("Unknown command: '{}'", other),
        }
    }

    pub fn deactivate(self) {
        tracing::debug!("extension deactivated");
    }
}
