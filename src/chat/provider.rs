// ABOUTME: Chat client factory: creates the configured chat client.
// ABOUTME: The external chat tool is reached through the sidecar client.

use std::sync::Arc;

use crate::chat::{ChatClient, SidecarChatClient};
use crate::config::ChatConfig;

/// Create a chat client from config.
pub fn create_client(config: &ChatConfig) -> anyhow::Result<Arc<dyn ChatClient>> {
    if config.command.trim().is_empty() {
        anyhow::bail!("No chat command configured. Set chat.command or CHATPANEL_CHAT_COMMAND");
    }
    Ok(Arc::new(SidecarChatClient::new(config)))
}
