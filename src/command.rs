// ABOUTME: The ask command: prompts for free text and forwards it to the panel controller.
// ABOUTME: A cancelled input box is sent as an empty prompt.

use crate::host::EditorHost;
use crate::panel::PanelController;

/// Identifier of the ask command.
pub const ASK_COMMAND_ID: &str = "chatgpt.ask";

/// Run the ask command: show the input box, then search with whatever came back.
pub async fn run_ask_command(
    host: &dyn EditorHost,
    controller: &PanelController,
    input_prompt: &str,
) -> anyhow::Result<()> {
    let value = host.show_input_box(input_prompt).await;
    if value.is_none() {
        tracing::debug!("input box cancelled");
    }
    controller.search(&value.unwrap_or_default()).await
}
