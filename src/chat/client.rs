// ABOUTME: Chat client seam: the three operations the controller needs from a chat backend.
// ABOUTME: Sign-in check, interactive sign-in, and a single message round trip.

use async_trait::async_trait;

/// An authenticated conversational backend.
///
/// Implementations own their session: sign-in state and conversation
/// continuity live behind `&self`.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn is_signed_in(&self) -> anyhow::Result<bool>;

    /// Interactive sign-in. May open a browser-like UI.
    async fn init(&self) -> anyhow::Result<()>;

    async fn send_message(&self, text: &str) -> anyhow::Result<String>;
}

/// Run the interactive sign-in only when the client reports it is signed out.
pub async fn ensure_signed_in(client: &dyn ChatClient) -> anyhow::Result<()> {
    if !client.is_signed_in().await? {
        tracing::info!("chat client signed out, starting interactive sign-in");
        client.init().await?;
    }
    Ok(())
}
