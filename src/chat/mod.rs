// ABOUTME: Chat module: the chat client seam and its external-tool implementation.
// ABOUTME: Sign-in and conversation state stay inside the client.

pub mod client;
pub mod provider;
pub mod sidecar;

pub use client::{ChatClient, ensure_signed_in};
pub use provider::create_client;
pub use sidecar::{ConversationRef, SidecarChatClient};
