// ABOUTME: Sidecar chat client: drives an external chat command-line tool through tokio::process.
// ABOUTME: Keeps the conversation reference between sends so prompts continue one conversation.

use std::process::Stdio;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::chat::ChatClient;
use crate::config::ChatConfig;

/// Where the next message continues an existing conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRef {
    pub conversation_id: String,
    pub parent_message_id: String,
}

/// Structured reply printed by the tool's `send` subcommand.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendReply {
    response: String,
    conversation_id: Option<String>,
    message_id: Option<String>,
}

/// Chat client that shells out to `<command> [args..] <status|login|send>`.
pub struct SidecarChatClient {
    command: String,
    args: Vec<String>,
    headless: bool,
    conversation: Mutex<Option<ConversationRef>>,
}

impl SidecarChatClient {
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            headless: config.headless,
            conversation: Mutex::new(None),
        }
    }

    /// Conversation the next send will continue, if any.
    pub async fn conversation(&self) -> Option<ConversationRef> {
        self.conversation.lock().await.clone()
    }

    fn command_for(&self, subcommand: &str) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args).arg(subcommand).kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl ChatClient for SidecarChatClient {
    async fn is_signed_in(&self) -> anyhow::Result<bool> {
        let status = self
            .command_for("status")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .with_context(|| format!("failed to run '{} status'", self.command))?;
        Ok(status.success())
    }

    async fn init(&self) -> anyhow::Result<()> {
        let mut cmd = self.command_for("login");
        if self.headless {
            cmd.arg("--headless");
        }
        // stdout is reserved for the host; the tool talks to the user on stderr.
        let status = cmd
            .stdin(Stdio::null())
            .stdout(std::io::stderr())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("failed to run '{} login'", self.command))?;
        if !status.success() {
            anyhow::bail!("'{} login' exited with {}", self.command, status);
        }
        Ok(())
    }

    async fn send_message(&self, text: &str) -> anyhow::Result<String> {
        let mut cmd = self.command_for("send");
        if let Some(conversation) = self.conversation().await {
            cmd.arg("--conversation-id")
                .arg(&conversation.conversation_id)
                .arg("--parent-message-id")
                .arg(&conversation.parent_message_id);
        }

        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to run '{} send'", self.command))?;

        let mut stdin = child
            .stdin
            .take()
            .context("chat tool stdin was not captured")?;
        if let Err(e) = stdin.write_all(text.as_bytes()).await {
            // The exit status and stderr below say more than a broken pipe.
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
        drop(stdin);

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "'{} send' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            );
        }

        let stdout = String::from_utf8(output.stdout).context("chat reply is not valid UTF-8")?;
        let (response, next) = parse_reply(&stdout);
        if let Some(next) = next {
            tracing::debug!(conversation_id = %next.conversation_id, "continuing conversation");
            *self.conversation.lock().await = Some(next);
        }
        Ok(response)
    }
}

/// Split the tool's stdout into response text and an optional conversation reference.
///
/// Anything that is not a JSON object with a `response` field is plain text.
fn parse_reply(stdout: &str) -> (String, Option<ConversationRef>) {
    let trimmed = stdout.trim_end_matches(['\r', '\n']);
    match serde_json::from_str::<SendReply>(trimmed) {
        Ok(reply) => {
            let next = match (reply.conversation_id, reply.message_id) {
                (Some(conversation_id), Some(parent_message_id)) => Some(ConversationRef {
                    conversation_id,
                    parent_message_id,
                }),
                _ => None,
            };
            (reply.response, next)
        }
        Err(_) => (trimmed.to_string(), None),
    }
}
