// ABOUTME: Configuration loading for chatpanel.
// ABOUTME: Reads ~/.chatpanel/config.toml and environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable that overrides `chat.command`.
pub const CHAT_COMMAND_ENV: &str = "CHATPANEL_CHAT_COMMAND";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub panel: PanelConfig,
    pub chat: ChatConfig,
}

/// Panel rendering and prompting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Bundled panel script, relative to the extension root.
    pub script_path: PathBuf,
    /// Prompt shown in the input box of the ask command.
    pub input_prompt: String,
    /// Canned prompts rendered as buttons in the panel.
    pub presets: Vec<PresetPrompt>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            script_path: PathBuf::from("media").join("main.js"),
            input_prompt: "What do you want to do?".to_string(),
            presets: vec![
                PresetPrompt::new("Explain code", "Explain what this code does."),
                PresetPrompt::new("Fix bugs", "Find and fix the bugs in this code."),
            ],
        }
    }
}

/// A button in the panel that submits a fixed prompt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PresetPrompt {
    pub label: String,
    pub prompt: String,
}

impl PresetPrompt {
    pub fn new(label: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            prompt: prompt.into(),
        }
    }
}

/// External chat tool configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Executable of the chat tool.
    pub command: String,
    /// Arguments placed before every subcommand.
    pub args: Vec<String>,
    /// Run the interactive sign-in without a visible browser.
    pub headless: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            command: "chatgpt".to_string(),
            args: Vec::new(),
            headless: false,
        }
    }
}

impl Config {
    /// Load config from ~/.chatpanel/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment overrides through the given lookup.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(command) = lookup(CHAT_COMMAND_ENV).filter(|s| !s.is_empty()) {
            self.chat.command = command;
        }
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chatpanel")
            .join("config.toml")
    }
}
