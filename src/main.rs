// ABOUTME: Entry point for chatpanel: hosts the chat panel extension in a terminal.
// ABOUTME: Parses CLI args, loads config, activates the extension, and drives one of the run modes.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use chatpanel::app::Extension;
use chatpanel::chat;
use chatpanel::command::ASK_COMMAND_ID;
use chatpanel::config::Config;
use chatpanel::host::PanelView;
use chatpanel::panel::render_panel_html;
use chatpanel::terminal::{LineRange, TerminalHost, TerminalPanel};

#[derive(Debug, Parser)]
#[command(name = "chatpanel", about = "Ask a chat assistant about the code you're editing")]
struct Cli {
    /// Directory holding the bundled panel resources.
    #[arg(long, global = true, default_value = ".")]
    extension_root: PathBuf,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Run the ask command once.
    Ask {
        #[command(flatten)]
        document: DocumentArgs,
        /// Prompt text. Read from stdin when omitted.
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Read panel messages as JSON lines from stdin.
    Panel {
        #[command(flatten)]
        document: DocumentArgs,
    },
    /// Print the panel HTML.
    Html,
}

#[derive(Debug, clap::Args)]
struct DocumentArgs {
    /// File to treat as the active document.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Selected lines, as START:END (1-based, inclusive).
    #[arg(long, requires = "file")]
    selection: Option<LineRange>,
}

impl DocumentArgs {
    fn host(&self) -> anyhow::Result<TerminalHost> {
        match &self.file {
            Some(path) => TerminalHost::open(path, self.selection),
            None => Ok(TerminalHost::new(None)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("failed to load config")?;

    let (host, resolve_hidden) = match &cli.command {
        Mode::Ask { document, prompt } => (document.host()?.with_input(prompt.clone()), true),
        Mode::Panel { document } => (document.host()?, false),
        Mode::Html => {
            let panel = TerminalPanel::new(true);
            let script = cli.extension_root.join(&config.panel.script_path);
            let uri = panel.as_webview_uri(&script);
            println!("{}", render_panel_html(&uri, &config.panel.presets));
            return Ok(());
        }
    };

    let client = chat::create_client(&config.chat)?;
    let extension = Extension::activate(Arc::new(host), client, &config, cli.extension_root)?;
    let subscription = extension
        .resolve_view(Arc::new(TerminalPanel::new(!resolve_hidden)))
        .await;

    match cli.command {
        Mode::Ask { .. } => {
            let result = extension.execute_command(ASK_COMMAND_ID).await;
            subscription.close().await;
            result?;
        }
        Mode::Panel { .. } => {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<serde_json::Value>(&line) {
                    Ok(raw) => {
                        if subscription.sender.send(raw).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!(error = %e, "skipping malformed panel message"),
                }
            }
            subscription.close().await;
        }
        Mode::Html => {}
    }

    extension.deactivate();
    Ok(())
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
