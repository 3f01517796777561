//! Chatlink terminal client — a conversation view over the reply backend.

mod app_state;
mod tui;
mod ui;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chatlink_models::{Message, Participant, Role};
use chatlink_sdk::{
    CannedReplySource, ConversationController, HttpReplySource, ReplySource,
};
use clap::Parser;
use tokio::sync::mpsc;

use crate::app_state::AppController;
use crate::ui::chat::ChatApp;

/// Terminal chat client for the chatlink reply backend.
#[derive(Parser, Debug)]
#[command(name = "chatlink", about = "Terminal chat client for the chatlink reply backend")]
struct Args {
    /// Backend base URL. Falls back to CHATLINK_ENDPOINT, then localhost.
    #[arg(long)]
    endpoint: Option<String>,

    /// Answer from local canned replies instead of the backend.
    #[arg(long)]
    offline: bool,

    /// Display name for the bot participant.
    #[arg(long, default_value = "Bot")]
    bot_name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise structured logging (controlled via RUST_LOG env var).
    // Logs go to stderr; the TUI owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let endpoint = args.endpoint.clone().unwrap_or_else(|| {
        std::env::var("CHATLINK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:5000".to_string())
    });

    let (reply_tx, reply_rx) = mpsc::unbounded_channel();
    let bot = Participant::named(Role::Bot, &args.bot_name);

    let (controller, info_line) = if args.offline {
        let source: Arc<dyn ReplySource> = Arc::new(
            CannedReplySource::new("Tell me more.")
                .with_reply("hello", "Hello my friend")
                .with_reply("hey", "Hello my friend")
                .with_reply("bye", "See you around"),
        );
        let greeting = Message::new("Hello my friend", bot.clone())?;
        let controller = ConversationController::new(Some(source), reply_tx)
            .with_reply_delay(Duration::ZERO)
            .with_bot(bot)
            .with_greeting(greeting);
        (controller, "canned replies (offline)".to_string())
    } else {
        let source: Arc<dyn ReplySource> = Arc::new(HttpReplySource::new(&endpoint));
        let controller = ConversationController::new(Some(source), reply_tx)
            .with_bot(bot)
            .with_avatars("./User.png".into(), "/Bot.png".into());
        (controller, endpoint)
    };

    tracing::info!(source = %info_line, "starting chatlink session");

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, controller, &info_line, reply_rx).await;
    tui::restore()?;
    result
}

async fn run(
    terminal: &mut tui::Tui,
    controller: ConversationController,
    info_line: &str,
    reply_rx: mpsc::UnboundedReceiver<chatlink_sdk::ReplyOutcome>,
) -> Result<()> {
    let mut events = tui::EventHandler::new(250);
    events.forward_outcomes(reply_rx);

    let mut app = ChatApp::new(controller, info_line);
    while !app.should_quit() {
        terminal.draw(|f| app.render(f))?;
        let Some(action) = events.next_async().await else {
            break;
        };
        app.update(action);
    }
    Ok(())
}
