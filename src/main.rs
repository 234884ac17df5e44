// Keyi - Conversational support chat service
// Main entry point

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use keyi::config::load_config;
use keyi::providers::create_gateway;
use keyi::server::ChatServer;
use keyi::service::{ChatPolicy, ConversationService};
use keyi::session::MemoryStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keyi")]
#[command(about = "Conversational support chat service", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the HTTP chat server
    Serve {
        /// Bind address, overrides the config file
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("keyi=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config()?;

    let bind_address = match args.command {
        Some(Command::Serve { bind: Some(bind) }) => bind,
        _ => config.server.bind_address.clone(),
    };

    let gateway = create_gateway(&config.providers);
    let policy = ChatPolicy {
        system_prompt: config.system_prompt.clone(),
        max_context_turns: config.max_context_turns,
        persist_crisis_reply: config.persist_crisis_reply,
    };

    let service = Arc::new(ConversationService::new(
        Arc::new(MemoryStore::new()),
        gateway,
        policy,
    ));

    ChatServer::new(service, bind_address).serve().await
}
