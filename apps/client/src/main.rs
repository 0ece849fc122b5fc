use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod clipboard;
mod engine;
mod shell;

use engine::LoopbackMediaEngine;
use meeting_api_cell::MeetingApiClient;
use meeting_session_cell::MediaEngine;
use shared_config::AppConfig;
use shell::{AppShell, ShellError};

const HELP: &str = "\
commands:
  create <user-id>              create a meeting as host
  join <user-id> <meeting-id>   join an existing meeting
  start                         join the call (camera + microphone)
  share | stopshare             content share controls
  copy                          copy the meeting id to the clipboard
  leave                         leave the meeting
  quit";

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting meeting client");

    let config = Arc::new(AppConfig::from_env());
    let api = Arc::new(MeetingApiClient::new(&config));
    let engine: Arc<dyn MediaEngine> = Arc::new(LoopbackMediaEngine::new());
    let mut shell = AppShell::new(config, api, engine);

    println!("{}", HELP);
    println!("{}", shell.screen().render());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some(command) => command,
            None => continue,
        };

        match command {
            "create" => {
                shell.set_create_user_id(parts.next().unwrap_or_default());
                report(shell.create_meeting().await);
            }
            "join" => {
                shell.set_join_user_id(parts.next().unwrap_or_default());
                shell.set_join_meeting_id(parts.next().unwrap_or_default());
                report(shell.join_meeting().await);
            }
            "start" => report(shell.start_meeting().await),
            "share" => report(shell.start_content_share().await),
            "stopshare" => shell.stop_content_share().await,
            "copy" => {
                if shell.copy_meeting_id() {
                    println!("meeting id copied to clipboard");
                } else if let Some(meeting_id) = shell.meeting_id() {
                    println!("clipboard unavailable, meeting id: {}", meeting_id);
                } else {
                    println!("no meeting to copy");
                }
            }
            "leave" => shell.leave_meeting().await,
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            other => println!("unknown command '{}', try 'help'", other),
        }

        shell.process_events();
        println!("{}", shell.screen().render());
    }

    // Always tear down before exiting; a no-op when nothing is active.
    shell.leave_meeting().await;
    info!("Meeting client stopped");
    Ok(())
}

fn report(result: Result<(), ShellError>) {
    if let Err(e) = result {
        warn!("{}", e);
        println!("error: {}", e);
    }
}
