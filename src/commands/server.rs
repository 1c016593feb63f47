use async_trait::async_trait;
use std::sync::Arc;

use super::{Command, CommandResult, Session};
use crate::consts::{DEFAULT_SERVER_URL, SERVER_URL_KEY};
use crate::service::http::HttpDocumentService;

pub struct ServerCommand;

#[async_trait]
impl Command for ServerCommand {
    fn name(&self) -> &str {
        "/server"
    }

    fn usage(&self) -> &str {
        "[url | --reset]"
    }

    fn description(&self) -> &str {
        "show or change the document server (starts a new session)"
    }

    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult {
        if args.is_empty() {
            println!("  server    {}", session.server_url);
            return CommandResult::Handled;
        }

        if args == "--reset" {
            if let Err(e) = session.config.remove(SERVER_URL_KEY) {
                eprintln!("  ✗ failed to clear saved server: {e:#}");
                return CommandResult::Handled;
            }
            if switch_server(session, DEFAULT_SERVER_URL) {
                println!("  ✓ saved server cleared, using {}", session.server_url);
            }
            return CommandResult::Handled;
        }

        if !is_http_url(args) {
            eprintln!("  ✗ expected an http:// or https:// URL, got {args}");
            return CommandResult::Handled;
        }

        if !switch_server(session, args) {
            return CommandResult::Handled;
        }
        if let Err(e) = session.config.set(SERVER_URL_KEY, &session.server_url) {
            eprintln!("  ✗ failed to save server: {e:#}");
            return CommandResult::Handled;
        }

        println!("  ✓ server set to {}", session.server_url);
        CommandResult::Handled
    }
}

/// Point the session at `url` with a fresh client and workflow.
fn switch_server(session: &mut Session, url: &str) -> bool {
    let service = match HttpDocumentService::new(url, session.timeout) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("  ✗ failed to build client: {e}");
            return false;
        }
    };

    session.server_url = service.base_url().to_string();
    session.service = Arc::new(service);
    // A stored file ref only means something to the server that issued it
    session.controller.reset();
    true
}

fn is_http_url(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
