//! REPL commands prefixed with `/`.
//!
//! Commands implement the [`Command`] trait and are registered in a
//! [`CommandRegistry`], which handles dispatch, alias resolution, and help
//! generation. Lines that are not commands are questions; the REPL hands
//! them to [`run_question`].

mod ask;
mod help;
mod open;
mod quit;
mod reset;
mod server;
mod status;
mod upload;

pub use open::load_file;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::service::DocumentService;
use crate::spinner::Spinner;
use crate::workflow::Controller;

/// Everything a command may read or change.
pub struct Session {
    pub controller: Controller,
    pub service: Arc<dyn DocumentService>,
    pub server_url: String,
    pub config: Config,
    /// Request timeout applied when `/server` builds a new client.
    pub timeout: Option<Duration>,
}

impl Session {
    pub fn new(
        service: Arc<dyn DocumentService>,
        server_url: String,
        config: Config,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            controller: Controller::new(),
            service,
            server_url,
            config,
            timeout,
        }
    }
}

/// What the REPL should do after a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// Not a command, so the line is a question.
    NotACommand,
    /// Command handled, continue the REPL loop.
    Handled,
    /// Exit the REPL.
    Quit,
}

/// A REPL command. Implement this trait to add new commands.
#[async_trait]
pub trait Command: Send + Sync {
    /// Primary name, e.g. `"/open"`.
    fn name(&self) -> &str;

    /// Alternative names, e.g. `&["/h", "/?"]`.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Argument hint for `/help`, e.g. `"<path>"`.
    fn usage(&self) -> &str {
        ""
    }

    /// One-line description for `/help`.
    fn description(&self) -> &str;

    /// Run the command with whatever followed its name on the line.
    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult;
}

pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a registry with all built-in commands.
    pub fn new() -> Self {
        let commands: Vec<Arc<dyn Command>> = vec![
            Arc::new(help::HelpCommand),
            Arc::new(open::OpenCommand),
            Arc::new(upload::UploadCommand),
            Arc::new(ask::AskCommand),
            Arc::new(status::StatusCommand),
            Arc::new(server::ServerCommand),
            Arc::new(reset::ResetCommand),
            Arc::new(quit::QuitCommand),
        ];
        Self { commands }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Dispatch input to a matching command, or return `NotACommand`.
    pub async fn dispatch(&self, input: &str, session: &mut Session) -> CommandResult {
        let input = input.trim();
        let (cmd, args) = split_command(input);

        // Bare-word aliases like `quit` only match a line on their own, so
        // a question that happens to start with one still gets asked.
        if !cmd.starts_with('/') && !args.is_empty() {
            return CommandResult::NotACommand;
        }

        for command in &self.commands {
            if cmd == command.name() || command.aliases().contains(&cmd) {
                // /help needs the registry to list all commands
                if command.name() == "/help" {
                    print!("{}", self.help_text());
                    return CommandResult::Handled;
                }
                return command.execute(args, session).await;
            }
        }

        if cmd.starts_with('/') {
            println!("unknown command: {cmd}");
            println!("type /help for available commands");
            return CommandResult::Handled;
        }

        CommandResult::NotACommand
    }

    /// Generate help text from all registered commands.
    pub fn help_text(&self) -> String {
        let entries: Vec<(String, &str)> = self
            .commands
            .iter()
            .map(|c| (format_label(c.name(), c.usage(), c.aliases()), c.description()))
            .collect();

        let max_width = entries
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(10);

        let mut out = String::new();
        for (label, desc) in &entries {
            out.push_str(&format!("  {label:<max_width$}  {desc}\n"));
        }
        out
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// All registered names and aliases (for duplicate detection).
    pub fn all_triggers(&self) -> Vec<&str> {
        let mut triggers = Vec::new();
        for cmd in &self.commands {
            triggers.push(cmd.name());
            triggers.extend_from_slice(cmd.aliases());
        }
        triggers
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the upload leaf for the selected file. Ctrl+C abandons the request.
pub async fn run_upload(session: &mut Session) -> bool {
    let ticket = match session.controller.begin_upload() {
        Ok(ticket) => ticket,
        Err(e) => {
            eprintln!("  ✗ {e}");
            return false;
        }
    };

    let service = Arc::clone(&session.service);
    let spinner = Spinner::start(&format!("uploading {}", ticket.file().name));
    let result = tokio::select! {
        result = service.store(ticket.file()) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };
    spinner.stop().await;

    let Some(result) = result else {
        session.controller.cancel_upload(ticket);
        println!("  upload interrupted");
        return false;
    };

    match session.controller.complete_upload(ticket, result) {
        Ok(_) => {
            if let Some(file_ref) = session.controller.stored_file() {
                println!("  ✓ uploaded as {file_ref}");
            }
            true
        }
        Err(e) => {
            eprintln!("  ✗ {e}");
            false
        }
    }
}

/// Ask `question` about the stored file. Ctrl+C abandons the request.
pub async fn run_question(session: &mut Session, question: &str) -> bool {
    session.controller.set_question(question.trim());
    let ticket = match session.controller.begin_ask() {
        Ok(ticket) => ticket,
        Err(e) => {
            eprintln!("  ✗ {e}");
            return false;
        }
    };

    let service = Arc::clone(&session.service);
    let spinner = Spinner::start("asking");
    let result = tokio::select! {
        result = service.query(ticket.file_ref(), ticket.question()) => Some(result),
        _ = tokio::signal::ctrl_c() => None,
    };
    spinner.stop().await;

    let Some(result) = result else {
        session.controller.cancel_ask(ticket);
        println!("  question interrupted");
        return false;
    };

    match session.controller.complete_ask(ticket, result) {
        Ok(_) => {
            if let Some(answer) = session.controller.answer() {
                println!("\n=> {answer}");
            }
            true
        }
        Err(e) => {
            eprintln!("  ✗ {e}");
            false
        }
    }
}

fn split_command(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    }
}

fn format_label(name: &str, usage: &str, aliases: &[&str]) -> String {
    let mut label = name.to_string();
    if !usage.is_empty() {
        label.push(' ');
        label.push_str(usage);
    }
    if !aliases.is_empty() {
        label.push_str(&format!(" ({})", aliases.join(", ")));
    }
    label
}
