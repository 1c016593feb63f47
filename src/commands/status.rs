use async_trait::async_trait;

use super::{Command, CommandResult, Session};
use crate::consts::format_bytes;
use crate::workflow::Controller;

pub struct StatusCommand;

#[async_trait]
impl Command for StatusCommand {
    fn name(&self) -> &str {
        "/status"
    }

    fn description(&self) -> &str {
        "show the selected file, upload, and last answer"
    }

    async fn execute(&self, _args: &str, session: &mut Session) -> CommandResult {
        println!("  server    {}", session.server_url);
        print!("{}", status_text(&session.controller));
        CommandResult::Handled
    }
}

fn status_text(c: &Controller) -> String {
    let selected = match c.selected_file() {
        Some(f) => format!("{} ({})", f.name, format_bytes(f.len())),
        None => "—".to_string(),
    };
    let mut out = format!(
        "  status    {}\n  file      {}\n  uploaded  {}\n",
        c.status(),
        selected,
        c.stored_file().unwrap_or("—"),
    );
    if !c.question().is_empty() {
        out.push_str(&format!("  question  {}\n", c.question()));
    }
    if let Some(answer) = c.answer() {
        out.push_str(&format!("  answer    {answer}\n"));
    }
    if let Some(err) = c.error_message() {
        out.push_str(&format!("  error     {err}\n"));
    }
    out
}
