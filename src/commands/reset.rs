use async_trait::async_trait;

use super::{Command, CommandResult, Session};

pub struct ResetCommand;

#[async_trait]
impl Command for ResetCommand {
    fn name(&self) -> &str {
        "/reset"
    }

    fn aliases(&self) -> &[&str] {
        &["/new"]
    }

    fn description(&self) -> &str {
        "forget the selected file, upload, and answer"
    }

    async fn execute(&self, _args: &str, session: &mut Session) -> CommandResult {
        session.controller.reset();
        println!("  ✓ session cleared");
        CommandResult::Handled
    }
}
