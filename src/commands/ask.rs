use async_trait::async_trait;

use super::{Command, CommandResult, Session, run_question};

pub struct AskCommand;

#[async_trait]
impl Command for AskCommand {
    fn name(&self) -> &str {
        "/ask"
    }

    fn usage(&self) -> &str {
        "<question>"
    }

    fn description(&self) -> &str {
        "ask a question about the uploaded file (plain text works too)"
    }

    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult {
        run_question(session, args).await;
        CommandResult::Handled
    }
}
