use async_trait::async_trait;

use super::{Command, CommandResult, Session};

/// Listed like any other command; [`CommandRegistry::dispatch`](super::CommandRegistry::dispatch)
/// prints the help text itself since only the registry knows every command.
pub struct HelpCommand;

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "/help"
    }

    fn aliases(&self) -> &[&str] {
        &["/h", "/?"]
    }

    fn description(&self) -> &str {
        "show this help"
    }

    async fn execute(&self, _args: &str, _session: &mut Session) -> CommandResult {
        CommandResult::Handled
    }
}
