use async_trait::async_trait;

use super::open::{open_into, resolve_path};
use super::{Command, CommandResult, Session, run_upload};

pub struct UploadCommand;

#[async_trait]
impl Command for UploadCommand {
    fn name(&self) -> &str {
        "/upload"
    }

    fn aliases(&self) -> &[&str] {
        &["/up"]
    }

    fn usage(&self) -> &str {
        "[path]"
    }

    fn description(&self) -> &str {
        "upload the selected file (or open and upload <path>)"
    }

    async fn execute(&self, args: &str, session: &mut Session) -> CommandResult {
        if !args.is_empty() && !open_into(&resolve_path(args), session).await {
            return CommandResult::Handled;
        }
        run_upload(session).await;
        CommandResult::Handled
    }
}
