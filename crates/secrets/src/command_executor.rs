use async_trait::async_trait;
use envgen_core::{Error, Result};
use std::process::Output;

/// Runs an external program and captures its output
///
/// Secret backends shell out through this seam so tests can script the
/// command output instead of spawning processes.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, cmd: &str, args: &[String]) -> Result<Output>;
}

/// Spawns real processes
///
/// The child is killed if the fetch future is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

#[async_trait]
impl CommandExecutor for SystemCommandExecutor {
    async fn execute(&self, cmd: &str, args: &[String]) -> Result<Output> {
        tokio::process::Command::new(cmd)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                Error::command_execution(cmd, args.to_vec(), format!("failed to spawn: {e}"), None)
            })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_system_executor_reports_spawn_failure() {
        let executor = SystemCommandExecutor;
        let result = executor
            .execute("envgen-definitely-not-a-command", &[])
            .await;
        assert!(matches!(result, Err(Error::CommandExecution { .. })));
    }
}
