use async_trait::async_trait;

/// Yes/no prompt for destructive commands (retract, delete).
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}
