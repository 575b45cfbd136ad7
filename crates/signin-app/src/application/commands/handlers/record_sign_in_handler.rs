use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::sign_in_commands::*;
use signin_domain::shared::{DomainError, UserId};
use signin_domain::sign_in::{SignInBitmapStore, SignInDate, SignInEncoder, StorageKey};

/// Record sign-in command handler
pub struct RecordSignInCommandHandler {
    encoder: SignInEncoder,
}

impl RecordSignInCommandHandler {
    pub fn new(store: Arc<dyn SignInBitmapStore>) -> Self {
        Self {
            encoder: SignInEncoder::new(store),
        }
    }
}

#[async_trait]
impl CommandHandler<RecordSignInCommand> for RecordSignInCommandHandler {
    type Result = RecordSignInResult;

    async fn handle(&self, cmd: RecordSignInCommand) -> Result<Self::Result, DomainError> {
        info!(
            "Handling RecordSignInCommand for user: {} on {:04}-{:02}-{:02}",
            cmd.user_id, cmd.year, cmd.month, cmd.day
        );

        // Validate everything before touching the store
        let user_id = UserId::parse(&cmd.user_id)?;
        let date = SignInDate::new(cmd.year, cmd.month, cmd.day)?;

        self.encoder.record_sign_in(&user_id, &date).await?;

        Ok(RecordSignInResult {
            user_id: user_id.to_string(),
            date: date.to_string(),
            storage_key: StorageKey::derive(&user_id, &date.month()).to_string(),
        })
    }
}
