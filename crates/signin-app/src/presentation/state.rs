use std::sync::Arc;

use crate::application::commands::handlers::RecordSignInCommandHandler;
use crate::application::queries::SignInStreakQueries;
use signin_domain::sign_in::SignInBitmapStore;

/// Handlers and queries wired to one bitmap store
pub struct AppState {
    pub record_sign_in_handler: RecordSignInCommandHandler,
    pub streak_queries: SignInStreakQueries,
}

impl AppState {
    pub fn new(store: Arc<dyn SignInBitmapStore>) -> Self {
        Self {
            record_sign_in_handler: RecordSignInCommandHandler::new(store.clone()),
            streak_queries: SignInStreakQueries::new(store),
        }
    }
}
