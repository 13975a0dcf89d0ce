use std::sync::Arc;

use crate::{config::Config, storage::Storage};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn Storage> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
