use std::sync::Arc;

use crate::{Res, api::AppState, config::Config, server::start_api_server};

/// Runs the HTTP service on `address`, or on `SERVER_ADDRESS` when not given.
pub async fn serve(config: &Config, address: Option<String>) -> Res<()> {
    let address = address.unwrap_or_else(|| config.server_address.clone());
    let state = Arc::new(AppState::from_config(config)?);
    start_api_server(state, &address).await
}
