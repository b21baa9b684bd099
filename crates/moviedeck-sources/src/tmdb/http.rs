use crate::error::CatalogError;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("moviedeck/", env!("CARGO_PKG_VERSION"));

/// reqwest client shared by every catalog request
pub fn create_tmdb_client(timeout: Duration) -> Result<Client, CatalogError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(CatalogError::Client)
}
