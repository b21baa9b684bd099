pub mod api;
pub mod client;
pub mod http;

pub use api::ApiEndpoint;
pub use client::TmdbClient;
