pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{ApiConfig, Config, DisplayConfig, LoggingConfig, WishlistConfig, DEFAULT_WISHLIST_KEY};
pub use credentials::{CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, home_override};
