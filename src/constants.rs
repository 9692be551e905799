//! Application constants
//!
//! Centralized location for base URLs and configuration defaults.

/// Base URL of the Rick and Morty character API
pub const DEFAULT_CHARACTER_API_URL: &str = "https://rickandmortyapi.com/api";

/// Base URL of the Fake Store product API
pub const DEFAULT_STORE_API_URL: &str = "https://fakestoreapi.com";

/// Page-size hint sent with the product list request
pub const DEFAULT_PRODUCT_LIMIT: usize = 10;

/// HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Directory under $HOME holding the config file
pub const CONFIG_DIR_NAME: &str = ".lookout";

/// Config file name inside the config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file written next to the working directory
pub const LOG_FILE_NAME: &str = "lookout.log";

/// Application name
pub const APP_NAME: &str = "Lookout TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
