//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → Router::from_config / server wiring
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the router is frozen after BUILD
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AccessLogConfig, NotFoundConfig, ObservabilityConfig, RouterConfig, ServerConfig};
pub use validation::ValidationError;
