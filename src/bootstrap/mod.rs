pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, load_config_or_empty};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{resolve_data_dir, wire_dependencies, Wired, WiringError};
