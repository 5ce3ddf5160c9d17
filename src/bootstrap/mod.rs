pub mod config;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config, ResolvedConfig};
pub use runtime::{AppRuntime, UseCases};
pub use wiring::wire_dependencies;
