//! Persistent user configuration stored as TOML in the platform config dir.

pub mod data;
pub mod defaults;
pub mod io;


pub use data::Config;
pub use io::ConfigError;
