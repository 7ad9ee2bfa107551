pub mod config;
pub mod persistence;
pub mod session;

pub use config::ConfigFile;
pub use persistence::Persistable;
pub use session::SessionState;
