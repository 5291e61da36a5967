//! Configuration types module

pub mod app;
pub mod logging;
pub mod policy;
pub mod server;
pub mod sessions;
pub mod upstream;

// Re-export main types
pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use policy::PolicyConfig;
pub use server::ServerConfig;
pub use sessions::SessionConfig;
pub use upstream::UpstreamConfig;
