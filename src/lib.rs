//! Preview echo service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod previews;

pub use config::schema::EchoConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use previews::PreviewStore;
