//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (attach request ID)
//!     → echo.rs / health.rs (build body)
//!     → response.rs (JSON rendering)
//!     → Send to client
//! ```

pub mod echo;
pub mod health;
pub mod request;
pub mod response;
pub mod server;

pub use echo::{EchoFailure, EchoResponse, ECHO_FAILED};
pub use request::{RequestId, RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
