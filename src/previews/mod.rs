//! Preview metadata.
//!
//! A fixed set of preview records is built at startup and handed to the
//! HTTP server state. Nothing on the request path reads it yet.

pub mod record;
pub mod store;

pub use record::PreviewRecord;
pub use store::PreviewStore;
