//! Campus management API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` owns the shared request pipeline (bearer auth out, envelope
//! unwrapping in), `api` holds one thin function per backend operation,
//! `state` keeps the persisted login session, and `util` isolates the
//! storage, notification and navigation seams so the pipeline stays testable.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

pub use config::ClientConfig;
pub use error::ClientError;
pub use net::pipeline::{ApiClient, ApiRequest};
pub use state::session::{Session, SessionStore};
