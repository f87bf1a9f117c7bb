//! Client state containers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` is the only mutable state the client keeps between requests.

pub mod session;
