//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! The environment seams live here: persisted key/value storage, user-facing
//! notification, navigation, and the 401 login redirect built on them.

pub mod auth;
pub mod notify;
pub mod storage;
