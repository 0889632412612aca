//! Browser glue shared across pages and state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything that touches `web_sys` lives here behind the `csr` feature so
//! page logic stays testable on the host.

pub mod browser_storage;
pub mod forms;
