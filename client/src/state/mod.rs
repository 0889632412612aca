//! Shared client-side state provided through Leptos context.
//!
//! DESIGN
//! ======
//! `session` wraps the library session manager so components observe one
//! reactive signal; `toast` drives the single notification slot.

pub mod session;
pub mod toast;
