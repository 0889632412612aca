//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session and toast signals from context; pages compose
//! them around route-specific content.

pub mod issue_table;
pub mod nav_bar;
pub mod route_guard;
pub mod status_chip;
pub mod toast_host;
