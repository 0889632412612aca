//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its route's data loading and form handling and delegates
//! shared rendering to `components`. Guards are applied in `app`, not here.

pub mod admin_dashboard;
pub mod issue_detail;
pub mod login;
pub mod my_issues;
pub mod profile;
pub mod register;
pub mod submit;
