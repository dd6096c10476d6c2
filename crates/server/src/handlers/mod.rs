//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `metagen-server`.
//! The handlers are split into sub-modules by the collaborator they front.

// Sub-modules for different handler categories.
pub mod general;
pub mod metadata;
pub mod release;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use general::*;
pub use metadata::*;
pub use release::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};
