//! BDD step definitions for statusboard

pub mod dispatch_steps;
pub mod presentation_steps;
pub mod refresh_steps;
