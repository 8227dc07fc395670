//! API route modules.

pub mod email;
pub mod health;
pub mod summarize;
pub mod upload;
