//! Routes, handlers and shared state for the web front end

pub mod handlers;
pub mod router;
pub mod state;
