//! API request handlers

mod health;
mod pages;
mod static_files;
mod tasks;
mod workflows;

pub use health::*;
pub use pages::*;
pub use static_files::*;
pub use tasks::*;
pub use workflows::*;
