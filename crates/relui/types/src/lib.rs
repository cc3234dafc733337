//! relui types - release workflow domain model
//!
//! A release is driven by a [`WorkflowTemplate`], an immutable definition
//! loaded at start-up. Every time an operator asks for a release, the
//! template is copied into a [`WorkflowRun`] with freshly generated ids for
//! the run and each of its [`BuildableTask`]s. Individual tasks are handed to
//! workers by publishing a [`DispatchRequest`].
//!
//! ## Key Concepts
//!
//! - **WorkflowTemplate**: configured blueprint, never mutated
//! - **WorkflowRun**: one instantiation of a template, owned by the store
//! - **BuildableTask**: a unit of work inside a run, addressed by `(run id, task id)`
//! - **DispatchRequest**: the message workers consume to start a task

#![deny(unsafe_code)]

pub mod dispatch;
pub mod ids;
pub mod run;
pub mod template;

pub use dispatch::DispatchRequest;
pub use ids::{TaskId, WorkflowId};
pub use run::{BuildableTask, WorkflowRun, REVISION_PARAM};
pub use template::{load_templates, BuildableTaskTemplate, TemplateError, WorkflowTemplate};
