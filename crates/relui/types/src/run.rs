//! Workflow runs: instantiated copies of a template
//!
//! A run owns its task list and parameter map outright. Nothing inside a run
//! points back into the template it was cloned from, so later runs of the
//! same template can never observe each other's ids or parameters.

use crate::{TaskId, WorkflowId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parameter key holding the version-control reference a run builds
pub const REVISION_PARAM: &str = "GitObject";

/// A task within a run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildableTask {
    /// Run-scoped unique id, assigned at instantiation
    pub id: TaskId,
    /// Name copied from the template
    pub name: String,
    /// Worker-facing task type copied from the template
    pub task_type: String,
}

/// An instantiated release workflow
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Unique run id, immutable once assigned
    pub id: WorkflowId,
    /// Name of the template this run was cloned from
    pub template: String,
    /// Tasks in template order
    pub tasks: Vec<BuildableTask>,
    /// Template defaults overlaid with run-specific values
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// When the run was instantiated
    pub created_at: DateTime<Utc>,
}

impl WorkflowRun {
    /// Look up a task of this run by id
    pub fn task(&self, id: &TaskId) -> Option<&BuildableTask> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// The revision this run builds, if set
    pub fn revision(&self) -> Option<&str> {
        self.params.get(REVISION_PARAM).map(String::as_str)
    }
}
