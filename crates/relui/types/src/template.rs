//! Workflow templates: the configured blueprints runs are cloned from
//!
//! Templates are read once at start-up from a directory of YAML or JSON
//! documents and are never mutated afterwards. A template names the tasks a
//! release consists of and the default parameters every run starts with.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating templates
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("invalid template '{template}': {reason}")]
    Invalid { template: String, reason: String },

    #[error("template '{0}' is defined more than once")]
    Duplicate(String),
}

/// A task declared by a template
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildableTaskTemplate {
    /// Human-readable name, unique within the template
    pub name: String,
    /// Worker-facing task type (e.g. `build`, `test`)
    pub task_type: String,
}

impl BuildableTaskTemplate {
    pub fn new(name: impl Into<String>, task_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            task_type: task_type.into(),
        }
    }
}

/// An immutable release workflow definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    /// Template name
    pub name: String,
    /// What the workflow releases
    #[serde(default)]
    pub description: String,
    /// Tasks in the order they are listed
    #[serde(default)]
    pub tasks: Vec<BuildableTaskTemplate>,
    /// Default parameters copied into every run
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

impl WorkflowTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tasks: Vec::new(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_task(mut self, name: impl Into<String>, task_type: impl Into<String>) -> Self {
        self.tasks.push(BuildableTaskTemplate::new(name, task_type));
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Check the structural rules a template must satisfy
    pub fn validate(&self) -> Result<(), TemplateError> {
        let invalid = |reason: String| TemplateError::Invalid {
            template: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }

        let mut names = HashSet::new();
        for (index, task) in self.tasks.iter().enumerate() {
            if task.task_type.trim().is_empty() {
                return Err(invalid(format!("task #{} has an empty task_type", index)));
            }
            if !names.insert(task.name.as_str()) {
                return Err(invalid(format!("task name '{}' is repeated", task.name)));
            }
        }

        Ok(())
    }
}

/// Load every template document in `dir`
///
/// Files are visited in file-name order so the first configured template is
/// stable across restarts. Files without a `.yaml`, `.yml` or `.json`
/// extension are ignored.
pub fn load_templates(dir: &Path) -> Result<Vec<WorkflowTemplate>, TemplateError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| TemplateError::Io { path, source }
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let path = entry.map_err(io_err(dir))?.path();
        if path.is_file() && template_format(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut templates = Vec::with_capacity(paths.len());
    let mut seen = HashSet::new();
    for path in paths {
        let template = load_template(&path)?;
        template.validate()?;
        if !seen.insert(template.name.clone()) {
            return Err(TemplateError::Duplicate(template.name));
        }
        templates.push(template);
    }

    Ok(templates)
}

#[derive(Clone, Copy)]
enum Format {
    Yaml,
    Json,
}

fn template_format(path: &Path) -> Option<Format> {
    match path.extension()?.to_str()? {
        "yaml" | "yml" => Some(Format::Yaml),
        "json" => Some(Format::Json),
        _ => None,
    }
}

fn load_template(path: &Path) -> Result<WorkflowTemplate, TemplateError> {
    let contents = fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |message: String| TemplateError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match template_format(path) {
        Some(Format::Json) => serde_json::from_str(&contents).map_err(|e| parse_err(e.to_string())),
        _ => serde_yaml::from_str(&contents).map_err(|e| parse_err(e.to_string())),
    }
}
