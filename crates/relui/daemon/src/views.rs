//! HTML pages rendered with minijinja
//!
//! Page templates are compiled into the binary and parsed once when the
//! daemon starts, so a malformed page fails start-up instead of a request.

use minijinja::{context, Environment};
use relui_types::{WorkflowRun, WorkflowTemplate};

const LAYOUT: &str = include_str!("../templates/layout.html");
const HOME: &str = include_str!("../templates/home.html");
const NEW_WORKFLOW: &str = include_str!("../templates/new_workflow.html");

/// Parsed page templates
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("layout.html", LAYOUT)?;
        env.add_template("home.html", HOME)?;
        env.add_template("new_workflow.html", NEW_WORKFLOW)?;
        Ok(Self { env })
    }

    /// Render the run list, newest run first
    pub fn home(&self, mut workflows: Vec<WorkflowRun>) -> Result<String, minijinja::Error> {
        workflows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        self.env
            .get_template("home.html")?
            .render(context! { workflows => workflows })
    }

    /// Render the run-creation form
    pub fn new_workflow(&self, templates: &[WorkflowTemplate]) -> Result<String, minijinja::Error> {
        self.env
            .get_template("new_workflow.html")?
            .render(context! { templates => templates })
    }
}
