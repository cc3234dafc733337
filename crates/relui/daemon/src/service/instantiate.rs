//! Run creation: cloning a template into a fresh run

use super::{WorkflowError, WorkflowService};
use chrono::Utc;
use relui_types::{BuildableTask, WorkflowId, WorkflowRun, WorkflowTemplate, REVISION_PARAM};
use std::collections::HashSet;

/// Which configured template a new run is cloned from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSelector {
    /// The first template in load order
    #[default]
    First,
    /// The template with this name
    Named(String),
}

impl TemplateSelector {
    /// Selector for an optional form value; blank means the first template
    pub fn from_form(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some(name) if !name.is_empty() => Self::Named(name.to_string()),
            _ => Self::First,
        }
    }
}

impl WorkflowService {
    /// Instantiate a template for `revision` and persist the new run
    ///
    /// Nothing is written unless every id was assigned; the run exists only
    /// once the store reports success.
    pub async fn create_run(
        &self,
        selector: &TemplateSelector,
        revision: &str,
    ) -> Result<WorkflowId, WorkflowError> {
        if revision.is_empty() {
            return Err(WorkflowError::Validation(
                "workflow revision is required".to_string(),
            ));
        }

        let template = self.select_template(selector)?;
        let run = self.instantiate(template, revision)?;
        let id = run.id.clone();
        let tasks = run.tasks.len();

        self.store.add_workflow(run).await?;

        tracing::info!(
            workflow_id = %id,
            template = %template.name,
            revision = %revision,
            tasks,
            "Created workflow run"
        );
        Ok(id)
    }

    fn select_template(&self, selector: &TemplateSelector) -> Result<&WorkflowTemplate, WorkflowError> {
        if self.templates.is_empty() {
            return Err(WorkflowError::NoTemplatesConfigured);
        }
        match selector {
            TemplateSelector::First => Ok(&self.templates[0]),
            TemplateSelector::Named(name) => self
                .templates
                .iter()
                .find(|t| &t.name == name)
                .ok_or_else(|| WorkflowError::UnknownTemplate(name.clone())),
        }
    }

    /// Deep-copy `template` into a run with fresh ids
    fn instantiate(&self, template: &WorkflowTemplate, revision: &str) -> Result<WorkflowRun, WorkflowError> {
        let id = self.ids.workflow_id();
        let mut assigned = HashSet::with_capacity(template.tasks.len() + 1);
        assigned.insert(id.as_str().to_string());

        let mut tasks = Vec::with_capacity(template.tasks.len());
        for task in &template.tasks {
            let task_id = self.ids.task_id();
            if !assigned.insert(task_id.as_str().to_string()) {
                return Err(WorkflowError::IdCollision(task_id.to_string()));
            }
            tasks.push(BuildableTask {
                id: task_id,
                name: task.name.clone(),
                task_type: task.task_type.clone(),
            });
        }

        let mut params = template.params.clone();
        params.insert(REVISION_PARAM.to_string(), revision.to_string());

        Ok(WorkflowRun {
            id,
            template: template.name.clone(),
            tasks,
            params,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{release_template, service_with, FailingStore, RecordingStore, SequenceIds};
    use crate::storage::WorkflowStore;
    use proptest::prelude::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_run_clones_template() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(vec![release_template()], store.clone());

        let id = service
            .create_run(&TemplateSelector::First, "abc123")
            .await
            .unwrap();

        let run = store.workflow(&id).await.unwrap().unwrap();
        assert_eq!(run.template, "release");
        assert_eq!(run.tasks.len(), 2);
        assert_eq!(run.tasks[0].task_type, "build");
        assert_eq!(run.tasks[1].task_type, "test");
        assert_eq!(run.revision(), Some("abc123"));
        assert_eq!(run.params.get("Project").map(String::as_str), Some("go"));

        let task_ids: HashSet<_> = run.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(task_ids.len(), 2);
        assert!(!task_ids.contains(run.id.as_str()));
    }

    #[tokio::test]
    async fn test_template_is_not_mutated() {
        let template = release_template();
        let store = Arc::new(RecordingStore::default());
        let service = service_with(vec![template.clone()], store);

        service.create_run(&TemplateSelector::First, "abc123").await.unwrap();
        service.create_run(&TemplateSelector::First, "def456").await.unwrap();

        assert_eq!(service.templates()[0], template);
        assert!(!service.templates()[0].params.contains_key(REVISION_PARAM));
    }

    #[tokio::test]
    async fn test_runs_do_not_share_tasks_or_params() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(vec![release_template()], store.clone());

        let first = service.create_run(&TemplateSelector::First, "abc123").await.unwrap();
        let second = service.create_run(&TemplateSelector::First, "def456").await.unwrap();
        assert_ne!(first, second);

        let first = store.workflow(&first).await.unwrap().unwrap();
        let second = store.workflow(&second).await.unwrap().unwrap();
        assert_eq!(first.revision(), Some("abc123"));
        assert_eq!(second.revision(), Some("def456"));
        for (a, b) in first.tasks.iter().zip(&second.tasks) {
            assert_ne!(a.id, b.id);
            assert_eq!(a.task_type, b.task_type);
        }
    }

    #[tokio::test]
    async fn test_empty_revision_fails_before_store() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(vec![release_template()], store.clone());

        let result = service.create_run(&TemplateSelector::First, "").await;
        assert!(matches!(result, Err(WorkflowError::Validation(_))));
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_revision_is_stored_verbatim() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(vec![release_template()], store.clone());

        for revision in [" abc123 ", " ", "\trefs/heads/release-branch.go1.16\n"] {
            let id = service.create_run(&TemplateSelector::First, revision).await.unwrap();
            let run = store.workflow(&id).await.unwrap().unwrap();
            assert_eq!(run.revision(), Some(revision));
        }
    }

    #[tokio::test]
    async fn test_no_templates_configured() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(Vec::new(), store.clone());

        let result = service.create_run(&TemplateSelector::First, "abc123").await;
        assert!(matches!(result, Err(WorkflowError::NoTemplatesConfigured)));
        assert_eq!(store.calls(), 0);
        assert!(store.workflows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_named_selector() {
        let store = Arc::new(RecordingStore::default());
        let other = WorkflowTemplate::new("hotfix").with_task("tag", "tag");
        let service = service_with(vec![release_template(), other], store.clone());

        let id = service
            .create_run(&TemplateSelector::Named("hotfix".into()), "abc123")
            .await
            .unwrap();
        assert_eq!(store.workflow(&id).await.unwrap().unwrap().template, "hotfix");

        let result = service
            .create_run(&TemplateSelector::Named("missing".into()), "abc123")
            .await;
        assert!(matches!(result, Err(WorkflowError::UnknownTemplate(name)) if name == "missing"));
    }

    #[tokio::test]
    async fn test_template_without_params_gets_revision() {
        let store = Arc::new(RecordingStore::default());
        let bare = WorkflowTemplate::new("bare").with_task("build", "build");
        let service = service_with(vec![bare], store.clone());

        let id = service.create_run(&TemplateSelector::First, "v1.2.3").await.unwrap();
        let run = store.workflow(&id).await.unwrap().unwrap();
        assert_eq!(run.params.len(), 1);
        assert_eq!(run.revision(), Some("v1.2.3"));
    }

    #[tokio::test]
    async fn test_id_collision_persists_nothing() {
        let store = Arc::new(RecordingStore::default());
        let service = service_with(vec![release_template()], store.clone())
            .with_id_generator(Arc::new(SequenceIds::new(["wf-1", "t-1", "t-1"])));

        let result = service.create_run(&TemplateSelector::First, "abc123").await;
        assert!(matches!(result, Err(WorkflowError::IdCollision(id)) if id == "t-1"));
        assert!(store.workflows().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_error() {
        let service = service_with(vec![release_template()], Arc::new(FailingStore));

        let result = service.create_run(&TemplateSelector::First, "abc123").await;
        assert!(matches!(result, Err(WorkflowError::Persistence(_))));
    }

    #[test]
    fn test_selector_from_form() {
        assert_eq!(TemplateSelector::from_form(None), TemplateSelector::First);
        assert_eq!(TemplateSelector::from_form(Some("  ")), TemplateSelector::First);
        assert_eq!(
            TemplateSelector::from_form(Some("hotfix")),
            TemplateSelector::Named("hotfix".to_string())
        );
    }

    proptest! {
        #[test]
        fn prop_every_run_gets_fresh_ids_and_the_revision(
            revisions in prop::collection::vec(
                any::<String>().prop_filter("revision must be non-empty", |r| !r.is_empty()),
                1..8,
            ),
        ) {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            runtime.block_on(async {
                let store = Arc::new(RecordingStore::default());
                let service = service_with(vec![release_template()], store.clone());

                let mut seen = HashSet::new();
                for revision in &revisions {
                    let id = service.create_run(&TemplateSelector::First, revision).await.unwrap();
                    prop_assert!(seen.insert(id.clone()));

                    let run = store.workflow(&id).await.unwrap().unwrap();
                    prop_assert_eq!(run.revision(), Some(revision.as_str()));
                    prop_assert_eq!(run.tasks.len(), 2);
                }
                Ok(())
            })?;
        }
    }
}
