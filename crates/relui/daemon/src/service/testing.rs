//! Test doubles shared by the service tests

use super::{IdGenerator, WorkflowService};
use crate::dispatch::{InMemoryTopic, Message, PublishError, PublishResult, Topic};
use crate::error::StorageError;
use crate::storage::{InMemoryStore, StorageResult, WorkflowStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use relui_types::{BuildableTask, TaskId, WorkflowId, WorkflowRun, WorkflowTemplate};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

pub fn release_template() -> WorkflowTemplate {
    WorkflowTemplate::new("release")
        .with_task("build", "build")
        .with_task("test", "test")
        .with_param("Project", "go")
}

pub fn service_with(templates: Vec<WorkflowTemplate>, store: Arc<dyn WorkflowStore>) -> WorkflowService {
    service_with_topic(templates, store, Arc::new(InMemoryTopic::new("tasks")))
}

pub fn service_with_topic(
    templates: Vec<WorkflowTemplate>,
    store: Arc<dyn WorkflowStore>,
    topic: Arc<dyn Topic>,
) -> WorkflowService {
    WorkflowService::new(templates, store, topic, Duration::from_millis(200))
}

/// In-memory store that counts every call
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    calls: AtomicUsize,
}

impl RecordingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl WorkflowStore for RecordingStore {
    async fn workflows(&self) -> StorageResult<Vec<WorkflowRun>> {
        self.record();
        self.inner.workflows().await
    }

    async fn workflow(&self, id: &WorkflowId) -> StorageResult<Option<WorkflowRun>> {
        self.record();
        self.inner.workflow(id).await
    }

    async fn buildable_task(
        &self,
        workflow_id: &WorkflowId,
        task_id: &TaskId,
    ) -> StorageResult<Option<BuildableTask>> {
        self.record();
        self.inner.buildable_task(workflow_id, task_id).await
    }

    async fn add_workflow(&self, run: WorkflowRun) -> StorageResult<()> {
        self.record();
        self.inner.add_workflow(run).await
    }
}

/// Store whose medium is unavailable
pub struct FailingStore;

fn unavailable() -> StorageError {
    StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, "store unavailable"))
}

#[async_trait]
impl WorkflowStore for FailingStore {
    async fn workflows(&self) -> StorageResult<Vec<WorkflowRun>> {
        Err(unavailable())
    }

    async fn workflow(&self, _id: &WorkflowId) -> StorageResult<Option<WorkflowRun>> {
        Err(unavailable())
    }

    async fn buildable_task(
        &self,
        _workflow_id: &WorkflowId,
        _task_id: &TaskId,
    ) -> StorageResult<Option<BuildableTask>> {
        Err(unavailable())
    }

    async fn add_workflow(&self, _run: WorkflowRun) -> StorageResult<()> {
        Err(unavailable())
    }
}

/// Hands out scripted ids, then random ones
pub struct SequenceIds {
    ids: Mutex<VecDeque<String>>,
}

impl SequenceIds {
    pub fn new<const N: usize>(ids: [&str; N]) -> Self {
        Self {
            ids: Mutex::new(ids.iter().map(|id| id.to_string()).collect()),
        }
    }

    fn next(&self) -> Option<String> {
        self.ids.lock().pop_front()
    }
}

impl IdGenerator for SequenceIds {
    fn workflow_id(&self) -> WorkflowId {
        self.next().map(WorkflowId::new).unwrap_or_else(WorkflowId::generate)
    }

    fn task_id(&self) -> TaskId {
        self.next().map(TaskId::new).unwrap_or_else(TaskId::generate)
    }
}

/// Topic whose acknowledgments always fail
#[derive(Default)]
pub struct FailingTopic {
    publishes: AtomicUsize,
}

impl FailingTopic {
    pub fn publishes(&self) -> usize {
        self.publishes.load(Ordering::SeqCst)
    }
}

impl Topic for FailingTopic {
    fn name(&self) -> &str {
        "failing"
    }

    fn publish(&self, _message: Message) -> PublishResult {
        self.publishes.fetch_add(1, Ordering::SeqCst);
        PublishResult::ready(Err(PublishError::Transport("bus unavailable".to_string())))
    }
}

/// Topic that accepts messages but never acknowledges them
#[derive(Default)]
pub struct SilentTopic {
    pending: Mutex<Vec<oneshot::Sender<Result<String, PublishError>>>>,
}

impl Topic for SilentTopic {
    fn name(&self) -> &str {
        "silent"
    }

    fn publish(&self, _message: Message) -> PublishResult {
        let (tx, result) = PublishResult::pending();
        self.pending.lock().push(tx);
        result
    }
}
