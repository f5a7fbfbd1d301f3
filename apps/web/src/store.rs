//! In-memory registry of submitted analyses.
//!
//! Lets the results page be re-rendered (polling, section toggles) without
//! re-running the backend. Bounded; the oldest record is evicted first.
//! Nothing here survives a restart.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::analysis::AnalysisResult;

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisStatus {
    Pending,
    Ready(Box<AnalysisResult>),
    Failed(String),
}

impl AnalysisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisStatus::Pending => "pending",
            AnalysisStatus::Ready(_) => "ready",
            AnalysisStatus::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub file_name: String,
    pub submitted_at: DateTime<Utc>,
    pub status: AnalysisStatus,
}

#[derive(Default)]
struct Inner {
    records: HashMap<Uuid, AnalysisRecord>,
    /// Insertion order, oldest first.
    order: VecDeque<Uuid>,
}

#[derive(Clone)]
pub struct AnalysisStore {
    inner: Arc<RwLock<Inner>>,
    capacity: usize,
}

impl AnalysisStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            capacity: capacity.max(1),
        }
    }

    /// Registers a new upload and returns its id.
    pub async fn insert_pending(&self, file_name: &str) -> Uuid {
        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            file_name: file_name.to_string(),
            submitted_at: Utc::now(),
            status: AnalysisStatus::Pending,
        };
        let id = record.id;

        let mut inner = self.inner.write().await;
        while inner.order.len() >= self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.records.remove(&evicted);
                debug!("Evicted analysis {evicted} from store");
            }
        }
        inner.order.push_back(id);
        inner.records.insert(id, record);
        id
    }

    /// Stores the backend result. Returns false if the record was evicted meanwhile.
    pub async fn complete(&self, id: Uuid, result: AnalysisResult) -> bool {
        self.set_status(id, AnalysisStatus::Ready(Box::new(result)))
            .await
    }

    pub async fn fail(&self, id: Uuid, message: String) -> bool {
        self.set_status(id, AnalysisStatus::Failed(message)).await
    }

    pub async fn get(&self, id: Uuid) -> Option<AnalysisRecord> {
        self.inner.read().await.records.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    async fn set_status(&self, id: Uuid, status: AnalysisStatus) -> bool {
        match self.inner.write().await.records.get_mut(&id) {
            Some(record) => {
                record.status = status;
                true
            }
            None => false,
        }
    }
}
