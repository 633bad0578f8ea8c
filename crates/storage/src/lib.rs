//! Per-document metadata store and the position persistence seam the gesture core commits through.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Number, Value};
use shared::{
    domain::{DocumentId, PartialPosition, PersistedPositionPatch},
    error::{StoreError, StoreErrorCode},
    settings::MetadataSettings,
};
use tokio::sync::RwLock;
use tracing::debug;

/// Asynchronous upsert/read of a document's persisted image position.
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Writes the single field carried by `patch`; the other axis keeps its stored value.
    async fn upsert(&self, document: &DocumentId, patch: PersistedPositionPatch) -> Result<()>;
    async fn load(&self, document: &DocumentId) -> Result<PartialPosition>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentMetadata {
    pub fields: BTreeMap<String, Value>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// In-memory frontmatter-like metadata keyed by document.
///
/// Only documents registered through [`MetadataStore::insert_document`] accept upserts,
/// the same way metadata can only be written into a file that exists.
#[derive(Clone)]
pub struct MetadataStore {
    documents: Arc<RwLock<HashMap<DocumentId, DocumentMetadata>>>,
    settings: MetadataSettings,
}

impl MetadataStore {
    pub fn new(settings: MetadataSettings) -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            settings,
        }
    }

    pub fn settings(&self) -> &MetadataSettings {
        &self.settings
    }

    pub async fn insert_document(&self, document: DocumentId, fields: BTreeMap<String, Value>) {
        let metadata = DocumentMetadata {
            fields,
            updated_at: None,
        };
        self.documents.write().await.insert(document, metadata);
    }

    pub async fn remove_document(&self, document: &DocumentId) -> bool {
        self.documents.write().await.remove(document).is_some()
    }

    pub async fn document(&self, document: &DocumentId) -> Option<DocumentMetadata> {
        self.documents.read().await.get(document).cloned()
    }

    /// Whether the document pins its image position via `<prefix>_lock`.
    pub async fn is_locked(&self, document: &DocumentId) -> Result<bool> {
        let documents = self.documents.read().await;
        let metadata = documents
            .get(document)
            .ok_or_else(|| not_found(document))?;
        let locked = match metadata.fields.get(&self.settings.lock_field()) {
            Some(Value::Bool(locked)) => *locked,
            Some(Value::String(raw)) => raw.trim().eq_ignore_ascii_case("true"),
            _ => false,
        };
        Ok(locked)
    }

    fn field_for(&self, patch: &PersistedPositionPatch) -> String {
        match patch {
            PersistedPositionPatch::X(_) => self.settings.x_field(),
            PersistedPositionPatch::Y(_) => self.settings.y_field(),
        }
    }
}

#[async_trait]
impl PositionStore for MetadataStore {
    async fn upsert(&self, document: &DocumentId, patch: PersistedPositionPatch) -> Result<()> {
        let value = patch.value();
        if !(0.0..=1.0).contains(&value) {
            return Err(StoreError::new(
                StoreErrorCode::Rejected,
                format!("position {value} is outside [0, 1]"),
            )
            .into());
        }
        let number = Number::from_f64(value).ok_or_else(|| {
            StoreError::new(StoreErrorCode::Rejected, format!("position {value} is not finite"))
        })?;
        let field = self.field_for(&patch);

        let mut documents = self.documents.write().await;
        let metadata = documents
            .get_mut(document)
            .ok_or_else(|| not_found(document))?;
        metadata.fields.insert(field.clone(), Value::Number(number));
        metadata.updated_at = Some(Utc::now());
        debug!(document = %document, field = %field, value, "upserted position field");
        Ok(())
    }

    async fn load(&self, document: &DocumentId) -> Result<PartialPosition> {
        let documents = self.documents.read().await;
        let metadata = documents
            .get(document)
            .ok_or_else(|| not_found(document))?;
        Ok(PartialPosition {
            x: metadata
                .fields
                .get(&self.settings.x_field())
                .and_then(read_coordinate),
            y: metadata
                .fields
                .get(&self.settings.y_field())
                .and_then(read_coordinate),
        })
    }
}

fn not_found(document: &DocumentId) -> StoreError {
    StoreError::new(
        StoreErrorCode::NotFound,
        format!("no metadata for document '{document}'"),
    )
}

/// Accepts numbers and numeric strings; hand-edited metadata often quotes them.
fn read_coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
