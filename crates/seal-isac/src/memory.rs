//! In-memory [`Store`] with an operation log.
//!
//! Mirrors the platform behaviors the reconcilers rely on: create by
//! deterministic id is idempotent, labels must exist before they can be
//! attached, and a zero score marks an indicator revoked. Useful for tests
//! and dry runs.

use async_trait::async_trait;
use seal_isac_core::{
    all_reputation_label_names, ids, Content, Indicator, IndicatorDraft, IndicatorPatch,
    IsacError, Observable, ObservableDraft, RelationshipType, Result, StixId, Store,
};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A relationship recorded by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Source node
    pub from: StixId,
    /// Target node
    pub to: StixId,
    /// Relationship type
    pub relationship: RelationshipType,
}

/// Store operations, for fault injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    /// `get_observable`
    GetObservable,
    /// `create_observable`
    CreateObservable,
    /// `add_label`
    AddLabel,
    /// `delete_label`
    DeleteLabel,
    /// `get_indicator`
    GetIndicator,
    /// `create_indicator`
    CreateIndicator,
    /// `edit_indicator`
    EditIndicator,
    /// `create_relationship`
    CreateRelationship,
}

/// One call made against the store, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// Observable lookup
    GetObservable(StixId),
    /// Observable creation with its initial labels
    CreateObservable {
        /// Created id
        id: StixId,
        /// Initial label names
        labels: Vec<String>,
    },
    /// Label attached
    AddLabel {
        /// Observable id
        observable: StixId,
        /// Label name
        label: String,
    },
    /// Label detached
    DeleteLabel {
        /// Observable id
        observable: StixId,
        /// Label name
        label: String,
    },
    /// Indicator lookup
    GetIndicator(StixId),
    /// Indicator creation
    CreateIndicator(StixId),
    /// Indicator patch
    EditIndicator {
        /// Indicator id
        id: StixId,
        /// Patches applied
        patches: Vec<IndicatorPatch>,
    },
    /// Relationship creation
    CreateRelationship(Relationship),
}

impl StoreCall {
    /// Returns true for calls that change state
    #[must_use]
    pub const fn is_write(&self) -> bool {
        !matches!(self, Self::GetObservable(_) | Self::GetIndicator(_))
    }
}

#[derive(Debug, Default)]
struct State {
    observables: HashMap<StixId, Observable>,
    indicators: HashMap<StixId, Indicator>,
    relationships: Vec<Relationship>,
    labels: HashMap<StixId, String>,
    calls: Vec<StoreCall>,
    failures: HashSet<StoreOperation>,
}

impl State {
    fn register_label(&mut self, name: &str) {
        self.labels.insert(ids::label_id(name), name.to_string());
    }

    fn check(&mut self, op: StoreOperation) -> Result<()> {
        if self.failures.remove(&op) {
            return Err(IsacError::Connection(format!("injected failure on {op:?}")));
        }
        Ok(())
    }

    fn label_name(&self, label: &StixId) -> Result<String> {
        self.labels
            .get(label)
            .cloned()
            .ok_or_else(|| IsacError::MissingData(format!("label {label} does not exist")))
    }

    fn observable_mut(&mut self, id: &StixId) -> Result<&mut Observable> {
        self.observables
            .get_mut(id)
            .ok_or_else(|| IsacError::MissingData(format!("observable {id} does not exist")))
    }
}

/// In-memory threat-intel store
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store with the reputation label vocabulary registered
    #[must_use]
    pub fn new() -> Self {
        let mut state = State::default();
        for name in all_reputation_label_names() {
            state.register_label(name);
        }
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make a label attachable by id
    pub fn register_label(&self, name: &str) {
        self.lock().register_label(name);
    }

    /// Fail the next call of `op` with a connection error
    pub fn fail_next(&self, op: StoreOperation) {
        self.lock().failures.insert(op);
    }

    /// The observable stored for `content`
    #[must_use]
    pub fn observable(&self, content: &Content) -> Option<Observable> {
        self.lock().observables.get(&content.observable_id()).cloned()
    }

    /// The indicator stored for `content`
    #[must_use]
    pub fn indicator(&self, content: &Content) -> Option<Indicator> {
        self.lock().indicators.get(&content.indicator_id()).cloned()
    }

    /// Every relationship created so far
    #[must_use]
    pub fn relationships(&self) -> Vec<Relationship> {
        self.lock().relationships.clone()
    }

    /// Every call made so far
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Calls that changed state
    #[must_use]
    pub fn writes(&self) -> Vec<StoreCall> {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.is_write())
            .cloned()
            .collect()
    }

    /// Forget the call log
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_observable(&self, id: &StixId) -> Result<Option<Observable>> {
        let mut state = self.lock();
        state.calls.push(StoreCall::GetObservable(id.clone()));
        state.check(StoreOperation::GetObservable)?;
        Ok(state.observables.get(id).cloned())
    }

    async fn create_observable(&self, draft: ObservableDraft) -> Result<Observable> {
        let mut state = self.lock();
        let id = draft.content.observable_id();
        state.calls.push(StoreCall::CreateObservable {
            id: id.clone(),
            labels: draft.labels.clone(),
        });
        state.check(StoreOperation::CreateObservable)?;

        if let Some(existing) = state.observables.get(&id) {
            return Ok(existing.clone());
        }

        for name in &draft.labels {
            state.register_label(name);
        }
        let observable = Observable {
            id: id.clone(),
            labels: draft.labels.into_iter().collect(),
            markings: draft.markings,
            created_by: draft.created_by,
        };
        state.observables.insert(id, observable.clone());
        Ok(observable)
    }

    async fn add_label(&self, observable: &StixId, label: &StixId) -> Result<BTreeSet<String>> {
        let mut state = self.lock();
        let name = state.label_name(label)?;
        state.calls.push(StoreCall::AddLabel {
            observable: observable.clone(),
            label: name.clone(),
        });
        state.check(StoreOperation::AddLabel)?;

        let node = state.observable_mut(observable)?;
        node.labels.insert(name);
        Ok(node.labels.clone())
    }

    async fn delete_label(
        &self,
        observable: &StixId,
        label: &StixId,
    ) -> Result<BTreeSet<String>> {
        let mut state = self.lock();
        let name = state.label_name(label)?;
        state.calls.push(StoreCall::DeleteLabel {
            observable: observable.clone(),
            label: name.clone(),
        });
        state.check(StoreOperation::DeleteLabel)?;

        let node = state.observable_mut(observable)?;
        node.labels.remove(&name);
        Ok(node.labels.clone())
    }

    async fn get_indicator(&self, id: &StixId) -> Result<Option<Indicator>> {
        let mut state = self.lock();
        state.calls.push(StoreCall::GetIndicator(id.clone()));
        state.check(StoreOperation::GetIndicator)?;
        Ok(state.indicators.get(id).cloned())
    }

    async fn create_indicator(&self, draft: IndicatorDraft) -> Result<Indicator> {
        let mut state = self.lock();
        let id = ids::indicator_id(&draft.pattern);
        state.calls.push(StoreCall::CreateIndicator(id.clone()));
        state.check(StoreOperation::CreateIndicator)?;

        if let Some(existing) = state.indicators.get(&id) {
            return Ok(existing.clone());
        }

        let indicator = Indicator {
            id: id.clone(),
            pattern: draft.pattern,
            valid_from: Some(draft.valid_from),
            valid_until: Some(draft.valid_until),
            score: Some(draft.score),
            revoked: draft.score == 0,
            created_by: draft.created_by,
        };
        state.indicators.insert(id, indicator.clone());
        Ok(indicator)
    }

    async fn edit_indicator(&self, id: &StixId, patches: &[IndicatorPatch]) -> Result<Indicator> {
        let mut state = self.lock();
        state.calls.push(StoreCall::EditIndicator {
            id: id.clone(),
            patches: patches.to_vec(),
        });
        state.check(StoreOperation::EditIndicator)?;

        let indicator = state
            .indicators
            .get_mut(id)
            .ok_or_else(|| IsacError::MissingData(format!("indicator {id} does not exist")))?;
        for patch in patches {
            match *patch {
                IndicatorPatch::ValidFrom(at) => indicator.valid_from = Some(at),
                IndicatorPatch::ValidUntil(at) => indicator.valid_until = Some(at),
                IndicatorPatch::Score(score) => {
                    indicator.score = Some(score);
                    if score == 0 {
                        indicator.revoked = true;
                    }
                }
                IndicatorPatch::Revoked(revoked) => indicator.revoked = revoked,
            }
        }
        Ok(indicator.clone())
    }

    async fn create_relationship(
        &self,
        from: &StixId,
        to: &StixId,
        relationship: RelationshipType,
    ) -> Result<()> {
        let mut state = self.lock();
        let record = Relationship {
            from: from.clone(),
            to: to.clone(),
            relationship,
        };
        state.calls.push(StoreCall::CreateRelationship(record.clone()));
        state.check(StoreOperation::CreateRelationship)?;
        state.relationships.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use seal_isac_core::{ContentKind, TRUSTED_WEB_CONTENT_LABEL};

    fn draft(content: &Content, labels: &[&str]) -> ObservableDraft {
        ObservableDraft {
            content: content.clone(),
            labels: labels.iter().map(ToString::to_string).collect(),
            markings: Vec::new(),
            created_by: None,
            score: None,
        }
    }

    #[tokio::test]
    async fn test_create_observable_is_idempotent() {
        let store = MemoryStore::new();
        let content = Content::domain("example.com");

        let first = store
            .create_observable(draft(&content, &[TRUSTED_WEB_CONTENT_LABEL]))
            .await
            .unwrap();
        let second = store.create_observable(draft(&content, &[])).await.unwrap();

        assert_eq!(first, second);
        assert!(second.has_label(TRUSTED_WEB_CONTENT_LABEL));
    }

    #[tokio::test]
    async fn test_unknown_label_rejected() {
        let store = MemoryStore::new();
        let content = Content::domain("example.com");
        let observable = store.create_observable(draft(&content, &[])).await.unwrap();

        let err = store
            .add_label(&observable.id, &ids::label_id("never registered"))
            .await
            .unwrap_err();
        assert!(matches!(err, IsacError::MissingData(_)));

        store.register_label("never registered");
        let labels = store
            .add_label(&observable.id, &ids::label_id("never registered"))
            .await
            .unwrap();
        assert!(labels.contains("never registered"));
    }

    #[tokio::test]
    async fn test_zero_score_revokes() {
        let store = MemoryStore::new();
        let content = Content::ipv4("1.2.3.4");
        let now = Utc::now();
        let created = store
            .create_indicator(IndicatorDraft {
                name: content.value.clone(),
                pattern: content.pattern(),
                main_observable_type: ContentKind::Ipv4Addr,
                score: 100,
                valid_from: now,
                valid_until: now + Duration::days(365),
                created_by: None,
            })
            .await
            .unwrap();
        assert!(created.is_active());

        let edited = store
            .edit_indicator(&created.id, &[IndicatorPatch::Score(0)])
            .await
            .unwrap();
        assert!(edited.revoked);

        let restored = store
            .edit_indicator(
                &created.id,
                &[IndicatorPatch::Score(100), IndicatorPatch::Revoked(false)],
            )
            .await
            .unwrap();
        assert!(restored.is_active());
    }

    #[tokio::test]
    async fn test_fail_next_fires_once() {
        let store = MemoryStore::new();
        let id = Content::url("https://a.com").observable_id();
        store.fail_next(StoreOperation::GetObservable);

        assert!(store.get_observable(&id).await.is_err());
        assert!(store.get_observable(&id).await.unwrap().is_none());
        assert_eq!(store.calls().len(), 2);
        assert!(store.writes().is_empty());
    }
}
