//! Observable reconciliation: look up, create or relabel a content node.

use seal_isac_core::{
    ids, Content, Observable, ObservableDraft, RelationshipType, Result, StixId, Store,
};
use tracing::debug;

/// Desired label changes for one observable
#[derive(Debug, Clone, Default)]
pub struct ObservableChange {
    /// Creator recorded when the node has to be created
    pub creator: Option<StixId>,
    /// Labels that must be present afterwards
    pub add_labels: Vec<&'static str>,
    /// Labels that must be absent afterwards
    pub remove_labels: Vec<&'static str>,
    /// Platform score, recorded only on creation
    pub score: Option<u8>,
}

impl ObservableChange {
    /// Change that only strips labels
    #[must_use]
    pub fn remove(labels: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            remove_labels: labels.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Record a creator
    #[must_use]
    pub fn creator(mut self, creator: Option<&StixId>) -> Self {
        self.creator = creator.cloned();
        self
    }

    /// Require these labels to be present
    #[must_use]
    pub fn add(mut self, labels: impl IntoIterator<Item = &'static str>) -> Self {
        self.add_labels.extend(labels);
        self
    }
}

/// Bring the observable for `content` to the requested label state.
///
/// Creates the node with `add_labels` when it does not exist yet, otherwise
/// adds and removes labels one call at a time. Nothing here is
/// transactional: a failure leaves earlier calls applied.
pub(crate) async fn reconcile<S: Store + ?Sized>(
    store: &S,
    content: &Content,
    change: &ObservableChange,
) -> Result<Observable> {
    match store.get_observable(&content.observable_id()).await? {
        Some(existing) => update(store, existing, change).await,
        None => create(store, content, change).await,
    }
}

/// Apply label changes to an existing observable
pub(crate) async fn update<S: Store + ?Sized>(
    store: &S,
    mut observable: Observable,
    change: &ObservableChange,
) -> Result<Observable> {
    for label in &change.add_labels {
        if !observable.has_label(label) {
            debug!(observable = %observable.id, label, "adding label");
            observable.labels = store.add_label(&observable.id, &ids::label_id(label)).await?;
        }
    }
    for label in &change.remove_labels {
        if observable.has_label(label) {
            debug!(observable = %observable.id, label, "removing label");
            observable.labels = store
                .delete_label(&observable.id, &ids::label_id(label))
                .await?;
        }
    }
    Ok(observable)
}

/// Create the observable, linking a web URL to its host domain.
///
/// The URL is parsed before anything is written.
pub(crate) async fn create<S: Store + ?Sized>(
    store: &S,
    content: &Content,
    change: &ObservableChange,
) -> Result<Observable> {
    let host = content.web_host()?;

    let observable = store
        .create_observable(draft(content, change.add_labels.clone(), change))
        .await?;
    debug!(observable = %observable.id, kind = %content.kind, "created observable");

    // URL -> host domain, one level only.
    if let Some(host) = host {
        let domain = get_or_create_host(store, &host, change.creator.as_ref()).await?;
        store
            .create_relationship(&observable.id, &domain.id, RelationshipType::RelatedTo)
            .await?;
        debug!(from = %observable.id, to = %domain.id, "linked url to host domain");
    }

    Ok(observable)
}

async fn get_or_create_host<S: Store + ?Sized>(
    store: &S,
    host: &Content,
    creator: Option<&StixId>,
) -> Result<Observable> {
    if let Some(existing) = store.get_observable(&host.observable_id()).await? {
        return Ok(existing);
    }
    let change = ObservableChange::default().creator(creator);
    store
        .create_observable(draft(host, Vec::new(), &change))
        .await
}

fn draft(content: &Content, labels: Vec<&'static str>, change: &ObservableChange) -> ObservableDraft {
    ObservableDraft {
        content: content.clone(),
        labels: labels.into_iter().map(String::from).collect(),
        markings: vec![ids::MARKING_TLP_CLEAR.to_string()],
        created_by: change.creator.clone(),
        score: change.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStore, StoreCall};
    use seal_isac_core::{
        ALLOWLISTED_DOMAIN_LABEL, BLOCKLISTED_DOMAIN_LABEL, TRUSTED_WEB_CONTENT_LABEL,
    };

    fn seal() -> StixId {
        ids::identity_id("SEAL", "organization")
    }

    #[tokio::test]
    async fn test_creates_with_initial_labels() {
        let store = MemoryStore::new();
        let content = Content::ipv4("10.0.0.1");
        let change = ObservableChange::default()
            .creator(Some(&seal()))
            .add([TRUSTED_WEB_CONTENT_LABEL]);

        let observable = reconcile(&store, &content, &change).await.unwrap();

        assert!(observable.has_label(TRUSTED_WEB_CONTENT_LABEL));
        assert_eq!(observable.created_by, Some(seal()));
        assert_eq!(observable.markings, vec![ids::MARKING_TLP_CLEAR.to_string()]);
        assert_eq!(
            store.writes(),
            vec![StoreCall::CreateObservable {
                id: content.observable_id(),
                labels: vec![TRUSTED_WEB_CONTENT_LABEL.to_string()],
            }]
        );
    }

    #[tokio::test]
    async fn test_update_only_touches_what_differs() {
        let store = MemoryStore::new();
        let content = Content::domain("example.com");
        let setup = ObservableChange::default().add([BLOCKLISTED_DOMAIN_LABEL]);
        reconcile(&store, &content, &setup).await.unwrap();
        store.clear_calls();

        let change = ObservableChange::remove([ALLOWLISTED_DOMAIN_LABEL, BLOCKLISTED_DOMAIN_LABEL])
            .add([TRUSTED_WEB_CONTENT_LABEL]);
        let observable = reconcile(&store, &content, &change).await.unwrap();

        assert!(observable.has_label(TRUSTED_WEB_CONTENT_LABEL));
        assert!(!observable.has_label(BLOCKLISTED_DOMAIN_LABEL));
        assert_eq!(
            store.writes(),
            vec![
                StoreCall::AddLabel {
                    observable: content.observable_id(),
                    label: TRUSTED_WEB_CONTENT_LABEL.to_string(),
                },
                StoreCall::DeleteLabel {
                    observable: content.observable_id(),
                    label: BLOCKLISTED_DOMAIN_LABEL.to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_web_url_links_host_domain() {
        let store = MemoryStore::new();
        let content = Content::url("https://abc.example.com/path");
        let change = ObservableChange::default().creator(Some(&seal()));

        let observable = reconcile(&store, &content, &change).await.unwrap();

        let host = store
            .observable(&Content::domain("abc.example.com"))
            .expect("host domain observable");
        assert!(host.labels.is_empty());
        assert_eq!(host.created_by, Some(seal()));

        let relationships = store.relationships();
        assert_eq!(relationships.len(), 1);
        assert_eq!(relationships[0].from, observable.id);
        assert_eq!(relationships[0].to, host.id);
        assert_eq!(relationships[0].relationship, RelationshipType::RelatedTo);
    }

    #[tokio::test]
    async fn test_host_link_only_on_creation() {
        let store = MemoryStore::new();
        let content = Content::url("http://abc.example.com/");
        let change = ObservableChange::default();

        reconcile(&store, &content, &change).await.unwrap();
        reconcile(&store, &content, &change).await.unwrap();

        assert_eq!(store.relationships().len(), 1);
    }

    #[tokio::test]
    async fn test_existing_host_domain_reused() {
        let store = MemoryStore::new();
        let host = Content::domain("abc.example.com");
        reconcile(&store, &host, &ObservableChange::default().add([TRUSTED_WEB_CONTENT_LABEL]))
            .await
            .unwrap();

        reconcile(&store, &Content::url("https://abc.example.com/x"), &ObservableChange::default())
            .await
            .unwrap();

        // The host keeps its labels and is not re-created.
        let stored = store.observable(&host).unwrap();
        assert!(stored.has_label(TRUSTED_WEB_CONTENT_LABEL));
        let creations = store
            .writes()
            .into_iter()
            .filter(|c| matches!(c, StoreCall::CreateObservable { .. }))
            .count();
        assert_eq!(creations, 2);
    }

    #[tokio::test]
    async fn test_unparseable_url_writes_nothing() {
        let store = MemoryStore::new();
        let change = ObservableChange::default().creator(Some(&seal()));

        let result = reconcile(&store, &Content::url("not a url"), &change).await;

        assert!(matches!(result, Err(seal_isac_core::IsacError::InvalidContent(_))));
        assert!(store.writes().is_empty());
        assert!(store.observable(&Content::url("not a url")).is_none());
    }

    #[tokio::test]
    async fn test_non_web_url_has_no_host() {
        let store = MemoryStore::new();
        reconcile(&store, &Content::url("ipfs://bafybeigdyr"), &ObservableChange::default())
            .await
            .unwrap();
        assert!(store.relationships().is_empty());
    }
}
