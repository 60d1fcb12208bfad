//! Deprecated two-list scheme for domains only.
//!
//! Reputation here lives entirely in the `blocklisted domain` and
//! `allowlisted domain` labels; no indicator is ever written. New code should
//! use [`WebContentClient`](crate::WebContentClient), which still honors
//! these labels when resolving status.

use seal_isac_core::{Content, LegacyLabel, LegacyStatus, Observable, Result, StixId, Store};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::web_content::{create_observable, update_observable, ObservableChange};

/// Score the legacy scheme records on observables it creates
const LEGACY_SCORE: u8 = 100;

/// Blocklist/allowlist operations on domain names
pub struct LegacyClient<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for LegacyClient<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> LegacyClient<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<S: Store + ?Sized> LegacyClient<S> {
    /// Wrap a shared store
    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Which list, if any, the domain is on
    pub async fn get_domain_status(&self, domain: &str) -> Result<LegacyStatus> {
        let observable = self
            .store
            .get_observable(&Content::domain(domain).observable_id())
            .await?;
        Ok(LegacyStatus::resolve(observable.as_ref()))
    }

    /// Put the domain on the blocklist, taking it off the allowlist
    pub async fn add_to_blocklist(&self, domain: &str, creator: &StixId) -> Result<Observable> {
        self.add_to(LegacyLabel::Blocklisted, domain, creator).await
    }

    /// Take the domain off the blocklist
    pub async fn remove_from_blocklist(&self, domain: &str) -> Result<Option<Observable>> {
        self.remove_from(LegacyLabel::Blocklisted, domain).await
    }

    /// Put the domain on the allowlist, taking it off the blocklist
    pub async fn add_to_allowlist(&self, domain: &str, creator: &StixId) -> Result<Observable> {
        self.add_to(LegacyLabel::Allowlisted, domain, creator).await
    }

    /// Take the domain off the allowlist
    pub async fn remove_from_allowlist(&self, domain: &str) -> Result<Option<Observable>> {
        self.remove_from(LegacyLabel::Allowlisted, domain).await
    }

    /// Leaves the opposite list before joining this one; the domain is
    /// never on both.
    #[instrument(skip(self, creator))]
    async fn add_to(&self, list: LegacyLabel, domain: &str, creator: &StixId) -> Result<Observable> {
        let store = self.store.as_ref();
        let content = Content::domain(domain);

        let observable = match store.get_observable(&content.observable_id()).await? {
            Some(existing) => {
                let leave = ObservableChange::remove([list.opposite().as_str()]);
                let cleared = update_observable(store, existing, &leave).await?;
                let join = ObservableChange::default().add([list.as_str()]);
                update_observable(store, cleared, &join).await?
            }
            None => {
                let change = ObservableChange {
                    creator: Some(creator.clone()),
                    add_labels: vec![list.as_str()],
                    remove_labels: Vec::new(),
                    score: Some(LEGACY_SCORE),
                };
                create_observable(store, &content, &change).await?
            }
        };

        info!(label = list.as_str(), "added to list");
        Ok(observable)
    }

    #[instrument(skip(self))]
    async fn remove_from(&self, list: LegacyLabel, domain: &str) -> Result<Option<Observable>> {
        let content = Content::domain(domain);
        let Some(existing) = self.store.get_observable(&content.observable_id()).await? else {
            return Ok(None);
        };

        let change = ObservableChange::remove([list.as_str()]);
        let observable = update_observable(self.store.as_ref(), existing, &change).await?;

        info!(label = list.as_str(), "removed from list");
        Ok(Some(observable))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryStore, StoreCall};
    use seal_isac_core::{ids, ALLOWLISTED_DOMAIN_LABEL, BLOCKLISTED_DOMAIN_LABEL};

    fn seal() -> StixId {
        ids::identity_id("SEAL", "organization")
    }

    #[tokio::test]
    async fn test_blocklist_creation_records_score() {
        let client = LegacyClient::new(MemoryStore::new());
        client.add_to_blocklist("a.invalid", &seal()).await.unwrap();

        assert_eq!(
            client.store().writes(),
            vec![StoreCall::CreateObservable {
                id: Content::domain("a.invalid").observable_id(),
                labels: vec![BLOCKLISTED_DOMAIN_LABEL.to_string()],
            }]
        );
        assert_eq!(
            client.get_domain_status("a.invalid").await.unwrap(),
            LegacyStatus::Blocklisted
        );
    }

    #[tokio::test]
    async fn test_lists_are_exclusive() {
        let client = LegacyClient::new(MemoryStore::new());
        client.add_to_allowlist("b.invalid", &seal()).await.unwrap();
        let observable = client.add_to_blocklist("b.invalid", &seal()).await.unwrap();

        assert!(observable.has_label(BLOCKLISTED_DOMAIN_LABEL));
        assert_eq!(observable.labels.len(), 1);
    }

    #[tokio::test]
    async fn test_switching_lists_removes_before_adding() {
        let client = LegacyClient::new(MemoryStore::new());
        client.add_to_allowlist("d.invalid", &seal()).await.unwrap();
        client.store().clear_calls();

        client.add_to_blocklist("d.invalid", &seal()).await.unwrap();

        let id = Content::domain("d.invalid").observable_id();
        assert_eq!(
            client.store().writes(),
            vec![
                StoreCall::DeleteLabel {
                    observable: id.clone(),
                    label: ALLOWLISTED_DOMAIN_LABEL.to_string(),
                },
                StoreCall::AddLabel {
                    observable: id,
                    label: BLOCKLISTED_DOMAIN_LABEL.to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_relisting_is_quiet() {
        let client = LegacyClient::new(MemoryStore::new());
        client.add_to_blocklist("e.invalid", &seal()).await.unwrap();
        client.store().clear_calls();

        client.add_to_blocklist("e.invalid", &seal()).await.unwrap();

        assert!(client.store().writes().is_empty());
    }

    #[tokio::test]
    async fn test_remove_from_absent_domain() {
        let client = LegacyClient::new(MemoryStore::new());
        assert!(client.remove_from_blocklist("c.invalid").await.unwrap().is_none());
        assert!(client.remove_from_allowlist("c.invalid").await.unwrap().is_none());
        assert!(client.store().writes().is_empty());
    }
}
