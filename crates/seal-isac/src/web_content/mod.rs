//! Three-state reputation (unknown / blocked / trusted) for web content.
//!
//! Blocking is expressed as an active indicator; trust as the
//! `trusted web content` label on the observable. The operations here
//! compose the observable and indicator reconcilers into state transitions:
//!
//! | operation | result |
//! |-----------|--------|
//! | `block`   | blocked, from any state; trust and legacy labels stripped |
//! | `unblock` | unknown from blocked; no-op otherwise |
//! | `trust`   | trusted, from any state; active indicator revoked |
//! | `untrust` | unknown, or blocked if an active indicator is still there |

mod indicator;
mod observable;

pub use indicator::{validity_window, ACTIVE_SCORE, REVOKED_SCORE};
pub use observable::ObservableChange;
pub(crate) use observable::{create as create_observable, update as update_observable};

use futures_util::future::try_join;
use seal_isac_core::{
    all_reputation_label_names, Content, Indicator, LegacyLabel, Observable, ReputationLabel,
    Result, StixId, Status, Store,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Everything the store holds about one piece of content
#[derive(Debug, Clone, Serialize)]
pub struct ReputationSnapshot {
    /// The content looked up
    pub content: Content,
    /// Resolved status
    pub status: Status,
    /// Observable, if one exists
    pub observable: Option<Observable>,
    /// Indicator, if one was ever created
    pub indicator: Option<Indicator>,
}

/// Reputation operations for domains, IP addresses and URLs
pub struct WebContentClient<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for WebContentClient<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: Store> WebContentClient<S> {
    /// Wrap a store
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<S: Store + ?Sized> WebContentClient<S> {
    /// Wrap a shared store
    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read observable and indicator concurrently and resolve the status
    #[instrument(skip_all, fields(content = %content))]
    pub async fn snapshot(&self, content: &Content) -> Result<ReputationSnapshot> {
        let observable_id = content.observable_id();
        let indicator_id = content.indicator_id();
        let (observable, indicator) = try_join(
            self.store.get_observable(&observable_id),
            self.store.get_indicator(&indicator_id),
        )
        .await?;

        let status = Status::resolve(observable.as_ref(), indicator.as_ref());
        Ok(ReputationSnapshot {
            content: content.clone(),
            status,
            observable,
            indicator,
        })
    }

    /// Current status of `content`
    pub async fn status(&self, content: &Content) -> Result<Status> {
        Ok(self.snapshot(content).await?.status)
    }

    /// Block `content`: strip every reputation label, then make sure an
    /// active indicator exists.
    #[instrument(skip_all, fields(content = %content))]
    pub async fn block(&self, content: &Content, creator: &StixId) -> Result<Indicator> {
        let change = ObservableChange::remove(all_reputation_label_names()).creator(Some(creator));
        let observable = observable::reconcile(self.store.as_ref(), content, &change).await?;
        let indicator =
            indicator::reconcile(self.store.as_ref(), content, Some(creator), &observable).await?;

        info!(indicator = %indicator.id, "blocked");
        Ok(indicator)
    }

    /// Revoke an active indicator. Observable labels are left alone.
    ///
    /// Returns `None` if no indicator was ever created.
    #[instrument(skip_all, fields(content = %content))]
    pub async fn unblock(&self, content: &Content) -> Result<Option<Indicator>> {
        let indicator = indicator::revoke(self.store.as_ref(), content).await?;
        if indicator.is_some() {
            info!("unblocked");
        }
        Ok(indicator)
    }

    /// Trust `content`: revoke any active indicator, then label it trusted.
    #[instrument(skip_all, fields(content = %content))]
    pub async fn trust(&self, content: &Content, creator: &StixId) -> Result<Observable> {
        self.unblock(content).await?;

        let change = ObservableChange::remove(LegacyLabel::ALL.map(LegacyLabel::as_str))
            .add([ReputationLabel::Trusted.as_str()])
            .creator(Some(creator));
        let observable = observable::reconcile(self.store.as_ref(), content, &change).await?;

        info!(observable = %observable.id, "trusted");
        Ok(observable)
    }

    /// Strip trust and legacy labels. The indicator is not touched, so an
    /// active one makes the content read as blocked again.
    ///
    /// Returns `None` if the observable does not exist.
    #[instrument(skip_all, fields(content = %content))]
    pub async fn untrust(&self, content: &Content) -> Result<Option<Observable>> {
        let Some(existing) = self.store.get_observable(&content.observable_id()).await? else {
            return Ok(None);
        };

        let change = ObservableChange::remove(all_reputation_label_names());
        let observable = observable::update(self.store.as_ref(), existing, &change).await?;

        info!(observable = %observable.id, "untrusted");
        Ok(Some(observable))
    }
}
