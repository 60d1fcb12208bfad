//! The contract a threat-intel graph store must fulfil.

use async_trait::async_trait;
use std::collections::BTreeSet;

use crate::ids::StixId;
use crate::types::{
    Indicator, IndicatorDraft, IndicatorPatch, Observable, ObservableDraft, RelationshipType,
};
use crate::Result;

/// Node, label and relationship operations on a threat-intel store.
///
/// Lookups return `Ok(None)` when nothing exists under the id. Every other
/// failure is an error and is never retried by callers.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch an observable by id
    async fn get_observable(&self, id: &StixId) -> Result<Option<Observable>>;

    /// Create an observable
    async fn create_observable(&self, draft: ObservableDraft) -> Result<Observable>;

    /// Attach a label, returning the observable's updated label names
    async fn add_label(&self, observable: &StixId, label: &StixId) -> Result<BTreeSet<String>>;

    /// Detach a label, returning the observable's updated label names
    async fn delete_label(&self, observable: &StixId, label: &StixId)
        -> Result<BTreeSet<String>>;

    /// Fetch an indicator by id
    async fn get_indicator(&self, id: &StixId) -> Result<Option<Indicator>>;

    /// Create an indicator
    async fn create_indicator(&self, draft: IndicatorDraft) -> Result<Indicator>;

    /// Apply field patches to an indicator
    async fn edit_indicator(&self, id: &StixId, patches: &[IndicatorPatch]) -> Result<Indicator>;

    /// Create a relationship between two nodes
    async fn create_relationship(
        &self,
        from: &StixId,
        to: &StixId,
        relationship: RelationshipType,
    ) -> Result<()>;
}
