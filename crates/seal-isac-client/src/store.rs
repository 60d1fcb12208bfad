//! [`Store`] implementation backed by the platform API.

use async_trait::async_trait;
use seal_isac_core::{
    Indicator, IndicatorDraft, IndicatorPatch, Observable, ObservableDraft, RelationshipType,
    Result, StixId, Store,
};
use std::collections::BTreeSet;

use crate::OpenCtiClient;

#[async_trait]
impl Store for OpenCtiClient {
    async fn get_observable(&self, id: &StixId) -> Result<Option<Observable>> {
        self.observables().get(id).await
    }

    async fn create_observable(&self, draft: ObservableDraft) -> Result<Observable> {
        self.observables().create(&draft).await
    }

    async fn add_label(&self, observable: &StixId, label: &StixId) -> Result<BTreeSet<String>> {
        self.observables().add_label(observable, label).await
    }

    async fn delete_label(
        &self,
        observable: &StixId,
        label: &StixId,
    ) -> Result<BTreeSet<String>> {
        self.observables().delete_label(observable, label).await
    }

    async fn get_indicator(&self, id: &StixId) -> Result<Option<Indicator>> {
        self.indicators().get(id).await
    }

    async fn create_indicator(&self, draft: IndicatorDraft) -> Result<Indicator> {
        self.indicators().create(&draft).await
    }

    async fn edit_indicator(&self, id: &StixId, patches: &[IndicatorPatch]) -> Result<Indicator> {
        self.indicators().edit(id, patches).await
    }

    async fn create_relationship(
        &self,
        from: &StixId,
        to: &StixId,
        relationship: RelationshipType,
    ) -> Result<()> {
        self.relationships().create(from, to, relationship).await?;
        Ok(())
    }
}
