//! Indicator reconciliation: create, refresh and revoke detection patterns.

use chrono::{Duration, Utc};
use seal_isac_core::{
    Content, Indicator, IndicatorDraft, IndicatorPatch, Observable, RelationshipType, Result,
    StixId, Store,
};
use tracing::debug;

/// Score of an active indicator
pub const ACTIVE_SCORE: u8 = 100;

/// Score written to revoke an indicator
pub const REVOKED_SCORE: u8 = 0;

/// How long an indicator stays valid after each refresh
#[must_use]
pub fn validity_window() -> Duration {
    Duration::days(365)
}

/// Make sure an active, full-score indicator exists for `content`.
///
/// An existing indicator (revoked or not) gets a fresh validity window and
/// is un-revoked. A new one is linked `based-on` to `observable`; that link
/// is made only at creation.
pub(crate) async fn reconcile<S: Store + ?Sized>(
    store: &S,
    content: &Content,
    creator: Option<&StixId>,
    observable: &Observable,
) -> Result<Indicator> {
    let now = Utc::now();
    let valid_until = now + validity_window();

    if let Some(existing) = store.get_indicator(&content.indicator_id()).await? {
        debug!(indicator = %existing.id, "refreshing indicator");
        return store
            .edit_indicator(
                &existing.id,
                &[
                    IndicatorPatch::ValidFrom(now),
                    IndicatorPatch::ValidUntil(valid_until),
                    IndicatorPatch::Score(ACTIVE_SCORE),
                    IndicatorPatch::Revoked(false),
                ],
            )
            .await;
    }

    let indicator = store
        .create_indicator(IndicatorDraft {
            name: content.value.clone(),
            pattern: content.pattern(),
            main_observable_type: content.kind,
            score: ACTIVE_SCORE,
            valid_from: now,
            valid_until,
            created_by: creator.cloned(),
        })
        .await?;
    debug!(indicator = %indicator.id, "created indicator");

    store
        .create_relationship(&indicator.id, &observable.id, RelationshipType::BasedOn)
        .await?;

    Ok(indicator)
}

/// Revoke the indicator for `content` if it is still active.
///
/// Returns `None` when no indicator was ever created. Validity and the
/// `based-on` link are left as they are.
pub(crate) async fn revoke<S: Store + ?Sized>(
    store: &S,
    content: &Content,
) -> Result<Option<Indicator>> {
    let Some(indicator) = store.get_indicator(&content.indicator_id()).await? else {
        return Ok(None);
    };
    if indicator.is_revoked() {
        return Ok(Some(indicator));
    }

    debug!(indicator = %indicator.id, "revoking indicator");
    store
        .edit_indicator(&indicator.id, &[IndicatorPatch::Score(REVOKED_SCORE)])
        .await
        .map(Some)
}
