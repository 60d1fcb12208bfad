//! Indicator operations.

use chrono::{DateTime, Utc};
use seal_isac_core::{Indicator, IndicatorDraft, IndicatorPatch, Result, StixId};
use serde::Deserialize;
use serde_json::{json, Value};

use super::RawRef;
use crate::OpenCtiClient;

const GET_INDICATOR: &str = r"
query Indicator($id: String!) {
  indicator(id: $id) {
    standard_id
    pattern
    valid_from
    valid_until
    x_opencti_score
    revoked
    createdBy { standard_id }
  }
}";

const CREATE_INDICATOR: &str = r"
mutation IndicatorAdd($input: IndicatorAddInput!) {
  indicatorAdd(input: $input) {
    standard_id
    pattern
    valid_from
    valid_until
    x_opencti_score
    revoked
    createdBy { standard_id }
  }
}";

const EDIT_INDICATOR: &str = r"
mutation IndicatorFieldPatch($id: ID!, $input: [EditInput]!) {
  indicatorFieldPatch(id: $id, input: $input) {
    standard_id
    pattern
    valid_from
    valid_until
    x_opencti_score
    revoked
    createdBy { standard_id }
  }
}";

#[derive(Deserialize)]
struct RawIndicator {
    standard_id: String,
    pattern: String,
    #[serde(default)]
    valid_from: Option<DateTime<Utc>>,
    #[serde(default)]
    valid_until: Option<DateTime<Utc>>,
    #[serde(default)]
    x_opencti_score: Option<u8>,
    #[serde(default)]
    revoked: Option<bool>,
    #[serde(rename = "createdBy", default)]
    created_by: Option<RawRef>,
}

impl From<RawIndicator> for Indicator {
    fn from(raw: RawIndicator) -> Self {
        Self {
            id: StixId::new(raw.standard_id),
            pattern: raw.pattern,
            valid_from: raw.valid_from,
            valid_until: raw.valid_until,
            score: raw.x_opencti_score,
            revoked: raw.revoked.unwrap_or(false),
            created_by: raw.created_by.map(|r| StixId::new(r.standard_id)),
        }
    }
}

/// Input for `indicatorAdd`
pub(crate) fn create_input(draft: &IndicatorDraft) -> Value {
    let mut input = json!({
        "name": draft.name,
        "pattern_type": IndicatorDraft::PATTERN_TYPE,
        "pattern": draft.pattern,
        "x_opencti_main_observable_type": draft.main_observable_type.platform_type(),
        "x_opencti_score": draft.score,
        "valid_from": draft.valid_from.to_rfc3339(),
        "valid_until": draft.valid_until.to_rfc3339(),
    });
    if let Some(creator) = &draft.created_by {
        input["createdBy"] = json!(creator);
    }
    input
}

/// Input for `indicatorFieldPatch`
pub(crate) fn patch_input(patches: &[IndicatorPatch]) -> Value {
    Value::Array(
        patches
            .iter()
            .map(|p| json!({ "key": p.key(), "value": p.values() }))
            .collect(),
    )
}

/// Indicator operations
pub struct IndicatorApi<'a> {
    client: &'a OpenCtiClient,
}

impl<'a> IndicatorApi<'a> {
    pub(crate) fn new(client: &'a OpenCtiClient) -> Self {
        Self { client }
    }

    /// Fetch an indicator, `None` if it does not exist
    pub async fn get(&self, id: &StixId) -> Result<Option<Indicator>> {
        #[derive(Deserialize)]
        struct Data {
            indicator: Option<RawIndicator>,
        }

        let data: Data = self
            .client
            .graphql("Indicator", GET_INDICATOR, json!({ "id": id }))
            .await?;
        Ok(data.indicator.map(Into::into))
    }

    /// Create an indicator
    pub async fn create(&self, draft: &IndicatorDraft) -> Result<Indicator> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "indicatorAdd")]
            indicator: RawIndicator,
        }

        let data: Data = self
            .client
            .graphql(
                "IndicatorAdd",
                CREATE_INDICATOR,
                json!({ "input": create_input(draft) }),
            )
            .await?;
        Ok(data.indicator.into())
    }

    /// Patch indicator fields
    pub async fn edit(&self, id: &StixId, patches: &[IndicatorPatch]) -> Result<Indicator> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "indicatorFieldPatch")]
            indicator: RawIndicator,
        }

        let data: Data = self
            .client
            .graphql(
                "IndicatorFieldPatch",
                EDIT_INDICATOR,
                json!({ "id": id, "input": patch_input(patches) }),
            )
            .await?;
        Ok(data.indicator.into())
    }
}
