//! Cyber-observable operations.

use seal_isac_core::{ContentKind, Observable, ObservableDraft, Result, StixId};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeSet;

use super::{RawLabel, RawRef};
use crate::OpenCtiClient;

const GET_OBSERVABLE: &str = r"
query StixCyberObservable($id: String!) {
  stixCyberObservable(id: $id) {
    standard_id
    objectLabel { value }
    objectMarking { standard_id }
    createdBy { standard_id }
  }
}";

const CREATE_OBSERVABLE: &str = r"
mutation StixCyberObservableAdd(
  $type: String!
  $DomainName: DomainNameAddInput
  $IPv4Addr: IPv4AddrAddInput
  $IPv6Addr: IPv6AddrAddInput
  $Url: UrlAddInput
  $createdBy: String
  $objectMarking: [String]
  $objectLabel: [String]
  $x_opencti_score: Int
) {
  stixCyberObservableAdd(
    type: $type
    DomainName: $DomainName
    IPv4Addr: $IPv4Addr
    IPv6Addr: $IPv6Addr
    Url: $Url
    createdBy: $createdBy
    objectMarking: $objectMarking
    objectLabel: $objectLabel
    x_opencti_score: $x_opencti_score
  ) {
    standard_id
    objectLabel { value }
    objectMarking { standard_id }
    createdBy { standard_id }
  }
}";

const ADD_LABEL: &str = r"
mutation StixCyberObservableLabelAdd($id: ID!, $input: StixRefRelationshipsAddInput!) {
  stixCyberObservableEdit(id: $id) {
    relationsAdd(input: $input) {
      objectLabel { value }
    }
  }
}";

const DELETE_LABEL: &str = r#"
mutation StixCyberObservableLabelDelete($id: ID!, $toId: StixRef!) {
  stixCyberObservableEdit(id: $id) {
    relationDelete(toId: $toId, relationship_type: "object-label") {
      objectLabel { value }
    }
  }
}"#;

#[derive(Deserialize)]
struct RawObservable {
    standard_id: String,
    #[serde(rename = "objectLabel", default)]
    object_label: Option<Vec<RawLabel>>,
    #[serde(rename = "objectMarking", default)]
    object_marking: Option<Vec<RawRef>>,
    #[serde(rename = "createdBy", default)]
    created_by: Option<RawRef>,
}

impl From<RawObservable> for Observable {
    fn from(raw: RawObservable) -> Self {
        Self {
            id: StixId::new(raw.standard_id),
            labels: raw
                .object_label
                .unwrap_or_default()
                .into_iter()
                .map(|l| l.value)
                .collect(),
            markings: raw
                .object_marking
                .unwrap_or_default()
                .into_iter()
                .map(|m| m.standard_id)
                .collect(),
            created_by: raw.created_by.map(|r| StixId::new(r.standard_id)),
        }
    }
}

#[derive(Deserialize)]
struct LabelSet {
    #[serde(rename = "objectLabel", default)]
    object_label: Option<Vec<RawLabel>>,
}

impl LabelSet {
    fn into_names(self) -> BTreeSet<String> {
        self.object_label
            .unwrap_or_default()
            .into_iter()
            .map(|l| l.value)
            .collect()
    }
}

/// GraphQL input variable carrying the kind-specific fields
const fn input_variable(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::DomainName => "DomainName",
        ContentKind::Ipv4Addr => "IPv4Addr",
        ContentKind::Ipv6Addr => "IPv6Addr",
        ContentKind::Url => "Url",
    }
}

/// Variables for `stixCyberObservableAdd`
pub(crate) fn create_variables(draft: &ObservableDraft) -> Value {
    let mut vars = Map::new();
    vars.insert("type".into(), json!(draft.content.kind.platform_type()));
    vars.insert(
        input_variable(draft.content.kind).into(),
        json!({ "value": draft.content.value }),
    );
    vars.insert("objectLabel".into(), json!(draft.labels));
    vars.insert("objectMarking".into(), json!(draft.markings));
    if let Some(creator) = &draft.created_by {
        vars.insert("createdBy".into(), json!(creator));
    }
    if let Some(score) = draft.score {
        vars.insert("x_opencti_score".into(), json!(score));
    }
    Value::Object(vars)
}

/// Cyber-observable operations
pub struct ObservableApi<'a> {
    client: &'a OpenCtiClient,
}

impl<'a> ObservableApi<'a> {
    pub(crate) fn new(client: &'a OpenCtiClient) -> Self {
        Self { client }
    }

    /// Fetch an observable, `None` if it does not exist
    pub async fn get(&self, id: &StixId) -> Result<Option<Observable>> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "stixCyberObservable")]
            observable: Option<RawObservable>,
        }

        let data: Data = self
            .client
            .graphql("StixCyberObservable", GET_OBSERVABLE, json!({ "id": id }))
            .await?;
        Ok(data.observable.map(Into::into))
    }

    /// Create an observable
    pub async fn create(&self, draft: &ObservableDraft) -> Result<Observable> {
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "stixCyberObservableAdd")]
            observable: RawObservable,
        }

        let data: Data = self
            .client
            .graphql(
                "StixCyberObservableAdd",
                CREATE_OBSERVABLE,
                create_variables(draft),
            )
            .await?;
        Ok(data.observable.into())
    }

    /// Attach a label and return the updated label names
    pub async fn add_label(&self, id: &StixId, label: &StixId) -> Result<BTreeSet<String>> {
        #[derive(Deserialize)]
        struct Edit {
            #[serde(rename = "relationsAdd")]
            result: LabelSet,
        }
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "stixCyberObservableEdit")]
            edit: Edit,
        }

        let data: Data = self
            .client
            .graphql(
                "StixCyberObservableLabelAdd",
                ADD_LABEL,
                json!({
                    "id": id,
                    "input": { "toIds": [label], "relationship_type": "object-label" },
                }),
            )
            .await?;
        Ok(data.edit.result.into_names())
    }

    /// Detach a label and return the updated label names
    pub async fn delete_label(&self, id: &StixId, label: &StixId) -> Result<BTreeSet<String>> {
        #[derive(Deserialize)]
        struct Edit {
            #[serde(rename = "relationDelete")]
            result: LabelSet,
        }
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "stixCyberObservableEdit")]
            edit: Edit,
        }

        let data: Data = self
            .client
            .graphql(
                "StixCyberObservableLabelDelete",
                DELETE_LABEL,
                json!({ "id": id, "toId": label }),
            )
            .await?;
        Ok(data.edit.result.into_names())
    }
}
