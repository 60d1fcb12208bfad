//! Relationship operations.

use seal_isac_core::{RelationshipType, Result, StixId};
use serde::Deserialize;
use serde_json::json;

use crate::OpenCtiClient;

const CREATE_RELATIONSHIP: &str = r"
mutation StixCoreRelationshipAdd($input: StixCoreRelationshipAddInput!) {
  stixCoreRelationshipAdd(input: $input) {
    standard_id
  }
}";

/// Relationship operations
pub struct RelationshipApi<'a> {
    client: &'a OpenCtiClient,
}

impl<'a> RelationshipApi<'a> {
    pub(crate) fn new(client: &'a OpenCtiClient) -> Self {
        Self { client }
    }

    /// Create a relationship and return its id
    pub async fn create(
        &self,
        from: &StixId,
        to: &StixId,
        relationship: RelationshipType,
    ) -> Result<StixId> {
        #[derive(Deserialize)]
        struct Created {
            standard_id: String,
        }
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "stixCoreRelationshipAdd")]
            created: Created,
        }

        let data: Data = self
            .client
            .graphql(
                "StixCoreRelationshipAdd",
                CREATE_RELATIONSHIP,
                json!({
                    "input": {
                        "fromId": from,
                        "toId": to,
                        "relationship_type": relationship.as_str(),
                    }
                }),
            )
            .await?;
        Ok(StixId::new(data.created.standard_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_relationship() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "variables": { "input": {
                    "fromId": "url--a",
                    "toId": "domain-name--b",
                    "relationship_type": "related-to"
                } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "stixCoreRelationshipAdd": { "standard_id": "relationship--c" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenCtiClient::builder("k").host(server.uri()).build().unwrap();
        let id = client
            .relationships()
            .create(
                &StixId::from("url--a"),
                &StixId::from("domain-name--b"),
                RelationshipType::RelatedTo,
            )
            .await
            .unwrap();
        assert_eq!(id.as_str(), "relationship--c");
    }
}
