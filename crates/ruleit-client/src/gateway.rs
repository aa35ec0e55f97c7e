//! The rule-service gateway
//!
//! [`RuleApiGateway`] is a stateless request/response mapping over the
//! remote HTTP/JSON contract: one round trip per call, no retries, no
//! caching of individual reads. Every mutating call returns the server's
//! updated [`RuleSummary`] so the caller can replace its token sequence
//! wholesale and start a fresh editing round.

use ruleit_core::{CoreError, Operator, RuleExpression};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::{
    decode_evaluation_result, ApiErrorBody, CombineRulesRequest, CreateRuleRequest,
    EditRuleRequest, EvaluateRuleRequest, EvaluateRuleResponse, RuleListResponse,
    RuleMutationResponse, RulePage, RuleRecord, RuleSummary,
};

/// Client for the remote rule-storage/evaluation service.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct RuleApiGateway {
    config: ClientConfig,
    http: reqwest::Client,
}

impl RuleApiGateway {
    /// Build a gateway from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { config, http })
    }

    /// Gateway against the default development server.
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// The configuration this gateway was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a single rule from raw rule text.
    pub async fn create_rule(&self, name: &str, rule_string: &str) -> Result<RuleSummary> {
        let request = CreateRuleRequest {
            rule_name: name.to_string(),
            rule_string: rule_string.to_string(),
        };
        debug!(rule_name = %name, "creating rule");
        let response: RuleMutationResponse = self.post("/api/create-rule/", &request).await?;
        Ok(response.into())
    }

    /// Combine independent rule strings with connectives into one rule.
    ///
    /// The operator count is validated locally before anything is sent:
    /// a mismatch never reaches the network.
    pub async fn combine_rules(
        &self,
        name: &str,
        rule_strings: Vec<String>,
        operators: Vec<Operator>,
    ) -> Result<RuleSummary> {
        if rule_strings.is_empty() {
            return Err(CoreError::EmptyExpression.into());
        }
        if operators.len() != rule_strings.len() - 1 {
            return Err(CoreError::OperatorCountMismatch {
                fragments: rule_strings.len(),
                operators: operators.len(),
            }
            .into());
        }
        let request = CombineRulesRequest {
            rule_name: name.to_string(),
            rule_strings,
            operators,
        };
        debug!(rule_name = %name, fragments = request.rule_strings.len(), "combining rules");
        let response: RuleMutationResponse = self.post("/api/combine-rules/", &request).await?;
        Ok(response.into())
    }

    /// Submit an assembled expression, dispatching on its shape: a single
    /// fragment goes to the create endpoint, anything else to combine.
    pub async fn submit(&self, expression: &RuleExpression) -> Result<RuleSummary> {
        match expression {
            RuleExpression::Single { name, rule } => self.create_rule(name, rule).await,
            RuleExpression::Combined {
                name,
                rules,
                operators,
            } => {
                self.combine_rules(name, rules.clone(), operators.clone())
                    .await
            }
        }
    }

    /// Fetch one page (1-indexed, 10 rules per page) of the rule listing.
    pub async fn fetch_page(&self, page: u32) -> Result<RulePage> {
        let response: RuleListResponse = self.get(&format!("/api/rules/?page={page}")).await?;
        Ok(response.into())
    }

    /// Fetch a single stored rule by id.
    pub async fn fetch_rule(&self, id: i64) -> Result<RuleSummary> {
        let response: RuleRecord = self.get(&format!("/api/rules/{id}/")).await?;
        Ok(response.into())
    }

    /// Replace a stored rule's text, returning its re-tokenized summary.
    pub async fn edit_rule(&self, id: i64, rule_string: &str) -> Result<RuleSummary> {
        let request = EditRuleRequest {
            rule_id: id,
            rule_string: rule_string.to_string(),
        };
        debug!(rule_id = id, "editing rule");
        let response: RuleMutationResponse = self.post("/api/edit-rule/", &request).await?;
        Ok(response.into())
    }

    /// Evaluate a stored rule against already-parsed input data.
    pub async fn evaluate(&self, id: i64, data: Value) -> Result<bool> {
        self.evaluate_request(EvaluateRuleRequest {
            rule_id: Some(id),
            rule_name: None,
            data,
        })
        .await
    }

    /// Evaluate a stored rule addressed by its unique name.
    pub async fn evaluate_by_name(&self, name: &str, data: Value) -> Result<bool> {
        self.evaluate_request(EvaluateRuleRequest {
            rule_id: None,
            rule_name: Some(name.to_string()),
            data,
        })
        .await
    }

    async fn evaluate_request(&self, request: EvaluateRuleRequest) -> Result<bool> {
        let response: EvaluateRuleResponse = self.post("/api/evaluate-rule/", &request).await?;
        decode_evaluation_result(&response.result)
    }

    // --- transport ------------------------------------------------------

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let response = self
            .http
            .post(self.config.endpoint(path))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let response = self.http.get(self.config.endpoint(path)).send().await?;
        Self::decode(response).await
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(Self::error_message(response).await));
        }
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: Self::error_message(response).await,
            });
        }
        response
            .json::<R>()
            .await
            .map_err(|e| ClientError::UnexpectedResponse(e.to_string()))
    }

    /// Pull the `error` field out of a failure body, falling back to the
    /// raw text when the body is not the documented shape.
    async fn error_message(response: reqwest::Response) -> String {
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str::<ApiErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> RuleApiGateway {
        RuleApiGateway::new(ClientConfig::new("http://rules.example.com")).unwrap()
    }

    #[tokio::test]
    async fn test_combine_operator_mismatch_fails_before_any_request() {
        // The base URL is unroutable on purpose: a validation failure must
        // surface without a connection attempt.
        let err = gateway()
            .combine_rules(
                "bad",
                vec!["a > 1".to_string(), "b > 2".to_string()],
                vec![],
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(CoreError::OperatorCountMismatch {
                fragments: 2,
                operators: 0,
            })
        ));
    }

    #[tokio::test]
    async fn test_combine_with_no_fragments_fails_locally() {
        let err = gateway()
            .combine_rules("empty", vec![], vec![])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(CoreError::EmptyExpression)
        ));
    }

    #[test]
    fn test_endpoints_match_the_service_routes() {
        let g = gateway();
        assert_eq!(
            g.config().endpoint("/api/rules/?page=3"),
            "http://rules.example.com/api/rules/?page=3"
        );
        assert_eq!(
            g.config().endpoint("/api/rules/42/"),
            "http://rules.example.com/api/rules/42/"
        );
    }
}
