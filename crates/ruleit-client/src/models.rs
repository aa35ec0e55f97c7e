//! Wire models for the remote rule service
//!
//! The service answers with two different field layouts for the same
//! logical record: list/get responses use `id`/`rule_root`, while
//! create/combine/edit responses use `rule_id`/`rule_root_id`. That
//! asymmetry is part of the contract, so both raw shapes exist here and
//! both normalize into the single [`RuleSummary`] the rest of the client
//! works with. Nothing outside this module sees a raw response shape.

use ruleit_core::Operator;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, Result};

// --- request bodies ----------------------------------------------------

/// POST `/api/create-rule/`
#[derive(Debug, Clone, Serialize)]
pub struct CreateRuleRequest {
    pub rule_name: String,
    pub rule_string: String,
}

/// POST `/api/combine-rules/`
#[derive(Debug, Clone, Serialize)]
pub struct CombineRulesRequest {
    pub rule_name: String,
    pub rule_strings: Vec<String>,
    pub operators: Vec<Operator>,
}

/// POST `/api/edit-rule/`
#[derive(Debug, Clone, Serialize)]
pub struct EditRuleRequest {
    pub rule_id: i64,
    pub rule_string: String,
}

/// POST `/api/evaluate-rule/`
///
/// The rule is addressed by id or by unique name - exactly one of the two
/// keys is serialized.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateRuleRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    pub data: Value,
}

// --- raw response shapes ------------------------------------------------

/// One rule as it appears in list and get responses.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleRecord {
    pub id: i64,
    #[serde(default)]
    pub rule_name: Option<String>,
    pub rule_root: i64,
    pub rule_tokens: Vec<String>,
}

/// Response body of create, combine, and edit.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleMutationResponse {
    pub rule_id: i64,
    #[serde(default)]
    pub rule_name: Option<String>,
    pub rule_root_id: i64,
    pub rule_tokens: Vec<String>,
}

/// GET `/api/rules/?page={n}`
#[derive(Debug, Clone, Deserialize)]
pub struct RuleListResponse {
    pub results: Vec<RuleRecord>,
    pub count: u64,
}

/// POST `/api/evaluate-rule/` response; `result` needs a second decode,
/// see [`decode_evaluation_result`].
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateRuleResponse {
    pub result: Value,
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

// --- normalized client-side views ---------------------------------------

/// The canonical materialized view of a stored rule.
///
/// Always carries a flat token sequence, never pre-joined text - the
/// editor re-tokenizes from here rather than re-parsing a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSummary {
    /// Server-assigned rule id
    pub id: i64,
    /// Rule name
    pub name: String,
    /// Id of the root node of the server-side rule tree
    pub root_id: i64,
    /// The rule as an ordered token sequence
    pub tokens: Vec<String>,
}

impl From<RuleRecord> for RuleSummary {
    fn from(raw: RuleRecord) -> Self {
        Self {
            id: raw.id,
            name: raw.rule_name.unwrap_or_default(),
            root_id: raw.rule_root,
            tokens: raw.rule_tokens,
        }
    }
}

impl From<RuleMutationResponse> for RuleSummary {
    fn from(raw: RuleMutationResponse) -> Self {
        Self {
            id: raw.rule_id,
            name: raw.rule_name.unwrap_or_default(),
            root_id: raw.rule_root_id,
            tokens: raw.rule_tokens,
        }
    }
}

/// One page of the rule listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePage {
    /// The rules on this page, in server order
    pub results: Vec<RuleSummary>,
    /// Total number of rules across all pages
    pub count: u64,
}

impl From<RuleListResponse> for RulePage {
    fn from(raw: RuleListResponse) -> Self {
        Self {
            results: raw.results.into_iter().map(RuleSummary::from).collect(),
            count: raw.count,
        }
    }
}

// --- evaluation helpers --------------------------------------------------

/// Parse caller-supplied evaluation input before it goes anywhere near the
/// network. Malformed JSON text is an [`ClientError::InvalidJson`].
pub fn parse_evaluation_input(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| ClientError::InvalidJson(e.to_string()))
}

/// Decode the `result` field of an evaluation response.
///
/// The field is itself a JSON-encoded boolean: either a bare boolean or a
/// string holding a boolean literal (`"true"` / `"false"`), depending on
/// how the server serialized it. Anything else breaks the contract.
pub fn decode_evaluation_result(value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => serde_json::from_str::<bool>(s).map_err(|_| {
            ClientError::UnexpectedResponse(format!("evaluation result is not a boolean: {s:?}"))
        }),
        other => Err(ClientError::UnexpectedResponse(format!(
            "evaluation result is not a boolean: {other}"
        ))),
    }
}
