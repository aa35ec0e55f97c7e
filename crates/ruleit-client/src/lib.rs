//! RuleIt Client - HTTP/JSON boundary to the rule service
//!
//! This crate owns everything that crosses the wire: the typed request and
//! response models (including the service's asymmetric response field
//! names, normalized into one [`RuleSummary`] at the boundary), the
//! stateless [`RuleApiGateway`], and the [`RuleListCache`] over the paged
//! listing. The editor core in `ruleit-core` stays pure; this crate feeds
//! it token sequences and submits the text it produces.
//!
//! # Quick Start
//!
//! ```no_run
//! use ruleit_client::{ClientConfig, RuleApiGateway};
//!
//! # async fn demo() -> ruleit_client::Result<()> {
//! let gateway = RuleApiGateway::new(ClientConfig::new("http://localhost:8000/"))?;
//!
//! let rule = gateway.create_rule("adults", "age > 18").await?;
//! let passed = gateway
//!     .evaluate(rule.id, serde_json::json!({"age": 20}))
//!     .await?;
//! assert!(passed);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod gateway;
pub mod list;
pub mod models;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
pub use gateway::RuleApiGateway;
pub use list::{RuleListCache, PAGE_SIZE};
pub use models::{
    decode_evaluation_result, parse_evaluation_input, RulePage, RuleSummary,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
