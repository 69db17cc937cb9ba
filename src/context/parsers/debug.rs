//! Debug flag parser.

use async_trait::async_trait;

use crate::config::DebugConfig;
use crate::context::error::BoxError;
use crate::context::incoming::InboundRequest;
use crate::context::parsers::Parser;
use crate::context::value::ContextValue;

/// Resolves the debug flag as `"true"` or `"false"`.
#[derive(Debug, Clone)]
pub struct DebugParser {
    value: String,
}

impl DebugParser {
    pub fn new(config: &DebugConfig) -> Self {
        Self {
            value: config.enabled.to_string(),
        }
    }
}

#[async_trait]
impl Parser for DebugParser {
    async fn parse(&self, _incoming: &InboundRequest) -> Result<ContextValue, BoxError> {
        Ok(ContextValue::Text(self.value.clone()))
    }
}
