//! Requested-by parser.

use async_trait::async_trait;

use crate::context::error::{BoxError, ContextError, ContextResult};
use crate::context::incoming::InboundRequest;
use crate::context::parsers::Parser;
use crate::context::value::ContextValue;

/// Tells a downstream podlet which component is requesting it.
#[derive(Debug, Clone)]
pub struct RequestedByParser {
    name: String,
}

impl RequestedByParser {
    pub fn new(name: impl Into<String>) -> ContextResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ContextError::Contract("You must provide a value to \"name\"".into()));
        }
        Ok(Self { name })
    }
}

#[async_trait]
impl Parser for RequestedByParser {
    async fn parse(&self, _incoming: &InboundRequest) -> Result<ContextValue, BoxError> {
        Ok(ContextValue::Text(self.name.clone()))
    }
}
