//! Mount pathname parser.

use async_trait::async_trait;

use crate::config::MountPathnameConfig;
use crate::context::error::BoxError;
use crate::context::incoming::InboundRequest;
use crate::context::parsers::Parser;
use crate::context::pathname::pathname_builder;
use crate::context::value::ContextValue;

/// Resolves the pathname the component is mounted at.
#[derive(Debug, Clone)]
pub struct MountPathnameParser {
    pathname: String,
}

impl MountPathnameParser {
    pub fn new(config: &MountPathnameConfig) -> Self {
        Self {
            pathname: pathname_builder([config.pathname.as_str()]),
        }
    }
}

#[async_trait]
impl Parser for MountPathnameParser {
    async fn parse(&self, _incoming: &InboundRequest) -> Result<ContextValue, BoxError> {
        Ok(ContextValue::Text(self.pathname.clone()))
    }
}
