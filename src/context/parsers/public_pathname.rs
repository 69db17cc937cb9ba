//! Public pathname parser.

use async_trait::async_trait;

use crate::config::PublicPathnameConfig;
use crate::context::error::BoxError;
use crate::context::incoming::InboundRequest;
use crate::context::parsers::Parser;
use crate::context::value::{AssetPathname, ContextValue};

/// Resolves a builder for public asset pathnames (`<pathname>/<prefix>/<asset>`).
#[derive(Debug, Clone)]
pub struct PublicPathnameParser {
    pathname: AssetPathname,
}

impl PublicPathnameParser {
    pub fn new(config: &PublicPathnameConfig) -> Self {
        Self {
            pathname: AssetPathname::new(&config.pathname, &config.prefix),
        }
    }
}

#[async_trait]
impl Parser for PublicPathnameParser {
    async fn parse(&self, _incoming: &InboundRequest) -> Result<ContextValue, BoxError> {
        Ok(ContextValue::Pathname(self.pathname.clone()))
    }
}
