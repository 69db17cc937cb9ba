//! Locale parser.

use async_trait::async_trait;

use crate::config::LocaleConfig;
use crate::context::bcp47;
use crate::context::error::{BoxError, ContextError, ContextResult};
use crate::context::incoming::InboundRequest;
use crate::context::parsers::Parser;
use crate::context::value::ContextValue;

/// Resolves the locale from the `locale` route parameter, falling back to
/// the configured default.
///
/// Only the default is validated; route values are passed through as-is.
#[derive(Debug, Clone)]
pub struct LocaleParser {
    locale: String,
}

impl LocaleParser {
    pub fn new(config: &LocaleConfig) -> ContextResult<Self> {
        if !bcp47::is_valid(&config.locale) {
            return Err(ContextError::Validation(format!(
                "Value provided to \"locale\" is not a valid locale: {}",
                config.locale
            )));
        }
        Ok(Self {
            locale: config.locale.clone(),
        })
    }
}

#[async_trait]
impl Parser for LocaleParser {
    async fn parse(&self, incoming: &InboundRequest) -> Result<ContextValue, BoxError> {
        let locale = incoming
            .params
            .get("locale")
            .filter(|l| !l.is_empty())
            .unwrap_or(&self.locale);
        Ok(ContextValue::Text(locale.clone()))
    }
}
