//! Mount origin parser.

use async_trait::async_trait;
use url::Url;

use crate::config::MountOriginConfig;
use crate::context::error::{BoxError, ContextError, ContextResult};
use crate::context::incoming::InboundRequest;
use crate::context::parsers::Parser;
use crate::context::value::ContextValue;

/// Resolves `<protocol>//<hostname>[:port]` of the public origin.
///
/// A configured origin wins over the request URL. Ports 80 and 443 are
/// never emitted.
#[derive(Debug, Clone)]
pub struct MountOriginParser {
    origin: Option<Url>,
}

impl MountOriginParser {
    pub fn new(config: &MountOriginConfig) -> ContextResult<Self> {
        let origin = match config.origin.as_deref() {
            Some(origin) => {
                let url = Url::parse(origin).map_err(|e| {
                    ContextError::Validation(format!("Value provided to \"origin\" is not a valid URL: {} ({})", origin, e))
                })?;
                if url.host_str().is_none() {
                    return Err(ContextError::Validation(format!(
                        "Value provided to \"origin\" has no hostname: {}",
                        origin
                    )));
                }
                Some(url)
            }
            None => None,
        };
        Ok(Self { origin })
    }
}

fn format_origin(url: &Url) -> Result<String, BoxError> {
    let hostname = url
        .host_str()
        .ok_or_else(|| format!("request URL has no hostname: {}", url))?;

    let port = match url.port() {
        None | Some(80) | Some(443) => String::new(),
        Some(port) => format!(":{}", port),
    };

    Ok(format!("{}://{}{}", url.scheme(), hostname, port))
}

#[async_trait]
impl Parser for MountOriginParser {
    async fn parse(&self, incoming: &InboundRequest) -> Result<ContextValue, BoxError> {
        let url = self.origin.as_ref().unwrap_or(&incoming.url);
        format_origin(url).map(ContextValue::Text)
    }
}
