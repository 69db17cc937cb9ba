//! Parser registry and concurrent context resolution.
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → process() loads the current parser set
//!     → every parser's parse() runs concurrently (try_join_all)
//!     → all succeeded: results written to request.context["podium-<name>"]
//!     → any failed: request.context left untouched, error returned
//! ```
//!
//! # Design Decisions
//! - Parser set is an `ArcSwap` snapshot; a sweep never sees a partial
//!   registration, and late registrations only join later sweeps
//! - Registrations are serialized by a mutex so duplicate checks are exact
//! - Duplicate names are a programming error and always rejected

use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use axum::http::Extensions;
use futures_util::future::try_join_all;
use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::config::ContextConfig;
use crate::context::error::{ContextError, ContextResult};
use crate::context::incoming::InboundRequest;
use crate::context::name::validate_name;
use crate::context::parsers::{
    DebugParser, DeviceTypeParser, LocaleParser, MountOriginParser, MountPathnameParser, Parser,
    PublicPathnameParser, RequestedByParser,
};
use crate::context::wire::context_key;
use crate::observability::metrics;

type ParserMap = IndexMap<String, Arc<dyn Parser>>;

/// Registry of named parsers owned by one layout or podlet.
pub struct ParserRegistry {
    name: String,
    parsers: ArcSwap<ParserMap>,
    write_lock: Mutex<()>,
    device_type: Arc<DeviceTypeParser>,
}

impl ParserRegistry {
    /// Create a registry with the seven built-in parsers.
    pub fn new(config: &ContextConfig) -> ContextResult<Self> {
        validate_name(&config.name)?;

        let device_type = Arc::new(DeviceTypeParser::new(&config.device_type)?);
        let registry = Self {
            name: config.name.clone(),
            parsers: ArcSwap::from_pointee(ParserMap::new()),
            write_lock: Mutex::new(()),
            device_type: device_type.clone(),
        };

        registry.register("publicPathname", Arc::new(PublicPathnameParser::new(&config.public_pathname)))?;
        registry.register("mountPathname", Arc::new(MountPathnameParser::new(&config.mount_pathname)))?;
        registry.register("mountOrigin", Arc::new(MountOriginParser::new(&config.mount_origin)?))?;
        registry.register("requestedBy", Arc::new(RequestedByParser::new(&config.name)?))?;
        registry.register("deviceType", device_type)?;
        registry.register("locale", Arc::new(LocaleParser::new(&config.locale)?))?;
        registry.register("debug", Arc::new(DebugParser::new(&config.debug)))?;

        tracing::debug!(name = %registry.name, parsers = registry.len(), "Context registry created");
        Ok(registry)
    }

    /// Register an additional parser under a unique name.
    pub fn register(&self, name: impl Into<String>, parser: Arc<dyn Parser>) -> ContextResult<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(ContextError::Contract("You must provide a value to \"name\"".into()));
        }

        let _guard = self.write_lock.lock();
        let current = self.parsers.load();
        if current.contains_key(&name) {
            return Err(ContextError::Contract(format!(
                "Parser with the name \"{}\" has already been registered",
                name
            )));
        }

        let mut next = ParserMap::clone(&current);
        next.insert(name, parser);
        self.parsers.store(Arc::new(next));
        Ok(())
    }

    /// Run every parser over `incoming` and store the results in its context.
    ///
    /// Fails fast: if any parser fails, no context entry is written.
    pub async fn process(&self, incoming: &mut InboundRequest) -> ContextResult<()> {
        let start = Instant::now();
        let parsers = self.parsers.load_full();

        let results = {
            let shared: &InboundRequest = incoming;
            try_join_all(parsers.iter().map(|(name, parser)| async move {
                parser.parse(shared).await.map_err(|source| ContextError::Parse {
                    parser: name.clone(),
                    source,
                })
            }))
            .await
        };

        metrics::record_context_process(&incoming.name, start);

        let values = match results {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(name = %incoming.name, error = %e, "Context resolution failed");
                return Err(e);
            }
        };

        for (name, value) in parsers.keys().zip(values) {
            incoming.context.insert(context_key(name), value);
        }

        tracing::debug!(
            name = %incoming.name,
            parsers = parsers.len(),
            elapsed = ?start.elapsed(),
            "Context resolved"
        );
        Ok(())
    }

    /// Run [`process`](Self::process) on the `InboundRequest` attached to a
    /// request's extensions.
    pub async fn process_extensions(&self, extensions: &mut Extensions) -> ContextResult<()> {
        let incoming = extensions
            .get_mut::<InboundRequest>()
            .ok_or(ContextError::TypeMismatch("InboundRequest"))?;
        self.process(incoming).await
    }

    /// Name of the owning component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered parser names, in registration order.
    pub fn parser_names(&self) -> Vec<String> {
        self.parsers.load().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.parsers.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The built-in device type parser, for cache statistics.
    pub fn device_type(&self) -> &DeviceTypeParser {
        &self.device_type
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("name", &self.name)
            .field("parsers", &self.parser_names())
            .finish()
    }
}
