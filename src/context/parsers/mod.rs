//! Context parsers.
//!
//! Each parser derives one named fact from an inbound request plus its own
//! configuration, fixed at construction.

pub mod debug;
pub mod device_type;
pub mod locale;
pub mod mount_origin;
pub mod mount_pathname;
pub mod public_pathname;
pub mod requested_by;

use async_trait::async_trait;

use crate::context::error::BoxError;
use crate::context::incoming::InboundRequest;
use crate::context::value::ContextValue;

pub use debug::DebugParser;
pub use device_type::{CapabilityDetector, CacheStatistics, DeviceClass, DeviceTypeParser, UserAgentDetector};
pub use locale::LocaleParser;
pub use mount_origin::MountOriginParser;
pub use mount_pathname::MountPathnameParser;
pub use public_pathname::PublicPathnameParser;
pub use requested_by::RequestedByParser;

/// A unit that derives one fact from an inbound request.
///
/// Implementations must not rely on other parsers: the registry runs all of
/// them concurrently over the same request.
#[async_trait]
pub trait Parser: Send + Sync {
    async fn parse(&self, incoming: &InboundRequest) -> Result<ContextValue, BoxError>;
}
