//! Device type parser.
//!
//! # Responsibilities
//! - Classify the `User-Agent` header as mobile, tablet or desktop
//! - Memoize classifications in a bounded LRU cache keyed by the lowercased
//!   user agent
//!
//! # Design Decisions
//! - Missing or empty user agents resolve to desktop without touching the cache
//! - Classification happens outside the cache lock; two racing misses for
//!   the same key compute the same value and the later insert wins
//! - Detection sits behind `CapabilityDetector` so it can be swapped out

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::header;
use serde::Serialize;

use crate::config::DeviceTypeConfig;
use crate::context::cache::LruCache;
use crate::context::error::{BoxError, ContextError, ContextResult};
use crate::context::incoming::InboundRequest;
use crate::context::parsers::Parser;
use crate::context::value::ContextValue;
use crate::observability::metrics;

/// Device class of a requesting client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile",
            DeviceClass::Tablet => "tablet",
            DeviceClass::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a user agent into a device class.
pub trait CapabilityDetector: Send + Sync {
    fn platform_type(&self, user_agent: &str) -> DeviceClass;
}

/// Token-based user-agent classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAgentDetector;

const TABLET_TOKENS: &[&str] = &["ipad", "tablet", "playbook", "kindle", "silk/", "nexus 7", "nexus 9", "nexus 10"];
const MOBILE_TOKENS: &[&str] = &[
    "iphone", "ipod", "windows phone", "iemobile", "blackberry", "bb10", "opera mini", "mobile",
];
const BOT_TOKENS: &[&str] = &["bot", "crawler", "spider", "slurp"];

impl CapabilityDetector for UserAgentDetector {
    fn platform_type(&self, user_agent: &str) -> DeviceClass {
        let ua = user_agent.to_ascii_lowercase();
        let has = |tokens: &[&str]| tokens.iter().any(|t| ua.contains(t));

        if has(BOT_TOKENS) {
            return DeviceClass::Desktop;
        }
        if has(TABLET_TOKENS) {
            return DeviceClass::Tablet;
        }
        if ua.contains("android") {
            return if ua.contains("mobile") {
                DeviceClass::Mobile
            } else {
                DeviceClass::Tablet
            };
        }
        if has(MOBILE_TOKENS) {
            return DeviceClass::Mobile;
        }
        DeviceClass::Desktop
    }
}

/// Capability cache occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStatistics {
    pub cache_items: usize,
    pub capacity: usize,
}

/// Resolves the device class of the requesting client.
pub struct DeviceTypeParser {
    cache: LruCache<String, DeviceClass>,
    detector: Arc<dyn CapabilityDetector>,
}

impl DeviceTypeParser {
    pub fn new(config: &DeviceTypeConfig) -> ContextResult<Self> {
        Self::with_detector(config, Arc::new(UserAgentDetector))
    }

    /// Create a parser with a custom capability detector.
    pub fn with_detector(config: &DeviceTypeConfig, detector: Arc<dyn CapabilityDetector>) -> ContextResult<Self> {
        let capacity = NonZeroUsize::new(config.cache_size)
            .ok_or_else(|| ContextError::Validation("Value provided to \"cacheSize\" must be greater than 0".into()))?;
        Ok(Self {
            cache: LruCache::new(capacity),
            detector,
        })
    }

    /// Classify `user_agent`, consulting the cache first.
    pub fn classify(&self, user_agent: Option<&str>) -> DeviceClass {
        let Some(user_agent) = user_agent.filter(|ua| !ua.is_empty()) else {
            return DeviceClass::Desktop;
        };

        let key = user_agent.to_lowercase();
        if let Some(class) = self.cache.get(&key) {
            return class;
        }

        let class = self.detector.platform_type(user_agent);
        self.cache.insert(key, class);
        metrics::record_device_cache_size(self.cache.len());
        tracing::trace!(device_type = %class, "Classified user agent");
        class
    }

    /// Current cache occupancy.
    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            cache_items: self.cache.len(),
            capacity: self.cache.capacity(),
        }
    }
}

impl std::fmt::Debug for DeviceTypeParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceTypeParser").field("cache", &self.cache).finish()
    }
}

#[async_trait]
impl Parser for DeviceTypeParser {
    async fn parse(&self, incoming: &InboundRequest) -> Result<ContextValue, BoxError> {
        let class = self.classify(incoming.header(header::USER_AGENT.as_str()));
        Ok(ContextValue::Text(class.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use url::Url;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 12_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/12.0 Mobile/15E148 Safari/604.1";
    const IPAD: &str = "Mozilla/5.0 (iPad; CPU OS 11_0 like Mac OS X) AppleWebKit/604.1.34 (KHTML, like Gecko) Version/11.0 Mobile/15A5341f Safari/604.1";
    const ANDROID_PHONE: &str = "Mozilla/5.0 (Linux; Android 9; Pixel 3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/74.0.3729.157 Mobile Safari/537.36";
    const ANDROID_TABLET: &str = "Mozilla/5.0 (Linux; Android 9; SM-T820) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/74.0.3729.157 Safari/537.36";
    const DESKTOP: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/74.0.3729.169 Safari/537.36";
    const GOOGLEBOT: &str = "Mozilla/5.0 (Linux; Android 6.0.1; Nexus 5X Build/MMB29P) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2272.96 Mobile Safari/537.36 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)";

    /// Counts how often classification actually ran.
    #[derive(Default)]
    struct CountingDetector {
        calls: AtomicUsize,
    }

    impl CapabilityDetector for CountingDetector {
        fn platform_type(&self, user_agent: &str) -> DeviceClass {
            self.calls.fetch_add(1, Ordering::SeqCst);
            UserAgentDetector.platform_type(user_agent)
        }
    }

    fn incoming(user_agent: Option<&str>) -> InboundRequest {
        let mut incoming = InboundRequest::new("layout", Url::parse("http://localhost/").unwrap());
        if let Some(ua) = user_agent {
            incoming.headers.insert(header::USER_AGENT, ua.parse().unwrap());
        }
        incoming
    }

    #[test]
    fn test_detector() {
        let detector = UserAgentDetector;
        assert_eq!(detector.platform_type(IPHONE), DeviceClass::Mobile);
        assert_eq!(detector.platform_type(IPAD), DeviceClass::Tablet);
        assert_eq!(detector.platform_type(ANDROID_PHONE), DeviceClass::Mobile);
        assert_eq!(detector.platform_type(ANDROID_TABLET), DeviceClass::Tablet);
        assert_eq!(detector.platform_type(DESKTOP), DeviceClass::Desktop);
        assert_eq!(detector.platform_type(GOOGLEBOT), DeviceClass::Desktop);
        assert_eq!(detector.platform_type("curl/8.0"), DeviceClass::Desktop);
    }

    #[tokio::test]
    async fn test_parse() {
        let parser = DeviceTypeParser::new(&DeviceTypeConfig::default()).unwrap();
        assert_eq!(parser.parse(&incoming(Some(IPHONE))).await.unwrap(), ContextValue::from("mobile"));
        assert_eq!(parser.parse(&incoming(Some(IPAD))).await.unwrap(), ContextValue::from("tablet"));
        assert_eq!(parser.parse(&incoming(Some(DESKTOP))).await.unwrap(), ContextValue::from("desktop"));
    }

    #[tokio::test]
    async fn test_missing_user_agent_skips_cache() {
        let detector = Arc::new(CountingDetector::default());
        let parser = DeviceTypeParser::with_detector(&DeviceTypeConfig::default(), detector.clone()).unwrap();

        assert_eq!(parser.parse(&incoming(None)).await.unwrap(), ContextValue::from("desktop"));
        assert_eq!(parser.parse(&incoming(Some(""))).await.unwrap(), ContextValue::from("desktop"));
        assert_eq!(parser.statistics().cache_items, 0);
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cache_hits_are_case_insensitive() {
        let detector = Arc::new(CountingDetector::default());
        let parser = DeviceTypeParser::with_detector(&DeviceTypeConfig::default(), detector.clone()).unwrap();

        let upper = IPHONE.to_uppercase();
        for ua in [IPHONE, upper.as_str(), IPHONE] {
            assert_eq!(parser.parse(&incoming(Some(ua))).await.unwrap(), ContextValue::from("mobile"));
        }
        assert_eq!(detector.calls.load(Ordering::SeqCst), 1);
        assert_eq!(parser.statistics().cache_items, 1);

        parser.parse(&incoming(Some(IPAD))).await.unwrap();
        assert_eq!(parser.statistics().cache_items, 2);
    }

    #[tokio::test]
    async fn test_cache_evicts_least_recently_used() {
        let detector = Arc::new(CountingDetector::default());
        let parser = DeviceTypeParser::with_detector(&DeviceTypeConfig { cache_size: 2 }, detector.clone()).unwrap();

        parser.classify(Some(IPHONE));
        parser.classify(Some(IPAD));
        parser.classify(Some(IPHONE));
        parser.classify(Some(DESKTOP));
        assert_eq!(parser.statistics(), CacheStatistics { cache_items: 2, capacity: 2 });
        assert_eq!(detector.calls.load(Ordering::SeqCst), 3);

        // iPhone survived, iPad was evicted.
        assert_eq!(parser.classify(Some(IPHONE)), DeviceClass::Mobile);
        assert_eq!(detector.calls.load(Ordering::SeqCst), 3);
        assert_eq!(parser.classify(Some(IPAD)), DeviceClass::Tablet);
        assert_eq!(detector.calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_zero_cache_size() {
        let err = DeviceTypeParser::new(&DeviceTypeConfig { cache_size: 0 }).unwrap_err();
        assert!(matches!(err, ContextError::Validation(_)));
    }
}
