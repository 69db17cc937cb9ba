//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate component and podlet names, locale, origin and URIs
//! - Detect duplicate podlet names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;
use crate::context::bcp47;
use crate::context::name::validate_name;

/// A single semantic configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a loaded configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new("server.bind_address", "not a socket address"));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new("server.request_timeout_secs", "must be greater than 0"));
    }

    let context = &config.context;
    if let Err(e) = validate_name(&context.name) {
        errors.push(ValidationError::new("context.name", e.to_string()));
    }
    if !bcp47::is_valid(&context.locale.locale) {
        errors.push(ValidationError::new(
            "context.locale.locale",
            format!("not a valid locale: {}", context.locale.locale),
        ));
    }
    if context.device_type.cache_size == 0 {
        errors.push(ValidationError::new("context.device_type.cache_size", "must be greater than 0"));
    }
    if let Some(origin) = &context.mount_origin.origin {
        match Url::parse(origin) {
            Ok(url) if url.host_str().is_some() => {}
            _ => errors.push(ValidationError::new(
                "context.mount_origin.origin",
                format!("not an absolute URL: {}", origin),
            )),
        }
    }

    let mut seen = HashSet::new();
    for (i, podlet) in config.podlets.iter().enumerate() {
        let field = |name: &str| format!("podlets[{}].{}", i, name);

        if validate_name(&podlet.name).is_err() {
            errors.push(ValidationError::new(field("name"), format!("invalid podlet name: {:?}", podlet.name)));
        } else if !seen.insert(podlet.name.as_str()) {
            errors.push(ValidationError::new(field("name"), format!("duplicate podlet name: {}", podlet.name)));
        }
        match Url::parse(&podlet.uri) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => errors.push(ValidationError::new(field("uri"), format!("not an http(s) URL: {}", podlet.uri))),
        }
        if podlet.timeout_ms == 0 {
            errors.push(ValidationError::new(field("timeout_ms"), "must be greater than 0"));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new("observability.metrics_address", "not a socket address"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PodletConfig;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.context.name = "home-page".into();
        config.podlets.push(PodletConfig {
            name: "header".into(),
            uri: "http://localhost:7001/".into(),
            timeout_ms: 1000,
        });
        config
    }

    #[test]
    fn test_valid_config() {
        assert_eq!(validate_config(&valid_config()), Ok(()));
    }

    #[test]
    fn test_missing_name() {
        let errors = validate_config(&AppConfig::default()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "context.name");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.context.locale.locale = "en_US".into();
        config.context.mount_origin.origin = Some("/relative".into());
        config.context.device_type.cache_size = 0;
        config.podlets.push(PodletConfig {
            name: "header".into(),
            uri: "ftp://localhost/".into(),
            timeout_ms: 0,
        });

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "context.locale.locale",
                "context.device_type.cache_size",
                "context.mount_origin.origin",
                "podlets[1].name",
                "podlets[1].uri",
                "podlets[1].timeout_ms",
            ]
        );
    }
}
