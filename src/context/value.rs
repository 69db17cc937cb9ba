//! Context values produced by parsers.

use std::collections::BTreeMap;
use std::fmt;

use crate::context::pathname::pathname_builder;

/// Resolved context of one request, keyed by context key (`podium-locale`, ...).
pub type Context = BTreeMap<String, ContextValue>;

/// A single fact resolved by a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Text(String),
    Flag(bool),
    Integer(i64),
    /// Deferred pathname, resolved against the receiving component's name.
    Pathname(AssetPathname),
}

impl ContextValue {
    /// Canonical string form of this value as seen by `component`.
    pub fn to_wire(&self, component: &str) -> String {
        match self {
            ContextValue::Text(s) => s.clone(),
            ContextValue::Flag(b) => b.to_string(),
            ContextValue::Integer(i) => i.to_string(),
            ContextValue::Pathname(p) => p.build(component),
        }
    }

    /// Borrow the text of a `Text` value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContextValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::Text(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::Text(value.to_string())
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Flag(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Integer(value)
    }
}

impl From<AssetPathname> for ContextValue {
    fn from(value: AssetPathname) -> Self {
        ContextValue::Pathname(value)
    }
}

/// Builder for public asset pathnames under a mount point.
///
/// Downstream code calls [`AssetPathname::build`] with an asset (or podlet)
/// name instead of re-deriving the mount context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPathname {
    pathname: String,
    prefix: String,
}

impl AssetPathname {
    pub fn new(pathname: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            prefix: prefix.into(),
        }
    }

    /// Build the pathname of `asset`.
    pub fn build(&self, asset: &str) -> String {
        pathname_builder([self.pathname.as_str(), self.prefix.as_str(), asset])
    }

    /// Build the pathname of the resource root.
    pub fn build_default(&self) -> String {
        self.build("/")
    }
}

impl fmt::Display for AssetPathname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_forms() {
        assert_eq!(ContextValue::from("nb-NO").to_wire("header"), "nb-NO");
        assert_eq!(ContextValue::from(true).to_wire("header"), "true");
        assert_eq!(ContextValue::from(-42i64).to_wire("header"), "-42");
    }

    #[test]
    fn test_asset_pathname() {
        let pathname = AssetPathname::new("/home/", "podium-resource");
        assert_eq!(pathname.build_default(), "/home/podium-resource");
        assert_eq!(pathname.build("header"), "/home/podium-resource/header");
        assert_eq!(
            ContextValue::from(pathname).to_wire("footer"),
            "/home/podium-resource/footer"
        );
    }
}
