//! Canonical pathname joining.
//!
//! # Design Decisions
//! - Empty segments are dropped, so repeated slashes collapse
//! - Output always has exactly one leading slash and no trailing slash
//! - Joining nothing (or only slashes) yields `/`

/// Join pathname parts into one normalized pathname.
pub fn pathname_builder<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut pathname = String::new();
    for part in parts {
        for segment in part.as_ref().split('/').filter(|s| !s.is_empty()) {
            pathname.push('/');
            pathname.push_str(segment);
        }
    }

    if pathname.is_empty() {
        pathname.push('/');
    }
    pathname
}
