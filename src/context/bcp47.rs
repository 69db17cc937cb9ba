//! BCP-47 language tag validation (RFC 5646 grammar).
//!
//! Only the syntax is checked; subtags are not looked up in the IANA
//! registry. Matching is case-insensitive.

const GRANDFATHERED: &[&str] = &[
    // irregular
    "en-gb-oed", "i-ami", "i-bnn", "i-default", "i-enochian", "i-hak", "i-klingon", "i-lux",
    "i-mingo", "i-navajo", "i-pwn", "i-tao", "i-tay", "i-tsu", "sgn-be-fr", "sgn-be-nl",
    "sgn-ch-de",
    // regular
    "art-lojban", "cel-gaulish", "no-bok", "no-nyn", "zh-guoyu", "zh-hakka", "zh-min",
    "zh-min-nan", "zh-xiang",
];

fn is_alpha(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_digit(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn is_variant(s: &str) -> bool {
    (5..=8).contains(&s.len()) || (s.len() == 4 && s.as_bytes()[0].is_ascii_digit())
}

/// Returns true if `tag` is a well-formed BCP-47 language tag.
pub fn is_valid(tag: &str) -> bool {
    let lower = tag.to_ascii_lowercase();
    if GRANDFATHERED.contains(&lower.as_str()) {
        return true;
    }

    let subtags: Vec<&str> = lower.split('-').collect();
    if subtags
        .iter()
        .any(|s| s.is_empty() || s.len() > 8 || !s.bytes().all(|b| b.is_ascii_alphanumeric()))
    {
        return false;
    }

    let n = subtags.len();
    let mut i = 0;

    if subtags[0] == "x" {
        return private_use(&subtags[1..]);
    }

    // language
    let language = subtags[0];
    if !is_alpha(language) || language.len() < 2 {
        return false;
    }
    i += 1;
    if language.len() <= 3 {
        let mut extlangs = 0;
        while i < n && extlangs < 3 && subtags[i].len() == 3 && is_alpha(subtags[i]) {
            i += 1;
            extlangs += 1;
        }
    }

    // script
    if i < n && subtags[i].len() == 4 && is_alpha(subtags[i]) {
        i += 1;
    }

    // region
    if i < n
        && ((subtags[i].len() == 2 && is_alpha(subtags[i]))
            || (subtags[i].len() == 3 && is_digit(subtags[i])))
    {
        i += 1;
    }

    while i < n && is_variant(subtags[i]) {
        i += 1;
    }

    // extensions
    while i < n && subtags[i].len() == 1 && subtags[i] != "x" {
        i += 1;
        let start = i;
        while i < n && subtags[i].len() >= 2 {
            i += 1;
        }
        if i == start {
            return false;
        }
    }

    if i < n && subtags[i] == "x" {
        return private_use(&subtags[i + 1..]);
    }

    i == n
}

fn private_use(rest: &[&str]) -> bool {
    // Subtag length (1-8, alphanumeric) was checked by the caller.
    !rest.is_empty()
}
