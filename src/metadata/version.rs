// Version normalization for Minecraft version constraints

use crate::constants::WILDCARD;
use indexmap::IndexSet;
use regex::Regex;

lazy_static::lazy_static! {
    static ref VERSION_TOKEN: Regex =
        Regex::new(r"\d+\.\d+(?:\.\d+)?").expect("version token pattern is valid");
}

/// Extract the Minecraft version tokens embedded in a constraint string
///
/// Constraint syntax is ignored, only version-like tokens are kept, in order
/// of appearance and without duplicates. Falls back to the wildcard set.
///
/// # Examples
/// ```
/// normalize(Some(">=1.20,<1.21")); // {"1.20", "1.21"}
/// normalize(Some("[1.19.2,1.20)")); // {"1.19.2", "1.20"}
/// normalize(Some("*")); // {"*"}
/// ```
pub fn normalize(raw: Option<&str>) -> IndexSet<String> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() && s != WILDCARD => s,
        _ => return wildcard(),
    };

    let tokens: IndexSet<String> = VERSION_TOKEN
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect();

    if tokens.is_empty() { wildcard() } else { tokens }
}

pub fn wildcard() -> IndexSet<String> {
    IndexSet::from([WILDCARD.to_string()])
}

pub fn is_wildcard(token: &str) -> bool {
    token == WILDCARD
}
