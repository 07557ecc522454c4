//! Query parameter parsing helpers.

/// Tokens recognized as `false` by [`parse_flag`]. Everything else that is
/// non-empty parses as `true`.
const FALSY_TOKENS: &[&str] = &["0", "f", "F", "false", "False", "FALSE", "off", "Off", "OFF"];

/// Tri-state boolean cast for filter parameters.
///
/// - absent or empty input -> `None` (no filter)
/// - a recognized falsy token -> `Some(false)`
/// - anything else -> `Some(true)`
pub fn parse_flag(raw: Option<&str>) -> Option<bool> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    Some(!FALSY_TOKENS.contains(&raw))
}
