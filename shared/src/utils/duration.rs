//! Parsing of duration strings such as `15m`, `168h` or `90s`

use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)(ms|s|m|h|d)").expect("duration pattern is valid")
});

/// Parse a duration string into whole seconds
///
/// Accepts one or more `<number><unit>` parts (`1h30m`), units `ms`, `s`,
/// `m`, `h` and `d`. A bare integer is read as seconds. Returns `None` for
/// anything else, including a total of zero.
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(secs) = raw.parse::<i64>() {
        return (secs > 0).then_some(secs);
    }

    let mut consumed = 0;
    let mut total_ms: i64 = 0;
    for caps in DURATION_PART.captures_iter(raw) {
        let whole = caps.get(0)?;
        if whole.start() != consumed {
            return None;
        }
        consumed = whole.end();

        let value: i64 = caps[1].parse().ok()?;
        let factor = match &caps[2] {
            "ms" => 1,
            "s" => 1_000,
            "m" => 60_000,
            "h" => 3_600_000,
            "d" => 86_400_000,
            _ => return None,
        };
        total_ms = total_ms.checked_add(value.checked_mul(factor)?)?;
    }

    if consumed != raw.len() || total_ms < 1_000 {
        return None;
    }
    Some(total_ms / 1_000)
}
