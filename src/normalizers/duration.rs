use once_cell::sync::Lazy;
use regex::Regex;

use super::Field;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)PT(?:([0-9]+)H)?(?:([0-9]+)M)?(?:([0-9]+)S)?").unwrap());

/// Convert an ISO 8601 duration (`PT1H30M`) to "1 hour 30 minutes".
///
/// Minutes past 60 roll over into hours. Seconds only show up when there are no
/// hours or minutes. Text that is not a duration, or whose numbers overflow, is
/// returned unchanged.
pub fn parse_duration(field: Field) -> String {
    let Some(raw) = field.scalar_text() else {
        return String::new();
    };
    let Some((hours, minutes, seconds)) = components(&raw) else {
        return raw;
    };
    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours == 1 { "" } else { "s" }));
    }
    if minutes > 0 {
        parts.push(format!(
            "{} minute{}",
            minutes,
            if minutes == 1 { "" } else { "s" }
        ));
    }
    if seconds > 0 && parts.is_empty() {
        parts.push(format!("{seconds} seconds"));
    }
    parts.join(" ")
}

/// Hours (with whole hours of minutes carried in), leftover minutes and seconds.
/// None when there is no `PT` match or a number does not fit.
fn components(raw: &str) -> Option<(u64, u64, u64)> {
    let caps = DURATION_RE.captures(raw)?;
    let number = |i: usize| -> Option<u64> {
        caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
    };
    let (hours, minutes, seconds) = (number(1)?, number(2)?, number(3)?);
    Some((hours.checked_add(minutes / 60)?, minutes % 60, seconds))
}
