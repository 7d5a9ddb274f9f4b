use time::UtcDateTime;

/// Formats how long ago `created_at` was, relative to `now`, in the coarse
/// style of the wall feed. Elapsed time is truncated to whole seconds; future
/// timestamps render as "now".
#[must_use]
pub fn relative_time(created_at: UtcDateTime, now: UtcDateTime) -> String {
    let elapsed = (now - created_at).whole_seconds().max(0);
    match elapsed {
        ..=0 => "now".to_owned(),
        1..=59 => count(elapsed, "sec"),
        60..=3599 => count(elapsed / 60, "min"),
        3600..=86_399 => count(elapsed / 3600, "hour"),
        _ => count(elapsed / 86_400, "day"),
    }
}

fn count(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
