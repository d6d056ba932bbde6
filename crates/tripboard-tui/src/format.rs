//! Formatting helpers for rows and forms.

use chrono::{DateTime, Duration, Utc};

/// `MAR 18`
pub fn day(at: DateTime<Utc>) -> String {
    at.format("%b %d").to_string().to_uppercase()
}

/// `18 MAR`
pub fn day_month(at: DateTime<Utc>) -> String {
    at.format("%d %b").to_string().to_uppercase()
}

/// `10:30`
pub fn time(at: DateTime<Utc>) -> String {
    at.format("%H:%M").to_string()
}

/// `18/03/26 10:30`
pub fn date_time(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%y %H:%M").to_string()
}

/// `30M`, `01H 05M`, or `02D 01H 05M`.
pub fn duration(span: Duration) -> String {
    let minutes = span.num_minutes().max(0);
    let (days, hours, mins) = (minutes / 1440, minutes / 60 % 24, minutes % 60);
    if days > 0 {
        format!("{days:02}D {hours:02}H {mins:02}M")
    } else if hours > 0 {
        format!("{hours:02}H {mins:02}M")
    } else {
        format!("{mins:02}M")
    }
}
