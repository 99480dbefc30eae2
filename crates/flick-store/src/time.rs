//! UTC stamps for session file names.

use std::time::{SystemTime, UNIX_EPOCH};

const SECS_PER_DAY: u64 = 86_400;
const MONTH_DAYS: [u64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// `MMdd_HHmmss` for a Unix time.
pub fn session_stamp(secs: u64) -> String {
    let (_, month, day) = calendar_date(secs / SECS_PER_DAY);
    let clock = secs % SECS_PER_DAY;
    format!(
        "{month:02}{day:02}_{:02}{:02}{:02}",
        clock / 3600,
        clock % 3600 / 60,
        clock % 60
    )
}

fn is_leap(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// (year, month, day) for a count of days since 1970-01-01.
fn calendar_date(mut days: u64) -> (u64, u64, u64) {
    let mut year = 1970;
    loop {
        let year_len = if is_leap(year) { 366 } else { 365 };
        if days < year_len {
            break;
        }
        days -= year_len;
        year += 1;
    }

    let mut month = 1;
    for (i, &len) in MONTH_DAYS.iter().enumerate() {
        let len = if i == 1 && is_leap(year) { 29 } else { len };
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }
    (year, month, days + 1)
}
