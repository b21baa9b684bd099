//! Display helpers shared by every view that renders movie records.

use chrono::{Datelike, NaiveDate};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Average rating with one decimal, e.g. `7.5`
pub fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

/// Year of an ISO release date; `None` for empty or malformed dates
pub fn release_year(date: &str) -> Option<i32> {
    parse_date(date).map(|d| d.year())
}

/// `May 1, 2020` style date
pub fn format_long_date(date: &str) -> Option<String> {
    parse_date(date).map(|d| d.format("%B %-d, %Y").to_string())
}

/// Runtime in minutes as `2h 15m`
pub fn format_runtime(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Whole-dollar amount with thousands separators, e.g. `$1,500,000`
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${}", out)
}

/// Counter shown next to the wishlist link; caps at `99+`
pub fn badge_count(count: usize) -> String {
    if count > 99 {
        "99+".to_string()
    } else {
        count.to_string()
    }
}

/// Shorten text to at most `max_chars` characters, ending with `...` when cut
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
