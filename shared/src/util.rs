/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Strip everything but digits from a phone number.
///
/// `(555) 123-4567` and `555.123.4567` both become `5551234567`.
pub fn normalize_mobile_number(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
