//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164 after formatting is stripped: optional `+`, 8 to 15 digits, no leading zero
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9]\d{7,14}$").expect("phone regex is valid"));

/// Remove common formatting characters (spaces, dashes, dots, parentheses)
pub fn strip_formatting(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')'))
        .collect()
}

/// Normalize a phone number to `+<digits>`, or `None` if it is not E.164
pub fn normalize_phone_number(phone: &str) -> Option<String> {
    let stripped = strip_formatting(phone);
    if !PHONE_REGEX.is_match(&stripped) {
        return None;
    }
    Some(match stripped.strip_prefix('+') {
        Some(_) => stripped,
        None => format!("+{}", stripped),
    })
}

/// Mask a phone number for display (e.g., +23****5678)
pub fn mask_phone_number(phone: &str) -> String {
    let stripped = strip_formatting(phone);
    let chars: Vec<char> = stripped.chars().collect();
    if chars.len() >= 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}****{}", head, tail)
    } else {
        "****".to_string()
    }
}
