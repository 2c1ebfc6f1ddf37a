//! Tracking-number format checks.
//!
//! Input is cleaned (whitespace removed, upper-cased) before matching, and
//! anything shorter than [`MIN_LEN`] is rejected outright.

pub const MIN_LEN: usize = 8;
const GENERIC_MAX_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingFormat {
    /// `1Z` followed by 16 alphanumerics.
    Ups,
    /// 12 digits.
    FedExExpress,
    /// 14 digits.
    FedExGround,
    /// 20 or 22 digits.
    Usps,
    /// UPU S10: two letters, nine digits, two letters (`EE123456789US`).
    International,
    /// 16 digits, optionally grouped in fours.
    GenericNumeric,
    /// 8 to 40 letters and digits.
    GenericAlphanumeric,
}

impl TrackingFormat {
    /// Carrier implied by the format, when there is one.
    pub fn carrier_hint(&self) -> Option<&'static str> {
        match self {
            TrackingFormat::Ups => Some("UPS"),
            TrackingFormat::FedExExpress | TrackingFormat::FedExGround => Some("FedEx"),
            TrackingFormat::Usps => Some("USPS"),
            TrackingFormat::International
            | TrackingFormat::GenericNumeric
            | TrackingFormat::GenericAlphanumeric => None,
        }
    }
}

/// Strip all whitespace and upper-case.
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Classify a raw tracking number, most specific format first.
pub fn classify(raw: &str) -> Option<TrackingFormat> {
    let cleaned = clean(raw);
    let s = cleaned.as_bytes();
    if s.len() < MIN_LEN {
        return None;
    }

    if s.len() == 18 && s.starts_with(b"1Z") && s[2..].iter().all(is_upper_alnum) {
        return Some(TrackingFormat::Ups);
    }
    if s.iter().all(u8::is_ascii_digit) {
        match s.len() {
            12 => return Some(TrackingFormat::FedExExpress),
            14 => return Some(TrackingFormat::FedExGround),
            16 => return Some(TrackingFormat::GenericNumeric),
            20 | 22 => return Some(TrackingFormat::Usps),
            _ => {}
        }
    }
    if is_upu_s10(s) {
        return Some(TrackingFormat::International);
    }
    if s.len() <= GENERIC_MAX_LEN && s.iter().all(is_upper_alnum) {
        return Some(TrackingFormat::GenericAlphanumeric);
    }
    None
}

fn is_upper_alnum(b: &u8) -> bool {
    b.is_ascii_uppercase() || b.is_ascii_digit()
}

fn is_upu_s10(s: &[u8]) -> bool {
    s.len() == 13
        && s[..2].iter().all(u8::is_ascii_uppercase)
        && s[2..11].iter().all(u8::is_ascii_digit)
        && s[11..].iter().all(u8::is_ascii_uppercase)
}
