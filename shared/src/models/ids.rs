//! Identifier generation
//!
//! Identifiers follow the `PREFIX-{base36 millis}-{random}` shape used on
//! printed labels and QR codes.

use chrono::{DateTime, Utc};
use uuid::Uuid;

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Upper-case base-36 rendering of a non-negative number
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

/// `len` random characters from `[0-9A-Z]`
pub fn random_code(len: usize) -> String {
    let mut out = String::with_capacity(len);
    while out.len() < len {
        for byte in Uuid::new_v4().as_bytes() {
            if out.len() == len {
                break;
            }
            out.push(BASE36[(*byte % 36) as usize] as char);
        }
    }
    out
}

/// Build a `PREFIX-{time}-{random}` identifier
pub fn timestamped_id(prefix: &str, now: DateTime<Utc>, random_len: usize) -> String {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    format!("{}-{}-{}", prefix, to_base36(millis), random_code(random_len))
}
