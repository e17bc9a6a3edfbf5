// Common helpers: clock, ids and attachment tokens

use rand::Rng;
use uuid::Uuid;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Get current timestamp in milliseconds
pub fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate new UUID
pub fn newId() -> String {
    Uuid::new_v4().to_string()
}

/// Render a non-negative number in base 36 (lowercase)
pub fn toBase36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Token naming one imported file: base-36 timestamp, dash, six random base-36 chars.
/// Collisions are unlikely, not impossible; nothing checks existing files.
pub fn attachmentToken() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}-{}", toBase36(now().max(0) as u64), suffix)
}
