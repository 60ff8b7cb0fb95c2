use chrono::Utc;
use uuid::Uuid;

use mnemo_core::constants::MEMORY_ID_SUFFIX_LEN;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// `memory_{millis}_{suffix}` with a random lowercase base-36 suffix.
pub fn generate_memory_id() -> String {
    format!(
        "memory_{}_{}",
        Utc::now().timestamp_millis(),
        random_suffix(MEMORY_ID_SUFFIX_LEN)
    )
}

fn random_suffix(len: usize) -> String {
    let mut n = u128::from_le_bytes(*Uuid::new_v4().as_bytes());
    (0..len)
        .map(|_| {
            let digit = (n % 36) as usize;
            n /= 36;
            BASE36[digit] as char
        })
        .collect()
}
