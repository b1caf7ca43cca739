pub mod clock;
pub mod url_validator;

pub use clock::{Clock, ManualClock, SystemClock};

/// 62-symbol shortcode alphabet
pub const SHORTCODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Length bounds for user-chosen shortcodes
pub const CUSTOM_SHORTCODE_MIN_LEN: usize = 3;
pub const CUSTOM_SHORTCODE_MAX_LEN: usize = 10;

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| {
        SHORTCODE_ALPHABET[rand::random_range(0..SHORTCODE_ALPHABET.len())] as char
    })
    .take(length)
    .collect()
}

/// 用户自定义短码：3-10 位 ASCII 字母或数字
pub fn is_valid_shortcode(code: &str) -> bool {
    (CUSTOM_SHORTCODE_MIN_LEN..=CUSTOM_SHORTCODE_MAX_LEN).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
