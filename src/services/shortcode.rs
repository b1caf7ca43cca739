//! Random shortcode generation with a bounded uniqueness re-check

use tracing::{debug, warn};

use crate::config::ShortcodeConfig;
use crate::errors::{Result, UrlKeeperError};
use crate::utils::generate_random_code;

/// Draws fixed-length codes from `[A-Za-z0-9]` until one is free.
///
/// Not cryptographically random. With 62^6 possible codes the birthday bound
/// keeps collisions rare only for small collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcodeGenerator {
    length: usize,
    max_attempts: u32,
}

impl Default for ShortcodeGenerator {
    fn default() -> Self {
        Self::new(6, 100)
    }
}

impl ShortcodeGenerator {
    pub fn new(length: usize, max_attempts: u32) -> Self {
        Self {
            length: length.max(1),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &ShortcodeConfig) -> Self {
        Self::new(config.length, config.max_attempts)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate a code for which `is_taken` returns false.
    ///
    /// Fails with `Generation` after `max_attempts` collisions.
    pub fn generate<F>(&self, is_taken: F) -> Result<String>
    where
        F: Fn(&str) -> bool,
    {
        for attempt in 1..=self.max_attempts {
            let code = generate_random_code(self.length);
            if !is_taken(&code) {
                debug!(shortcode = %code, attempt, "Generated shortcode");
                return Ok(code);
            }
            debug!(shortcode = %code, attempt, "Shortcode collision, re-rolling");
        }

        warn!(
            "Gave up generating a shortcode after {} attempts",
            self.max_attempts
        );
        Err(UrlKeeperError::generation(format!(
            "No free {}-character shortcode found after {} attempts",
            self.length, self.max_attempts
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_generates_requested_length() {
        let generator = ShortcodeGenerator::new(8, 10);
        let code = generator.generate(|_| false).unwrap();
        assert_eq!(code.len(), 8);
        assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_rerolls_on_collision() {
        let calls = Cell::new(0);
        let generator = ShortcodeGenerator::default();
        let code = generator
            .generate(|_| {
                calls.set(calls.get() + 1);
                calls.get() < 3
            })
            .unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(code.len(), 6);
    }

    #[test]
    fn test_saturated_collection_fails() {
        let calls = Cell::new(0u32);
        let generator = ShortcodeGenerator::new(6, 5);
        let err = generator
            .generate(|_| {
                calls.set(calls.get() + 1);
                true
            })
            .unwrap_err();
        assert!(matches!(err, UrlKeeperError::Generation(_)));
        assert_eq!(calls.get(), 5);
    }

    #[test]
    fn test_zero_settings_are_clamped() {
        let generator = ShortcodeGenerator::new(0, 0);
        assert_eq!(generator.length(), 1);
        assert!(generator.generate(|_| false).is_ok());
    }
}
