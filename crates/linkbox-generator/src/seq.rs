use crate::Generator;
use linkbox_core::shortcode::CODE_LENGTH;
use linkbox_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic short code generator using a sequential counter.
///
/// This generator produces codes like "sq0000", "sq0001", etc.: the prefix
/// followed by the counter zero-padded to fill the code length. The counter
/// wraps once the padded digits are exhausted, so a long-running instance
/// will eventually repeat codes. Mostly useful for tests.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    ///
    /// The prefix must be shorter than a short code and use only the short
    /// code alphabet; it is truncated otherwise.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        let mut prefix: String = prefix
            .into()
            .chars()
            .filter(|c| ShortCode::is_code_char(*c))
            .collect();
        prefix.truncate(CODE_LENGTH - 1);

        Self {
            counter: AtomicU64::new(offset),
            prefix,
        }
    }

    fn width(&self) -> usize {
        CODE_LENGTH - self.prefix.len()
    }
}

impl Generator for SeqGenerator {
    type Output = ShortCode;

    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        let width = self.width();
        let count = count % 10_u64.pow(width as u32);
        ShortCode::new_unchecked(format!("{}{:0width$}", self.prefix, count))
    }
}
