pub mod random;
pub mod seq;

use linkbox_core::ShortCode;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// Trait for generating short code candidates.
///
/// Implementations are pure generators that don't interact with storage.
/// A candidate may collide with an existing code; the store checks every
/// candidate and asks for another one until it finds a free code.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShortCode>;
    /// Generates a candidate short code.
    fn generate(&self) -> Self::Output;
}
