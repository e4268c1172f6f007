use rand::distr::Alphanumeric;
use rand::Rng;
use up10_core::constants::DEFAULT_IDENTIFIER_LENGTH;

/// Produces the random part of every storage key.
///
/// Draws from `[A-Za-z0-9]` with the thread-local CSPRNG, which is seeded
/// from the operating system. Uniqueness is not checked against the store.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierGenerator {
    length: usize,
}

impl IdentifierGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

impl Default for IdentifierGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTIFIER_LENGTH)
    }
}
