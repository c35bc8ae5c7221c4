//! Identifier generation.
//!
//! Record identifiers are opaque 16-character strings minted by the
//! application, not by the database. Services receive the generator as a
//! capability so tests can substitute deterministic ids.

use mockall::automock;
use rand::{Rng, distributions::Alphanumeric};

/// Length of generated identifiers.
const ID_LEN: usize = 16;

/// Source of fresh record identifiers.
#[automock]
pub trait IdGenerator: Send + Sync {
    /// Mint a new opaque identifier.
    fn generate(&self) -> String;
}

/// Random 16-character alphanumeric identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ID_LEN)
            .map(char::from)
            .collect()
    }
}
