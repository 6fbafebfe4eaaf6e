// Feature vector derivation for activities.
//
// Every activity gets a fixed 300-dimension vector computed once at creation
// and stored alongside the record. The derivation is a placeholder for a real
// text embedding: it expands a stable hash of the activity name into 300
// uniform floats. Two activities with the same name always get the same
// vector, so same-name duplicates rank each other at similarity 1.0.
//
// The seed comes from SHA-256 of the name, not from a std HashMap-style
// hasher — those are randomized per process, and the vectors must reproduce
// across runs. No shared generator state either: each call builds its own
// RNG, so vectorization is thread-safe with nothing to synchronize.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::db::models::ActivityAttributes;

/// Dimensionality of every activity feature vector.
pub const VECTOR_DIM: usize = 300;

/// Derive the feature vector for an activity.
///
/// Only the name feeds the derivation — description, timeframe, mood,
/// weather, and category are accepted for signature parity with the activity
/// record but do not influence the output. Never fails; empty and non-ASCII
/// names are fine.
pub fn vectorize(attributes: &ActivityAttributes) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(name_seed(&attributes.name));
    (0..VECTOR_DIM).map(|_| rng.random::<f64>()).collect()
}

/// Stable 64-bit seed for a name: the first 8 bytes of its SHA-256 digest.
fn name_seed(name: &str) -> u64 {
    let digest = Sha256::digest(name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
