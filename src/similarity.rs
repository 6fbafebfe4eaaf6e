// Cosine similarity and the ranking it induces.
//
// Pure functions over already-loaded vectors — no store access, no shared
// state. The recommend module feeds these from the database.

use std::cmp::Ordering;

/// Cosine similarity between two feature vectors.
///
/// Returns a value in [-1.0, 1.0]. An all-zero vector (or a dimension
/// mismatch) yields 0.0 rather than a division error. Opposite directions
/// legitimately score negative.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Rank candidates by similarity to a reference vector, descending.
///
/// The candidate carrying `reference_id` is excluded, so ranking an activity
/// against its owner's full activity list never recommends the activity to
/// itself. Equal scores tie-break by ascending id to keep the output
/// deterministic. An empty candidate set (after exclusion) yields an empty
/// ranking.
pub fn rank_by_similarity(
    reference_id: i64,
    reference: &[f64],
    candidates: &[(i64, Vec<f64>)],
) -> Vec<(i64, f64)> {
    let mut scored: Vec<(i64, f64)> = candidates
        .iter()
        .filter(|(id, _)| *id != reference_id)
        .map(|(id, vector)| (*id, cosine_similarity(reference, vector)))
        .collect();

    scored.sort_by(|(id_a, score_a), (id_b, score_b)| {
        match score_b.total_cmp(score_a) {
            Ordering::Equal => id_a.cmp(id_b),
            other => other,
        }
    });

    scored
}
