// Unit tests for cosine similarity and ranking.
//
// Tests isolated pure functions: cosine_similarity edge cases (zero vectors,
// mismatched dimensions, sign behavior) and the ordering guarantees of
// rank_by_similarity (exclusion, descending scores, deterministic ties).

use ember::db::models::ActivityAttributes;
use ember::similarity::{cosine_similarity, rank_by_similarity};
use ember::vectorize::vectorize;

fn named(name: &str) -> ActivityAttributes {
    ActivityAttributes {
        name: name.to_string(),
        ..Default::default()
    }
}

// ============================================================
// cosine_similarity — value properties
// ============================================================

#[test]
fn self_similarity_is_one() {
    let v = vectorize(&named("Picnic"));
    let sim = cosine_similarity(&v, &v);
    assert!((sim - 1.0).abs() < 1e-10, "Expected ~1.0, got {sim}");
}

#[test]
fn similarity_is_symmetric() {
    let a = vectorize(&named("Picnic"));
    let b = vectorize(&named("Museum"));
    let ab = cosine_similarity(&a, &b);
    let ba = cosine_similarity(&b, &a);
    assert!((ab - ba).abs() < 1e-10);
}

#[test]
fn similarity_is_in_range() {
    let names = ["Picnic", "Museum", "Hike", "Concert", ""];
    for x in &names {
        for y in &names {
            let sim = cosine_similarity(&vectorize(&named(x)), &vectorize(&named(y)));
            assert!(
                (-1.0..=1.0).contains(&sim),
                "similarity({x:?}, {y:?}) = {sim} out of range"
            );
        }
    }
}

#[test]
fn scale_does_not_matter() {
    let a = vec![1.0, 2.0, 3.0];
    let b: Vec<f64> = a.iter().map(|v| v * 42.0).collect();
    let sim = cosine_similarity(&a, &b);
    assert!((sim - 1.0).abs() < 1e-10);
}

#[test]
fn opposite_vectors_score_negative_one() {
    let a = vec![1.0, -2.0, 0.5];
    let b: Vec<f64> = a.iter().map(|v| -v).collect();
    let sim = cosine_similarity(&a, &b);
    assert!((sim + 1.0).abs() < 1e-10);
}

#[test]
fn zero_vector_scores_zero_not_error() {
    let zero = vec![0.0; 300];
    let v = vectorize(&named("Picnic"));
    assert!(cosine_similarity(&zero, &v).abs() < f64::EPSILON);
    assert!(cosine_similarity(&zero, &zero).abs() < f64::EPSILON);
}

#[test]
fn mismatched_dimensions_score_zero() {
    let a = vec![1.0, 2.0];
    let b = vec![1.0, 2.0, 3.0];
    assert!(cosine_similarity(&a, &b).abs() < f64::EPSILON);
}

#[test]
fn empty_vectors_score_zero() {
    let a: Vec<f64> = vec![];
    assert!(cosine_similarity(&a, &a).abs() < f64::EPSILON);
}

// ============================================================
// rank_by_similarity — ordering guarantees
// ============================================================

#[test]
fn reference_is_excluded() {
    let candidates: Vec<(i64, Vec<f64>)> = (1..=5)
        .map(|id| (id, vectorize(&named(&format!("Activity {id}")))))
        .collect();
    let reference = candidates[2].1.clone();

    let ranked = rank_by_similarity(3, &reference, &candidates);
    assert_eq!(ranked.len(), 4);
    assert!(ranked.iter().all(|(id, _)| *id != 3));
}

#[test]
fn scores_are_non_increasing() {
    let candidates: Vec<(i64, Vec<f64>)> = [
        "Picnic", "Museum", "Hike", "Concert", "Bowling", "Stargazing",
    ]
    .iter()
    .enumerate()
    .map(|(i, name)| (i as i64 + 1, vectorize(&named(name))))
    .collect();

    let reference = vectorize(&named("Picnic"));
    let ranked = rank_by_similarity(1, &reference, &candidates);

    assert!(
        ranked.windows(2).all(|w| w[0].1 >= w[1].1),
        "Ranking must be sorted descending: {ranked:?}"
    );
}

#[test]
fn identical_name_ranks_first_with_score_one() {
    // Same name => identical vector => similarity exactly 1.0.
    let picnic_a = vectorize(&named("Picnic"));
    let picnic_b = vectorize(&named("Picnic"));
    let museum = vectorize(&named("Museum"));

    let candidates = vec![(1, picnic_a.clone()), (2, picnic_b), (3, museum)];
    let ranked = rank_by_similarity(1, &picnic_a, &candidates);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].0, 2);
    assert!((ranked[0].1 - 1.0).abs() < 1e-10);
    assert_eq!(ranked[1].0, 3);
    assert!(ranked[1].1 < 1.0);
}

#[test]
fn equal_scores_tie_break_by_ascending_id() {
    let v = vectorize(&named("Picnic"));
    // Three copies of the same vector under shuffled ids.
    let candidates = vec![(7, v.clone()), (2, v.clone()), (5, v.clone())];
    let ranked = rank_by_similarity(0, &v, &candidates);

    let ids: Vec<i64> = ranked.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![2, 5, 7]);
}

#[test]
fn empty_candidates_yield_empty_ranking() {
    let reference = vectorize(&named("Picnic"));
    let ranked = rank_by_similarity(1, &reference, &[]);
    assert!(ranked.is_empty());
}

#[test]
fn only_reference_yields_empty_ranking() {
    let reference = vectorize(&named("Picnic"));
    let candidates = vec![(1, reference.clone())];
    let ranked = rank_by_similarity(1, &reference, &candidates);
    assert!(ranked.is_empty());
}
