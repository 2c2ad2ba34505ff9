use rstest::rstest;

use catalog_search::core::errors::{CoreError, ScorerError};
use catalog_search::core::product::{CandidateScore, ScoredProduct};
use catalog_search::core::search_pipeline::merge_scores;
use catalog_search::math::topk::{sort_category_take, sort_desc_take};

use crate::support::product;

fn scored(ids_and_scores: &[(i64, f64)]) -> Vec<ScoredProduct> {
    ids_and_scores
        .iter()
        .map(|(id, score)| ScoredProduct {
            product: product(*id, "Men", 4.0, 1, None),
            score: *score,
        })
        .collect()
}

fn ids(ranked: &[ScoredProduct]) -> Vec<i64> {
    ranked.iter().map(|entry| entry.product.product_id).collect()
}

#[test]
fn sort_desc_take_orders_by_score_descending() {
    let mut ranked = scored(&[(1, 0.2), (2, 0.9), (3, 0.5)]);
    sort_desc_take(&mut ranked, 10);
    assert_eq!(ids(&ranked), vec![2, 3, 1]);
}

#[test]
fn sort_desc_take_keeps_fetch_order_for_equal_scores() {
    let mut ranked = scored(&[(7, 0.5), (3, 0.8), (9, 0.5), (1, 0.5), (4, 0.8)]);
    sort_desc_take(&mut ranked, 10);
    assert_eq!(ids(&ranked), vec![3, 4, 7, 9, 1]);
}

#[rstest]
#[case(1, 1)]
#[case(3, 3)]
#[case(4, 4)]
#[case(50, 4)]
fn sort_desc_take_truncates_to_min_of_top_k_and_len(#[case] top_k: usize, #[case] expected: usize) {
    let mut ranked = scored(&[(1, 0.1), (2, 0.2), (3, 0.3), (4, 0.4)]);
    sort_desc_take(&mut ranked, top_k);
    assert_eq!(ranked.len(), expected);
}

#[test]
fn sort_category_take_applies_rating_count_and_discount_order() {
    let mut products = vec![
        product(1, "Men", 4.0, 100, Some(10.0)),
        product(2, "Men", 4.5, 5, Some(30.0)),
        product(3, "Men", 4.0, 100, Some(5.0)),
        product(4, "Men", 4.0, 200, Some(50.0)),
        product(5, "Men", 4.0, 100, None),
    ];

    sort_category_take(&mut products, 10);

    let order = products.iter().map(|p| p.product_id).collect::<Vec<_>>();
    assert_eq!(order, vec![2, 4, 5, 3, 1]);
}

#[test]
fn sort_category_take_never_exceeds_top_n() {
    let mut products = (1..=8)
        .map(|id| product(id, "Women", id as f64 / 2.0, 1, None))
        .collect::<Vec<_>>();

    sort_category_take(&mut products, 3);

    assert_eq!(products.len(), 3);
    assert_eq!(
        products.iter().map(|p| p.product_id).collect::<Vec<_>>(),
        vec![8, 7, 6]
    );
}

#[test]
fn merge_scores_pairs_by_product_id_not_position() {
    let products = vec![product(10, "Men", 4.0, 1, None), product(20, "Men", 4.0, 1, None)];
    let scores = vec![
        CandidateScore { product_id: 20, score: 0.3 },
        CandidateScore { product_id: 10, score: 0.7 },
    ];

    let merged = merge_scores(products, scores).expect("merge");

    assert_eq!(merged[0].product.product_id, 10);
    assert_eq!(merged[0].score, 0.7);
    assert_eq!(merged[1].product.product_id, 20);
    assert_eq!(merged[1].score, 0.3);
}

#[test]
fn merge_scores_rejects_length_mismatch() {
    let products = vec![product(1, "Men", 4.0, 1, None), product(2, "Men", 4.0, 1, None)];
    let scores = vec![CandidateScore { product_id: 1, score: 0.5 }];

    let error = merge_scores(products, scores).expect_err("must fail");
    assert!(matches!(error, CoreError::Scorer(ScorerError::Malformed(_))));
}

#[test]
fn merge_scores_rejects_unknown_product_id() {
    let products = vec![product(1, "Men", 4.0, 1, None)];
    let scores = vec![CandidateScore { product_id: 99, score: 0.5 }];

    let error = merge_scores(products, scores).expect_err("must fail");
    assert!(matches!(error, CoreError::Scorer(ScorerError::Malformed(_))));
}
