// 목적:
// - 정렬 후 상위 k개 절삭을 담당한다.
//
// 설명:
// - 검색 결과는 score 내림차순, 동점이면 조회 순서를 유지한다(안정 정렬).
// - 카테고리 묶음은 ratings desc, no_of_ratings desc, discount_price asc 순서다.
//   discount_price가 없으면 숫자보다 앞에 둔다.
//
// 디자인 패턴:
// - 순수 함수(Pure Function).
//
// 참조:
// - src_rs/core/search_pipeline.rs
// - src_rs/core/aggregation_pipeline.rs

use std::cmp::Ordering;

use crate::core::product::{Product, ScoredProduct};

pub fn sort_desc_take(scored: &mut Vec<ScoredProduct>, top_k: usize) {
    // sort_by는 안정 정렬이다.
    scored.sort_by(compare_scored_product);
    if scored.len() > top_k {
        scored.truncate(top_k);
    }
}

pub fn sort_category_take(products: &mut Vec<Product>, top_n: usize) {
    products.sort_by(compare_category_rank);
    if products.len() > top_n {
        products.truncate(top_n);
    }
}

fn compare_scored_product(left: &ScoredProduct, right: &ScoredProduct) -> Ordering {
    right
        .score
        .partial_cmp(&left.score)
        .unwrap_or(Ordering::Equal)
}

pub fn compare_category_rank(left: &Product, right: &Product) -> Ordering {
    right
        .ratings
        .partial_cmp(&left.ratings)
        .unwrap_or(Ordering::Equal)
        .then_with(|| right.no_of_ratings.cmp(&left.no_of_ratings))
        .then_with(|| compare_discount_asc(left.discount_price, right.discount_price))
}

fn compare_discount_asc(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(l), Some(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
    }
}
