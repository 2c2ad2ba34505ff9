// 목적:
// - 카탈로그 상품의 정규(canonical) 스키마와 파생 타입을 정의한다.
//
// 설명:
// - 저장소 문서는 mapper를 거쳐서만 Product가 된다.
// - ScoredProduct/CategoryGroup은 요청 단위로 만들어지고 응답 후 버려진다.
//
// 디자인 패턴:
// - 값 객체(Value Object).
//
// 참조:
// - src_rs/core/mapper.rs
// - src_rs/math/topk.rs

use serde::{Deserialize, Serialize};

/// 정규 상품 스키마다. 이 서비스는 상품을 읽기만 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub main_category: String,
    pub sub_category: String,
    pub image: String,
    pub ratings: f64,
    pub no_of_ratings: i64,
    pub actual_price: f64,
    pub discount_price: Option<f64>,
    pub stock: u64,
}

/// 유사도 점수가 붙은 상품이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProduct {
    #[serde(flatten)]
    pub product: Product,
    pub score: f64,
}

/// main_category별 상위 상품 묶음이다.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub category: String,
    pub products: Vec<Product>,
}

/// 스코어러에 전달하는 후보다. 위치가 아니라 product_id로 점수를 되짚는다.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub product_id: i64,
    pub name: String,
}

impl From<&Product> for Candidate {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.product_id,
            name: product.name.clone(),
        }
    }
}

/// 스코어러가 돌려준 후보별 점수다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub product_id: i64,
    pub score: f64,
}
