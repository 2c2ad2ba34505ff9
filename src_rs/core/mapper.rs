// 목적:
// - 저장소 문서를 정규 Product로 변환한다.
//
// 설명:
// - 필수 필드가 없거나 타입이 다르면 SchemaMismatch로 실패한다. 문서를 조용히 버리지 않는다.
// - 상품 CRUD 서비스가 쓰는 다른 필드명(review_count, price, images)은 경계에서 별칭으로 받는다.
//
// 디자인 패턴:
// - 어댑터(Adapter) + 실패 빠르게(Fail Fast).
//
// 참조:
// - src_rs/core/product.rs
// - src_rs/index/store.rs

use serde_json::{Map, Value};

use crate::core::errors::{CoreError, CoreResult};
use crate::core::product::Product;
use crate::index::store::CatalogDocument;

/// 여러 문서를 순서대로 변환한다. 하나라도 실패하면 전체가 실패한다.
pub fn map_documents(documents: Vec<CatalogDocument>) -> CoreResult<Vec<Product>> {
    documents.into_iter().map(map_document).collect()
}

/// 문서 하나를 Product로 변환한다.
pub fn map_document(document: CatalogDocument) -> CoreResult<Product> {
    let product_id = document.product_id;
    let fields = document.body.as_object().ok_or_else(|| CoreError::SchemaMismatch {
        product_id,
        field: "<document>".to_string(),
        reason: "문서가 JSON 객체가 아닙니다".to_string(),
    })?;
    let reader = FieldReader { product_id, fields };

    if let Some(stored_id) = fields.get("product_id") {
        if stored_id.as_i64() != Some(product_id) {
            return Err(reader.mismatch("product_id", "키와 문서의 product_id가 다릅니다"));
        }
    }

    let stock = reader.required_i64(&["stock"])?;
    if stock < 0 {
        return Err(reader.mismatch("stock", "재고는 음수일 수 없습니다"));
    }

    Ok(Product {
        product_id,
        name: reader.required_str(&["name"])?,
        main_category: reader.required_str(&["main_category"])?,
        sub_category: reader.required_str(&["sub_category"])?,
        image: reader.image()?,
        ratings: reader.required_f64(&["ratings"])?,
        no_of_ratings: reader.required_i64(&["no_of_ratings", "review_count"])?,
        actual_price: reader.required_f64(&["actual_price", "price"])?,
        discount_price: reader.optional_f64("discount_price")?,
        stock: stock as u64,
    })
}

struct FieldReader<'a> {
    product_id: i64,
    fields: &'a Map<String, Value>,
}

impl FieldReader<'_> {
    fn mismatch(&self, field: &str, reason: &str) -> CoreError {
        CoreError::SchemaMismatch {
            product_id: self.product_id,
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// 별칭 목록에서 처음으로 null이 아닌 값을 찾는다. 첫 이름이 정규 필드명이다.
    fn lookup(&self, names: &[&str]) -> Option<&Value> {
        names
            .iter()
            .filter_map(|name| self.fields.get(*name))
            .find(|value| !value.is_null())
    }

    fn required(&self, names: &[&str]) -> CoreResult<&Value> {
        self.lookup(names)
            .ok_or_else(|| self.mismatch(names[0], "필수 필드가 없습니다"))
    }

    fn required_str(&self, names: &[&str]) -> CoreResult<String> {
        self.required(names)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(names[0], "문자열이어야 합니다"))
    }

    fn required_f64(&self, names: &[&str]) -> CoreResult<f64> {
        self.required(names)?
            .as_f64()
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.mismatch(names[0], "숫자여야 합니다"))
    }

    fn required_i64(&self, names: &[&str]) -> CoreResult<i64> {
        let value = self.required(names)?;
        if let Some(integer) = value.as_i64() {
            return Ok(integer);
        }
        // 일부 적재 경로는 정수를 4.0처럼 float로 저장한다.
        value
            .as_f64()
            .filter(|float| float.fract() == 0.0 && float.abs() < i64::MAX as f64)
            .map(|float| float as i64)
            .ok_or_else(|| self.mismatch(names[0], "정수여야 합니다"))
    }

    fn optional_f64(&self, name: &str) -> CoreResult<Option<f64>> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value
                .as_f64()
                .filter(|float| float.is_finite())
                .map(Some)
                .ok_or_else(|| self.mismatch(name, "숫자 또는 null이어야 합니다")),
        }
    }

    fn image(&self) -> CoreResult<String> {
        if let Some(image) = self.lookup(&["image"]) {
            return image
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| self.mismatch("image", "문자열이어야 합니다"));
        }

        self.fields
            .get("images")
            .and_then(Value::as_array)
            .and_then(|images| images.first())
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| self.mismatch("image", "필수 필드가 없습니다"))
    }
}
