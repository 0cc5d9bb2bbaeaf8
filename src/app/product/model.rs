//! 产品数据模型

use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_json::Value;
use std::{fmt, num::IntErrorKind};

use crate::core::{error::ValidationDetail, extract::FieldRules};

/// 存储中的产品记录，同时也是创建/更新请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// 返回给客户端的产品，带有存储分配的 ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

impl ProductResponse {
    pub fn new(id: i64, product: &Product) -> Self {
        Self {
            id,
            name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
        }
    }
}

impl FieldRules for Product {
    /// 与反序列化规则一致，但一次报告所有出错字段
    fn field_errors(body: &Value) -> Vec<ValidationDetail> {
        let Some(fields) = body.as_object() else {
            return vec![ValidationDetail::new(
                &["body"],
                "Input should be a valid dictionary or object",
                "model_attributes_type",
            )];
        };

        let mut errors = Vec::new();
        match fields.get("name") {
            None => errors.push(field_missing("name")),
            Some(Value::String(_)) => {}
            Some(_) => errors.push(ValidationDetail::new(
                &["body", "name"],
                "Input should be a valid string",
                "string_type",
            )),
        }
        match fields.get("price") {
            None => errors.push(field_missing("price")),
            Some(value) => {
                if let Err(e) = deserialize_price(value) {
                    errors.push(ValidationDetail::new(
                        &["body", "price"],
                        e.to_string(),
                        "float_parsing",
                    ));
                }
            }
        }
        match fields.get("description") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => errors.push(ValidationDetail::new(
                &["body", "description"],
                "Input should be a valid string",
                "string_type",
            )),
        }
        errors
    }
}

fn field_missing(field: &str) -> ValidationDetail {
    ValidationDetail::new(&["body", field], "Field required", "missing")
}

/// 路径中的产品 ID
///
/// 超出 `i64` 范围的整数仍是合法 ID，只是不可能存在，解析为 `None`；
/// 非整数在提取阶段被拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub Option<i64>);

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ProductIdVisitor;

        impl<'de> Visitor<'de> for ProductIdVisitor {
            type Value = ProductId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a valid integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ProductId, E> {
                match v.parse::<i64>() {
                    Ok(id) => Ok(ProductId(Some(id))),
                    Err(e)
                        if matches!(
                            e.kind(),
                            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                        ) =>
                    {
                        Ok(ProductId(None))
                    }
                    Err(_) => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_str(ProductIdVisitor)
    }
}

/// 价格接受 JSON 数字或可解析为有限数字的字符串，例如 `"9.99"`
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a number or a numeric string")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v.trim().parse::<f64>() {
                Ok(price) if price.is_finite() => Ok(price),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(PriceVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_price_accepts_number_and_numeric_string() {
        let from_number: Product =
            serde_json::from_value(json!({"name": "Widget", "price": 9.99})).unwrap();
        assert_eq!(from_number.price, 9.99);

        let from_int: Product =
            serde_json::from_value(json!({"name": "Widget", "price": 10})).unwrap();
        assert_eq!(from_int.price, 10.0);

        let from_text: Product =
            serde_json::from_value(json!({"name": "Widget", "price": " 9.99 "})).unwrap();
        assert_eq!(from_text.price, 9.99);
    }

    #[test]
    fn test_price_rejects_non_numeric() {
        for price in [json!("cheap"), json!("inf"), json!(true), json!(null)] {
            let result: Result<Product, _> =
                serde_json::from_value(json!({"name": "Widget", "price": price}));
            assert!(result.is_err(), "价格 {price} 应当被拒绝");
        }
    }

    #[test]
    fn test_required_fields() {
        let missing_name: Result<Product, _> = serde_json::from_value(json!({"price": 1.0}));
        assert!(missing_name.unwrap_err().to_string().contains("name"));

        let missing_price: Result<Product, _> = serde_json::from_value(json!({"name": "a"}));
        assert!(missing_price.unwrap_err().to_string().contains("price"));

        // 名称不做类型转换
        let numeric_name: Result<Product, _> =
            serde_json::from_value(json!({"name": 42, "price": 1.0}));
        assert!(numeric_name.is_err());
    }

    #[test]
    fn test_description_defaults_to_none() {
        let product: Product =
            serde_json::from_value(json!({"name": "Widget", "price": 1.5, "extra": 1})).unwrap();
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_field_errors_report_every_bad_field() {
        let errors = Product::field_errors(&json!({}));
        let locs: Vec<_> = errors.iter().map(|e| e.loc.clone()).collect();
        assert_eq!(locs, vec![vec!["body", "name"], vec!["body", "price"]]);
        assert!(errors.iter().all(|e| e.kind == "missing"));

        let errors = Product::field_errors(&json!({"name": 1, "price": "cheap", "description": 2}));
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["string_type", "float_parsing", "string_type"]);

        assert!(Product::field_errors(&json!({"name": "W", "price": "1.5"})).is_empty());
        assert_eq!(Product::field_errors(&json!([1, 2]))[0].loc, vec!["body"]);
    }

    #[test]
    fn test_product_id_parsing() {
        let parse = |s: &str| {
            ProductId::deserialize(de::value::StrDeserializer::<de::value::Error>::new(s))
        };
        assert_eq!(parse("7").unwrap(), ProductId(Some(7)));
        assert_eq!(parse("-3").unwrap(), ProductId(Some(-3)));
        assert_eq!(parse("99999999999999999999").unwrap(), ProductId(None));
        assert!(parse("abc").is_err());
        assert!(parse("1.5").is_err());
    }

    #[test]
    fn test_response_serializes_null_description() {
        let product = Product {
            name: "Widget".to_string(),
            price: 9.99,
            description: None,
        };
        let body = serde_json::to_value(ProductResponse::new(1, &product)).unwrap();
        assert_eq!(
            body,
            json!({"id": 1, "name": "Widget", "price": 9.99, "description": null})
        );
    }
}
