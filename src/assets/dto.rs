use serde::{Deserialize, Serialize};

use crate::{assets::repo::Asset, error::ApiError};

/// Create/update body. All fields optional: create enforces presence at the
/// handler boundary (so a missing field is a 400), update applies only the
/// fields present. Quantity and cost basis arrive as raw JSON values because
/// clients send both numbers and numeric strings.
#[derive(Debug, Deserialize)]
pub struct AssetBody {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub asset_type: Option<String>,
    pub quantity: Option<serde_json::Value>,
    pub cost_basis: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct AssetResponse {
    pub message: String,
    pub asset: Asset,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Coerces a JSON number or numeric string into an f64.
pub fn parse_magnitude(value: &serde_json::Value) -> Result<f64, ApiError> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ApiError::InvalidInput("Quantity and cost_basis must be numbers".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn magnitude_accepts_numbers() {
        assert_eq!(parse_magnitude(&json!(10)).unwrap(), 10.0);
        assert_eq!(parse_magnitude(&json!(1500.5)).unwrap(), 1500.5);
        assert_eq!(parse_magnitude(&json!(0)).unwrap(), 0.0);
    }

    #[test]
    fn magnitude_accepts_numeric_strings() {
        assert_eq!(parse_magnitude(&json!("10")).unwrap(), 10.0);
        assert_eq!(parse_magnitude(&json!(" 2.5 ")).unwrap(), 2.5);
    }

    #[test]
    fn magnitude_rejects_non_numbers() {
        for bad in [json!("ten"), json!(true), json!(null), json!([1]), json!({})] {
            let err = parse_magnitude(&bad).unwrap_err();
            assert!(matches!(err, ApiError::InvalidInput(_)));
        }
    }

    #[test]
    fn asset_json_uses_type_key_and_hides_owner() {
        let asset = Asset {
            id: 1,
            name: "AAPL".into(),
            asset_type: "Stock".into(),
            quantity: 10.0,
            cost_basis: 1500.0,
            owner_id: 42,
            created_at: time::macros::datetime!(2024-01-01 00:00 UTC),
        };
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["type"], "Stock");
        assert!(json.get("asset_type").is_none());
        assert!(json.get("owner_id").is_none());
    }

    #[test]
    fn body_accepts_partial_updates() {
        let body: AssetBody = serde_json::from_str(r#"{"quantity": "12"}"#).unwrap();
        assert!(body.name.is_none());
        assert!(body.asset_type.is_none());
        assert_eq!(parse_magnitude(body.quantity.as_ref().unwrap()).unwrap(), 12.0);
        assert!(body.cost_basis.is_none());
    }
}
