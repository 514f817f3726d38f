use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct InventoryRecord {
    pub id: i64,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "procesador")]
    pub processor: String,
    #[serde(rename = "memoriaRam")]
    pub ram: String,
    #[serde(rename = "almacenamiento")]
    pub storage: String,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
    #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body sent on create and update. Never carries an identifier: the server
/// assigns it on create and the URL names it on update.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecordPayload {
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "modelo")]
    pub model: String,
    #[serde(rename = "procesador")]
    pub processor: String,
    #[serde(rename = "memoriaRam")]
    pub ram: String,
    #[serde(rename = "almacenamiento")]
    pub storage: String,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub max_price: Option<f64>,
}

impl SearchCriteria {
    /// Query parameters in request order; absent criteria are left out.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(brand) = &self.brand {
            pairs.push(("marca", brand.clone()));
        }
        if let Some(model) = &self.model {
            pairs.push(("modelo", model.clone()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("precioMax", format_number(max_price)));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.model.is_none() && self.max_price.is_none()
    }
}

/// Number text as the page script writes it: `Infinity`, not `inf`.
fn format_number(value: f64) -> String {
    if value.is_infinite() {
        let sign = if value.is_sign_negative() { "-" } else { "" };
        format!("{}Infinity", sign)
    } else {
        value.to_string()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    #[serde(rename = "totalComputadores")]
    pub total: i64,
    #[serde(rename = "computadoresConStockBajo")]
    pub low_stock: i64,
}

/// Error body returned by write endpoints. The server sends `mensaje`,
/// `message` is accepted too.
#[derive(Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    #[serde(alias = "mensaje")]
    pub message: Option<String>,
}

impl ApiErrorBody {
    pub fn parse(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}
