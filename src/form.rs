//! Raw input state of the search bar and the record editor, plus the
//! constraints the page enforces before anything is sent.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{InventoryRecord, RecordPayload, SearchCriteria};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchForm {
    pub brand: String,
    pub model: String,
    pub max_price: String,
}

impl SearchForm {
    /// Trimmed criteria, or `None` when every field is blank.
    pub fn criteria(&self) -> Option<SearchCriteria> {
        let criteria = SearchCriteria {
            brand: non_blank(&self.brand),
            model: non_blank(&self.model),
            max_price: non_blank(&self.max_price).map(|p| parse_float_prefix(&p)),
        };
        (!criteria.is_empty()).then_some(criteria)
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Longest leading numeric prefix (`"1500abc"` -> 1500). `NaN` when there is none.
pub fn parse_float_prefix(text: &str) -> f64 {
    let text = text.trim_start();
    let starts_numeric = text
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'));
    if !starts_numeric {
        return f64::NAN;
    }
    text.char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| f64::from_str(&text[..end]).ok())
        .unwrap_or(f64::NAN)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Brand,
    Model,
    Processor,
    Ram,
    Storage,
    Price,
    Stock,
}

impl FormField {
    /// Input element id on the page.
    pub fn input_id(self) -> &'static str {
        match self {
            FormField::Brand => "marca",
            FormField::Model => "modelo",
            FormField::Processor => "procesador",
            FormField::Ram => "memoriaRam",
            FormField::Storage => "almacenamiento",
            FormField::Price => "precio",
            FormField::Stock => "stock",
        }
    }

    fn max_len(self) -> Option<usize> {
        match self {
            FormField::Brand | FormField::Storage => Some(50),
            FormField::Model | FormField::Processor => Some(100),
            FormField::Ram => Some(20),
            FormField::Price | FormField::Stock => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Missing,
    TooLong { max: usize },
    NotANumber,
    NotAnInteger,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub violation: Violation,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violation {
            Violation::Missing => write!(f, "Completa este campo"),
            Violation::TooLong { max } => write!(f, "Usa como máximo {} caracteres", max),
            Violation::NotANumber => write!(f, "Introduce un número"),
            Violation::NotAnInteger => write!(f, "Introduce un número entero"),
            Violation::Negative => write!(f, "El valor debe ser mayor o igual a 0"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordForm {
    pub brand: String,
    pub model: String,
    pub processor: String,
    pub ram: String,
    pub storage: String,
    pub price: String,
    pub stock: String,
}

impl RecordForm {
    pub fn from_record(record: &InventoryRecord) -> Self {
        RecordForm {
            brand: record.brand.clone(),
            model: record.model.clone(),
            processor: record.processor.clone(),
            ram: record.ram.clone(),
            storage: record.storage.clone(),
            price: record.price.normalize().to_string(),
            stock: record.stock.to_string(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Brand => &self.brand,
            FormField::Model => &self.model,
            FormField::Processor => &self.processor,
            FormField::Ram => &self.ram,
            FormField::Storage => &self.storage,
            FormField::Price => &self.price,
            FormField::Stock => &self.stock,
        }
    }

    /// Payload with trimmed text and parsed numbers, or every violation found.
    pub fn validate(&self) -> Result<RecordPayload, Vec<FieldError>> {
        let mut errors = Vec::new();

        let mut text = |field: FormField| -> String {
            let value = self.value(field).trim();
            if value.is_empty() {
                errors.push(FieldError {
                    field,
                    violation: Violation::Missing,
                });
            } else if let Some(max) = field.max_len() {
                if value.chars().count() > max {
                    errors.push(FieldError {
                        field,
                        violation: Violation::TooLong { max },
                    });
                }
            }
            value.to_string()
        };
        let brand = text(FormField::Brand);
        let model = text(FormField::Model);
        let processor = text(FormField::Processor);
        let ram = text(FormField::Ram);
        let storage = text(FormField::Storage);

        let price = match parse_price(self.price.trim()) {
            Ok(price) => Some(price),
            Err(violation) => {
                errors.push(FieldError {
                    field: FormField::Price,
                    violation,
                });
                None
            }
        };
        let stock = match parse_stock(self.stock.trim()) {
            Ok(stock) => Some(stock),
            Err(violation) => {
                errors.push(FieldError {
                    field: FormField::Stock,
                    violation,
                });
                None
            }
        };

        match (price, stock) {
            (Some(price), Some(stock)) if errors.is_empty() => Ok(RecordPayload {
                brand,
                model,
                processor,
                ram,
                storage,
                price,
                stock,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_price(value: &str) -> Result<Decimal, Violation> {
    if value.is_empty() {
        return Err(Violation::Missing);
    }
    let price = Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| Violation::NotANumber)?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(Violation::Negative);
    }
    Ok(price)
}

fn parse_stock(value: &str) -> Result<i32, Violation> {
    if value.is_empty() {
        return Err(Violation::Missing);
    }
    let stock = match i32::from_str(value) {
        Ok(stock) => stock,
        Err(_) if Decimal::from_str(value).is_ok() => return Err(Violation::NotAnInteger),
        Err(_) => return Err(Violation::NotANumber),
    };
    if stock < 0 {
        return Err(Violation::Negative);
    }
    Ok(stock)
}
