//! Table presentation: rows, stock badges, price and date formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::events::UiEvent;
use crate::models::InventoryRecord;

/// Columns in the inventory table, actions included.
pub const TABLE_COLUMNS: usize = 10;

pub const EMPTY_TABLE_MESSAGE: &str = "No se encontraron computadores";

const CURRENCY_SUFFIX: &str = "COP";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockTier {
    High,
    Medium,
    Low,
}

impl StockTier {
    pub fn classify(stock: i32) -> Self {
        if stock > 10 {
            StockTier::High
        } else if stock > 5 {
            StockTier::Medium
        } else {
            StockTier::Low
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            StockTier::High => "bg-success",
            StockTier::Medium => "bg-warning",
            StockTier::Low => "bg-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockBadge {
    pub tier: StockTier,
    pub count: i32,
}

/// A clickable control bound to one row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowAction {
    pub key: String,
    pub title: &'static str,
    pub event: UiEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub processor: String,
    pub ram: String,
    pub storage: String,
    pub price: String,
    pub stock: StockBadge,
    pub created: String,
    pub actions: Vec<RowAction>,
}

impl TableRow {
    fn from_record(record: &InventoryRecord) -> Self {
        TableRow {
            id: record.id,
            brand: record.brand.clone(),
            model: record.model.clone(),
            processor: record.processor.clone(),
            ram: record.ram.clone(),
            storage: record.storage.clone(),
            price: format_price(&record.price),
            stock: StockBadge {
                tier: StockTier::classify(record.stock),
                count: record.stock,
            },
            created: record
                .created_at
                .as_deref()
                .map(format_date)
                .unwrap_or_default(),
            actions: vec![
                RowAction {
                    key: format!("edit-{}", record.id),
                    title: "Editar",
                    event: UiEvent::Edit(record.id),
                },
                RowAction {
                    key: format!("delete-{}", record.id),
                    title: "Eliminar",
                    event: UiEvent::RequestDelete(record.id),
                },
            ],
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<tr>");
        for cell in [
            self.id.to_string(),
            escape(&self.brand),
            escape(&self.model),
            escape(&self.processor),
            escape(&self.ram),
            escape(&self.storage),
            escape(&self.price),
        ] {
            html.push_str(&format!("<td>{}</td>", cell));
        }
        html.push_str(&format!(
            "<td><span class=\"badge {}\">{}</span></td>",
            self.stock.tier.badge_class(),
            self.stock.count
        ));
        html.push_str(&format!("<td>{}</td>", escape(&self.created)));
        html.push_str("<td>");
        for action in &self.actions {
            let (style, icon) = match action.event {
                UiEvent::RequestDelete(_) => ("btn-danger", "fa-trash"),
                _ => ("btn-primary", "fa-edit"),
            };
            html.push_str(&format!(
                "<button class=\"btn btn-sm {} btn-action\" data-action=\"{}\" title=\"{}\"><i class=\"fas {}\"></i></button>",
                style, action.key, action.title, icon
            ));
        }
        html.push_str("</td></tr>");
        html
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TableBody {
    /// Single informational row spanning every column.
    #[default]
    Placeholder,
    Rows(Vec<TableRow>),
}

impl TableBody {
    /// Number of `<tr>` elements the body renders to.
    pub fn row_count(&self) -> usize {
        match self {
            TableBody::Placeholder => 1,
            TableBody::Rows(rows) => rows.len(),
        }
    }

    pub fn rows(&self) -> &[TableRow] {
        match self {
            TableBody::Placeholder => &[],
            TableBody::Rows(rows) => rows,
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            TableBody::Placeholder => format!(
                "<tr><td colspan=\"{}\" class=\"text-center text-muted\"><i class=\"fas fa-info-circle\"></i> {}</td></tr>",
                TABLE_COLUMNS, EMPTY_TABLE_MESSAGE
            ),
            TableBody::Rows(rows) => rows.iter().map(TableRow::to_html).collect(),
        }
    }
}

/// One row per record, in input order; the placeholder when there are none.
pub fn render_table(records: &[InventoryRecord]) -> TableBody {
    if records.is_empty() {
        return TableBody::Placeholder;
    }
    TableBody::Rows(records.iter().map(TableRow::from_record).collect())
}

/// `2500000` -> `$2.500.000 COP`. Colombian grouping, at most three decimals.
pub fn format_price(price: &Decimal) -> String {
    let rounded = price
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    if let Some(frac) = frac_part {
        grouped.push(',');
        grouped.push_str(frac);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("${}{} {}", sign, grouped, CURRENCY_SUFFIX)
}

/// Date part of a server timestamp as `d/m/yyyy`. Values that do not parse
/// are returned unchanged.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    let date = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|dt| dt.date())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
    match date {
        Ok(date) => date.format("%-d/%-m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
