//! Equipment export service
//!
//! Materializes a denormalized equipment view into an xlsx workbook. The
//! spreadsheet byte layout itself is delegated to rust_xlsxwriter; this
//! module owns the column set and cell rendering rules.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};
use sqlx::Row;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Fixed export column set, in sheet order
const COLUMNS: [&str; 20] = [
    "Serial Number",
    "Name",
    "Brand",
    "Model",
    "Category",
    "Status",
    "Condition",
    "Owner Name",
    "Owner Email",
    "Location",
    "Purchase Date",
    "Purchase Method",
    "Purchase Price",
    "Warranty Expiry",
    "Last Maintenance Date",
    "Last Maintenance Cost",
    "Tags",
    "Notes",
    "Created",
    "Updated",
];

#[derive(Clone)]
pub struct ExportService {
    repository: Repository,
}

impl ExportService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Build the export workbook, optionally restricted to the given ids.
    /// Returns the xlsx bytes.
    pub async fn export_equipment(&self, ids: Option<&[i32]>) -> AppResult<Vec<u8>> {
        let rows = self.repository.equipment.list_for_export(ids).await?;

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Equipment")?;

        let header_format = Format::new().set_bold();
        for (col, title) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &header_format)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;

            worksheet.write_string(r, 0, row.get::<String, _>("serial_number"))?;
            worksheet.write_string(r, 1, row.get::<String, _>("name"))?;
            worksheet.write_string(r, 2, text_or_empty(row.get("brand")))?;
            worksheet.write_string(r, 3, text_or_empty(row.get("model")))?;
            worksheet.write_string(r, 4, row.get::<String, _>("category"))?;
            worksheet.write_string(r, 5, row.get::<String, _>("status"))?;
            worksheet.write_string(r, 6, text_or_empty(row.get("condition")))?;
            worksheet.write_string(r, 7, text_or_empty(row.get("owner_name")))?;
            worksheet.write_string(r, 8, text_or_empty(row.get("owner_email")))?;
            worksheet.write_string(r, 9, text_or_empty(row.get("location")))?;
            worksheet.write_string(r, 10, display_date(row.get("purchase_date")))?;
            worksheet.write_string(r, 11, text_or_empty(row.get("purchase_method")))?;
            worksheet.write_number(r, 12, amount_or_zero(row.get("purchase_price")))?;
            worksheet.write_string(r, 13, display_date(row.get("warranty_expiry")))?;
            worksheet.write_string(r, 14, display_date(row.get("last_maintenance_date")))?;
            worksheet.write_number(r, 15, amount_or_zero(row.get("last_maintenance_cost")))?;
            worksheet.write_string(r, 16, row.get::<String, _>("tag_names"))?;
            worksheet.write_string(r, 17, text_or_empty(row.get("notes")))?;
            worksheet.write_string(r, 18, display_date(row.get("created_at")))?;
            worksheet.write_string(r, 19, display_date(row.get("updated_at")))?;
        }

        let bytes = workbook.save_to_buffer()?;
        Ok(bytes)
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Internal(format!("Failed to build export workbook: {}", e))
    }
}

/// Parse a comma-separated id list from the query string
pub fn parse_id_list(raw: &str) -> AppResult<Vec<i32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>().map_err(|_| {
                AppError::Validation(format!("Invalid equipment id in export filter: {}", s))
            })
        })
        .collect()
}

/// Display form for dates: MM/DD/YYYY, empty when absent
fn display_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%m/%d/%Y").to_string())
        .unwrap_or_default()
}

/// Missing optional text renders as empty string, never "null"
fn text_or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Missing numeric fields default to 0
fn amount_or_zero(value: Option<Decimal>) -> f64 {
    value.and_then(|d| d.to_f64()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_render_in_display_form() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 12, 30, 0).unwrap();
        assert_eq!(display_date(Some(date)), "03/07/2024");
        assert_eq!(display_date(None), "");
    }

    #[test]
    fn missing_text_renders_empty_not_null() {
        assert_eq!(text_or_empty(None), "");
        assert_eq!(text_or_empty(Some("MacBook".to_string())), "MacBook");
    }

    #[test]
    fn missing_amounts_default_to_zero() {
        assert_eq!(amount_or_zero(None), 0.0);
        assert_eq!(amount_or_zero(Some(Decimal::new(129999, 2))), 1299.99);
    }

    #[test]
    fn id_list_parsing() {
        assert_eq!(parse_id_list("1,2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list(" 4 , 5 ").unwrap(), vec![4, 5]);
        assert_eq!(parse_id_list("").unwrap(), Vec::<i32>::new());
        assert!(parse_id_list("1,abc").is_err());
    }
}
