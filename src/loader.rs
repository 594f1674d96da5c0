use crate::error::{Result, SalesInsightsError};
use crate::schema::{Column, SalesRecord};
use crate::table::SalesTable;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// Reads the first worksheet of the workbook at `path` into a [`SalesTable`].
///
/// An unopenable file, an empty workbook or a missing required column fails
/// the load; a malformed cell only becomes `None` on its record.
pub fn load_sales_table<P: AsRef<Path>>(path: P) -> Result<SalesTable> {
    let path = path.as_ref();
    let shown = path.display().to_string();

    let mut workbook = match open_workbook_auto(path) {
        Ok(workbook) => workbook,
        Err(source) => {
            log::error!("Could not open spreadsheet {}: {}", shown, source);
            return Err(SalesInsightsError::WorkbookOpen { path: shown, source });
        }
    };

    let sheet = match workbook.sheet_names().first().cloned() {
        Some(name) => name,
        None => {
            log::error!("Spreadsheet {} contains no worksheets", shown);
            return Err(SalesInsightsError::NoWorksheets(shown));
        }
    };

    let range = match workbook.worksheet_range(&sheet) {
        Ok(range) => range,
        Err(source) => {
            log::error!("Could not read sheet '{}' of {}: {}", sheet, shown, source);
            return Err(SalesInsightsError::SheetRead { sheet, source });
        }
    };

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(row) => row,
        None => {
            log::error!("Sheet '{}' of {} has no header row", sheet, shown);
            return Err(SalesInsightsError::EmptySheet(sheet));
        }
    };
    let columns = match ColumnIndices::resolve(header) {
        Ok(columns) => columns,
        Err(error) => {
            log::error!("Spreadsheet {}: {}", shown, error);
            return Err(error);
        }
    };

    let mut records = Vec::new();
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        records.push(SalesRecord {
            sale_date: row.get(columns.sale_date).and_then(cell_to_date),
            sale_value: row.get(columns.sale_value).and_then(cell_to_f64),
            cost: row.get(columns.cost).and_then(cell_to_f64),
            discount: row.get(columns.discount).and_then(cell_to_f64),
            quantity: row.get(columns.quantity).and_then(cell_to_f64),
            product: row.get(columns.product).and_then(cell_to_string),
            category: row.get(columns.category).and_then(cell_to_string),
            segment: row.get(columns.segment).and_then(cell_to_string),
            state: row.get(columns.state).and_then(cell_to_string),
            seller: row.get(columns.seller).and_then(cell_to_string),
            ..Default::default()
        });
    }

    let table = SalesTable::from_records(records);
    log::info!(
        "Loaded {} sales records from {} (sheet '{}')",
        table.len(),
        shown,
        sheet
    );
    Ok(table)
}

#[derive(Debug)]
struct ColumnIndices {
    sale_date: usize,
    sale_value: usize,
    cost: usize,
    discount: usize,
    quantity: usize,
    product: usize,
    category: usize,
    segment: usize,
    state: usize,
    seller: usize,
}

impl ColumnIndices {
    fn resolve(header: &[Data]) -> Result<Self> {
        Ok(Self {
            sale_date: header_index(header, Column::SaleDate)?,
            sale_value: header_index(header, Column::SaleValue)?,
            cost: header_index(header, Column::Cost)?,
            discount: header_index(header, Column::Discount)?,
            quantity: header_index(header, Column::Quantity)?,
            product: header_index(header, Column::Product)?,
            category: header_index(header, Column::Category)?,
            segment: header_index(header, Column::Segment)?,
            state: header_index(header, Column::State)?,
            seller: header_index(header, Column::Seller)?,
        })
    }
}

fn header_index(header: &[Data], column: Column) -> Result<usize> {
    let wanted = column.header();
    header
        .iter()
        .position(|cell| {
            matches!(cell, Data::String(text) if text.trim().eq_ignore_ascii_case(wanted))
        })
        .ok_or(SalesInsightsError::MissingColumn(wanted))
}

fn cell_to_f64(cell: &Data) -> Option<f64> {
    if let Some(value) = cell.as_f64() {
        return Some(value);
    }
    if let Data::String(text) = cell {
        return parse_number_text(text);
    }
    None
}

fn cell_to_date(cell: &Data) -> Option<NaiveDate> {
    if let Some(datetime) = cell.as_datetime() {
        return Some(datetime.date());
    }
    match cell {
        Data::String(text) | Data::DateTimeIso(text) => parse_date_text(text),
        _ => None,
    }
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Float(value) => Some(value.to_string()),
        Data::Int(value) => Some(value.to_string()),
        _ => None,
    }
}

fn parse_number_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }
    // decimal comma, as in "19,90"
    if trimmed.contains(',') && !trimmed.contains('.') {
        return trimmed.replace(',', ".").parse::<f64>().ok();
    }
    None
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}
