use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The columns every sales spreadsheet must provide, identified by the
/// header strings used in the retail sales base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    SaleDate,
    SaleValue,
    Cost,
    Discount,
    Quantity,
    Product,
    Category,
    Segment,
    State,
    Seller,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::SaleDate,
        Column::SaleValue,
        Column::Cost,
        Column::Discount,
        Column::Quantity,
        Column::Product,
        Column::Category,
        Column::Segment,
        Column::State,
        Column::Seller,
    ];

    /// Header string as it appears in the source spreadsheet.
    pub fn header(&self) -> &'static str {
        match self {
            Column::SaleDate => "Data da Venda",
            Column::SaleValue => "Valor da Venda",
            Column::Cost => "Custo",
            Column::Discount => "Desconto",
            Column::Quantity => "Quantidade",
            Column::Product => "Produto",
            Column::Category => "Categoria",
            Column::Segment => "Segmento",
            Column::State => "Estado",
            Column::Seller => "Vendedor",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Calendar period key for monthly trend grouping (the AnoMes of the source
/// data). Ordering is chronological: first by year, then by month.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One sales transaction. Raw fields mirror the spreadsheet columns; a cell
/// that is empty or fails to parse becomes `None` rather than aborting the
/// load. The derived fields are filled in once by [`SalesRecord::with_derived`]
/// and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalesRecord {
    pub sale_date: Option<NaiveDate>,
    pub sale_value: Option<f64>,
    pub cost: Option<f64>,
    pub discount: Option<f64>,
    pub quantity: Option<f64>,
    pub product: Option<String>,
    pub category: Option<String>,
    pub segment: Option<String>,
    pub state: Option<String>,
    pub seller: Option<String>,

    /// Sale value minus cost; present only when both inputs are present.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Year-month period of the sale date.
    #[serde(default)]
    pub period: Option<YearMonth>,
    /// Calendar year of the sale date.
    #[serde(default)]
    pub year: Option<i32>,
}

impl SalesRecord {
    /// Computes the derived columns (revenue, period, year) from the raw
    /// fields, replacing whatever was there before.
    pub fn with_derived(mut self) -> Self {
        self.revenue = match (self.sale_value, self.cost) {
            (Some(value), Some(cost)) => Some(value - cost),
            _ => None,
        };
        self.period = self.sale_date.map(YearMonth::from_date);
        self.year = self.sale_date.map(|d| d.year());
        self
    }

    /// True when the given column holds no value in this record.
    pub fn is_null(&self, column: Column) -> bool {
        match column {
            Column::SaleDate => self.sale_date.is_none(),
            Column::SaleValue => self.sale_value.is_none(),
            Column::Cost => self.cost.is_none(),
            Column::Discount => self.discount.is_none(),
            Column::Quantity => self.quantity.is_none(),
            Column::Product => self.product.is_none(),
            Column::Category => self.category.is_none(),
            Column::Segment => self.segment.is_none(),
            Column::State => self.state.is_none(),
            Column::Seller => self.seller.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_derivation() {
        let record = SalesRecord {
            sale_value: Some(100.0),
            cost: Some(60.0),
            ..Default::default()
        }
        .with_derived();
        assert_eq!(record.revenue, Some(40.0));

        let missing_cost = SalesRecord {
            sale_value: Some(100.0),
            ..Default::default()
        }
        .with_derived();
        assert_eq!(missing_cost.revenue, None);

        let missing_value = SalesRecord {
            cost: Some(60.0),
            ..Default::default()
        }
        .with_derived();
        assert_eq!(missing_value.revenue, None);
    }

    #[test]
    fn test_period_and_year_follow_date() {
        let dated = SalesRecord {
            sale_date: NaiveDate::from_ymd_opt(2023, 11, 5),
            ..Default::default()
        }
        .with_derived();
        assert_eq!(dated.period, Some(YearMonth::new(2023, 11)));
        assert_eq!(dated.year, Some(2023));

        let undated = SalesRecord::default().with_derived();
        assert_eq!(undated.period, None);
        assert_eq!(undated.year, None);
    }

    #[test]
    fn test_year_month_ordering() {
        let a = YearMonth::new(2022, 12);
        let b = YearMonth::new(2023, 1);
        let c = YearMonth::new(2023, 2);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(format!("{}", b), "2023-01");
    }

    #[test]
    fn test_null_detection_per_column() {
        let record = SalesRecord {
            sale_value: Some(10.0),
            state: Some("SP".to_string()),
            ..Default::default()
        };
        assert!(!record.is_null(Column::SaleValue));
        assert!(!record.is_null(Column::State));
        assert!(record.is_null(Column::Cost));
        assert!(record.is_null(Column::SaleDate));
    }

    #[test]
    fn test_column_headers_are_unique() {
        for (i, a) in Column::ALL.iter().enumerate() {
            for b in Column::ALL.iter().skip(i + 1) {
                assert_ne!(a.header(), b.header());
            }
        }
    }
}
