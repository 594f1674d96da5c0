//! Renders the full sales report over a small in-memory dataset, without
//! reading any spreadsheet.
//!
//! Run with: `cargo run --example quick_report`

use chrono::NaiveDate;
use sales_insights::{report, SalesRecord, SalesTable};

#[allow(clippy::too_many_arguments)]
fn sale(
    date: (i32, u32, u32),
    value: f64,
    cost: f64,
    discount: f64,
    quantity: f64,
    product: &str,
    category: &str,
    segment: &str,
    state: &str,
    seller: &str,
) -> SalesRecord {
    SalesRecord {
        sale_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2),
        sale_value: Some(value),
        cost: Some(cost),
        discount: Some(discount),
        quantity: Some(quantity),
        product: Some(product.to_string()),
        category: Some(category.to_string()),
        segment: Some(segment.to_string()),
        state: Some(state.to_string()),
        seller: Some(seller.to_string()),
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    let mut records = vec![
        sale((2023, 1, 12), 3500.0, 2100.0, 0.05, 2.0, "Notebook", "Tecnologia", "Consumer", "SP", "Ana"),
        sale((2023, 1, 20), 450.0, 180.0, 0.10, 5.0, "Cadeira", "Moveis", "Corporate", "RJ", "Bruno"),
        sale((2023, 2, 3), 1200.0, 700.0, 0.00, 1.0, "Monitor", "Tecnologia", "Consumer", "SP", "Ana"),
        sale((2023, 2, 14), 90.0, 40.0, 0.15, 12.0, "Caderno", "Papelaria", "Consumer", "MG", "Carla"),
        sale((2023, 2, 25), 2200.0, 1500.0, 0.08, 1.0, "Mesa", "Moveis", "Corporate", "SP", "Bruno"),
        sale((2023, 3, 2), 300.0, 120.0, 0.20, 8.0, "Mouse", "Tecnologia", "Consumer", "RJ", "Ana"),
        sale((2023, 3, 9), 150.0, 60.0, 0.05, 10.0, "Caneta", "Papelaria", "Corporate", "MG", "Carla"),
        sale((2023, 3, 18), 5200.0, 3600.0, 0.12, 3.0, "Notebook", "Tecnologia", "Corporate", "SP", "Bruno"),
        sale((2023, 4, 6), 800.0, 350.0, 0.10, 4.0, "Estante", "Moveis", "Consumer", "RJ", "Carla"),
        sale((2023, 4, 21), 600.0, 280.0, 0.18, 6.0, "Teclado", "Tecnologia", "Consumer", "MG", "Ana"),
    ];

    // one incomplete row: no cost, so no revenue, and an unparseable date
    records.push(SalesRecord {
        sale_value: Some(150.0),
        quantity: Some(2.0),
        product: Some("Luminaria".to_string()),
        category: Some("Moveis".to_string()),
        segment: Some("Consumer".to_string()),
        state: Some("SP".to_string()),
        seller: Some("Carla".to_string()),
        ..Default::default()
    });

    let table = SalesTable::from_records(records);
    for section in report::render_all(&table) {
        print!("{}", section);
    }
    println!();
}
