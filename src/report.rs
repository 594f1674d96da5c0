use crate::aggregate::{self, BoxStats};
use crate::chart;
use crate::schema::SalesRecord;
use crate::table::SalesTable;
use crate::utils::{format_currency, format_quantity};

pub fn data_summary(table: &SalesTable) -> String {
    log::debug!("Rendering data summary");
    let summary = table.summary();
    let name_width = summary
        .columns
        .iter()
        .map(|column| column.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = section("RESUMO GERAL DOS DADOS");
    out.push_str(&format!("Registros: {}\n\n", summary.record_count));
    out.push_str("Preenchimento por coluna:\n");
    for column in &summary.columns {
        out.push_str(&format!(
            "  {:<w$} {:>6} preenchidos, {:>4} nulos\n",
            column.name,
            column.non_null,
            column.nulls,
            w = name_width,
        ));
    }

    let sampled = table.sample(5);
    if !sampled.is_empty() {
        out.push_str("\nAmostra de registros:\n");
        for record in sampled {
            out.push_str(&format!("  {}\n", describe_record(record)));
        }
    }
    out
}

pub fn total_revenue(table: &SalesTable) -> String {
    log::debug!("Rendering total revenue");
    let total = aggregate::total_revenue(table.records());
    let mut out = section("RECEITA TOTAL");
    out.push_str(&format!(
        "Receita total do período: {}\n",
        format_currency(total)
    ));
    out
}

pub fn revenue_by_state(table: &SalesTable) -> String {
    log::debug!("Rendering revenue by state");
    let entries = aggregate::revenue_by(table.records(), |r| r.state.as_deref());
    grouped_revenue_section("RECEITA POR ESTADO", &entries)
}

pub fn revenue_by_category(table: &SalesTable) -> String {
    log::debug!("Rendering revenue by category");
    let entries = aggregate::revenue_by(table.records(), |r| r.category.as_deref());
    grouped_revenue_section("RECEITA POR CATEGORIA", &entries)
}

pub fn monthly_revenue(table: &SalesTable) -> String {
    log::debug!("Rendering monthly revenue");
    let series = aggregate::monthly_revenue(table.records());
    let points: Vec<(String, f64)> = series
        .iter()
        .map(|(month, value)| (month.to_string(), *value))
        .collect();

    let mut out = section("RECEITA MENSAL");
    for (month, value) in &points {
        out.push_str(&format!("  {}  {}\n", month, format_currency(*value)));
    }
    if !points.is_empty() {
        out.push('\n');
    }
    out.push_str(&chart::line_chart(&points, format_currency));
    out
}

pub fn top_products(table: &SalesTable) -> String {
    log::debug!("Rendering top products");
    let entries = aggregate::top_products_by_quantity(table.records(), 10);
    let mut out = section("PRODUTOS MAIS VENDIDOS (TOP 10)");
    out.push_str(&chart::column_chart(&entries, format_quantity));
    out
}

pub fn revenue_by_seller(table: &SalesTable) -> String {
    log::debug!("Rendering revenue by seller");
    let entries = aggregate::revenue_by(table.records(), |r| r.seller.as_deref());
    grouped_revenue_section("RECEITA POR VENDEDOR", &entries)
}

pub fn discount_vs_revenue(table: &SalesTable) -> String {
    log::debug!("Rendering discount vs revenue");
    let mut out = section("CORRELAÇÃO ENTRE DESCONTO E RECEITA");
    match aggregate::discount_revenue_correlation(table.records()) {
        Some(r) => out.push_str(&format!(
            "Coeficiente de correlação (Pearson): {:.4}\n\n",
            r
        )),
        None => out.push_str("Coeficiente de correlação: indefinido (dados insuficientes)\n\n"),
    }
    out.push_str(&chart::scatter_plot(&aggregate::discount_revenue_points(
        table.records(),
    )));
    out
}

pub fn revenue_by_segment_category(table: &SalesTable) -> String {
    log::debug!("Rendering revenue by segment and category");
    let groups = aggregate::revenue_distribution_by_segment_category(table.records());
    let rows: Vec<(String, BoxStats)> = groups
        .iter()
        .map(|group| (format!("{} / {}", group.segment, group.category), group.stats))
        .collect();

    let mut out = section("RECEITA POR SEGMENTO E CATEGORIA");
    out.push_str(&chart::box_plot(&rows, format_currency));
    out
}

pub fn render_all(table: &SalesTable) -> Vec<String> {
    vec![
        data_summary(table),
        total_revenue(table),
        revenue_by_state(table),
        revenue_by_category(table),
        monthly_revenue(table),
        top_products(table),
        revenue_by_seller(table),
        discount_vs_revenue(table),
        revenue_by_segment_category(table),
    ]
}

fn grouped_revenue_section(title: &str, entries: &[(String, f64)]) -> String {
    let mut out = section(title);
    out.push_str(&chart::horizontal_bar_chart(entries, format_currency));
    out
}

fn section(title: &str) -> String {
    let rule = "═".repeat(64);
    format!("\n{}\n  {}\n{}\n", rule, title, rule)
}

fn describe_record(record: &SalesRecord) -> String {
    let date = record
        .sale_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "sem data".to_string());
    let product = record.product.as_deref().unwrap_or("?");
    let state = record.state.as_deref().unwrap_or("?");
    let revenue = record
        .revenue
        .map(format_currency)
        .unwrap_or_else(|| "indefinida".to_string());
    format!("{}  {} ({})  receita {}", date, product, state, revenue)
}
