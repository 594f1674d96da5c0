use crate::schema::{SalesRecord, YearMonth};
use std::collections::BTreeMap;

/// Sum of revenue across every record; rows without a revenue are skipped.
pub fn total_revenue(records: &[SalesRecord]) -> f64 {
    records.iter().filter_map(|r| r.revenue).sum()
}

/// Revenue summed per value of one grouping dimension, ascending by the sum
/// with ties ordered by key. Rows without a key are skipped by this grouping
/// only; a keyed row without revenue keeps its group, so a group whose rows
/// all lack revenue sums to 0.0.
pub fn revenue_by<F>(records: &[SalesRecord], key: F) -> Vec<(String, f64)>
where
    F: Fn(&SalesRecord) -> Option<&str>,
{
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        if let Some(key) = key(record) {
            let sum = sums.entry(key.to_string()).or_default();
            if let Some(revenue) = record.revenue {
                *sum += revenue;
            }
        }
    }

    let mut entries: Vec<(String, f64)> = sums.into_iter().collect();
    entries.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Monthly revenue series in chronological order. Rows without a period key
/// (unparseable dates) are excluded here and only here.
pub fn monthly_revenue(records: &[SalesRecord]) -> BTreeMap<YearMonth, f64> {
    let mut series: BTreeMap<YearMonth, f64> = BTreeMap::new();
    for record in records {
        if let Some(period) = record.period {
            let sum = series.entry(period).or_default();
            if let Some(revenue) = record.revenue {
                *sum += revenue;
            }
        }
    }
    series
}

/// Best-selling products by summed quantity, descending, at most `limit`
/// entries. Ties break ascending by product name so the cut is deterministic.
pub fn top_products_by_quantity(records: &[SalesRecord], limit: usize) -> Vec<(String, f64)> {
    let mut sums: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        if let Some(product) = record.product.as_deref() {
            let sum = sums.entry(product.to_string()).or_default();
            if let Some(quantity) = record.quantity {
                *sum += quantity;
            }
        }
    }

    let mut entries: Vec<(String, f64)> = sums.into_iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(limit);
    entries
}

/// One point of the discount-revenue scatter; the category selects the marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub discount: f64,
    pub revenue: f64,
    pub category: String,
}

/// Per-row discount/revenue pairs, no aggregation. Rows missing the
/// discount, the revenue, or the category are dropped from the plot.
pub fn discount_revenue_points(records: &[SalesRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .filter_map(|record| {
            match (record.discount, record.revenue, record.category.as_deref()) {
                (Some(discount), Some(revenue), Some(category)) => Some(ScatterPoint {
                    discount,
                    revenue,
                    category: category.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Pearson correlation between discount and revenue over complete pairs.
/// `None` with fewer than two pairs, or when either side has zero variance.
pub fn discount_revenue_correlation(records: &[SalesRecord]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|record| match (record.discount, record.revenue) {
            (Some(discount), Some(revenue)) => Some((discount, revenue)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance_x = 0.0;
    let mut variance_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }

    Some(covariance / (variance_x * variance_y).sqrt())
}

/// Five-number summary backing one box of a box plot. Quartiles use linear
/// interpolation between closest ranks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub count: usize,
}

impl BoxStats {
    /// `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Some(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.50),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
            count: sorted.len(),
        })
    }
}

/// Revenue distribution for one (segment, category) group.
#[derive(Debug, Clone)]
pub struct GroupDistribution {
    pub segment: String,
    pub category: String,
    pub stats: BoxStats,
}

/// Revenue distributions grouped by segment and category, ordered by segment
/// then category. Rows missing any of the three fields are skipped.
pub fn revenue_distribution_by_segment_category(
    records: &[SalesRecord],
) -> Vec<GroupDistribution> {
    let mut groups: BTreeMap<(String, String), Vec<f64>> = BTreeMap::new();
    for record in records {
        if let (Some(segment), Some(category), Some(revenue)) = (
            record.segment.as_deref(),
            record.category.as_deref(),
            record.revenue,
        ) {
            groups
                .entry((segment.to_string(), category.to_string()))
                .or_default()
                .push(revenue);
        }
    }

    groups
        .into_iter()
        .filter_map(|((segment, category), values)| {
            BoxStats::from_values(&values).map(|stats| GroupDistribution {
                segment,
                category,
                stats,
            })
        })
        .collect()
}

/// Quantile of an ascending-sorted, non-empty sample, interpolating linearly
/// between the two closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }

    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
