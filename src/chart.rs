use crate::aggregate::{BoxStats, ScatterPoint};
use crate::utils::{format_currency, format_number};
use std::collections::{BTreeMap, BTreeSet};

const BAR_WIDTH: usize = 40;
const COLUMN_HEIGHT: usize = 10;
const LINE_HEIGHT: usize = 10;
const SCATTER_WIDTH: usize = 56;
const SCATTER_HEIGHT: usize = 14;
const BOX_WIDTH: usize = 44;
const MARKERS: [char; 8] = ['●', '▲', '■', '◆', '✚', '✖', '◎', '★'];
const EMPTY_NOTE: &str = "  (sem dados)\n";

pub fn horizontal_bar_chart(entries: &[(String, f64)], format_value: fn(f64) -> String) -> String {
    if entries.is_empty() {
        return EMPTY_NOTE.to_string();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let max = entries.iter().map(|e| e.1).fold(f64::NEG_INFINITY, f64::max);

    let mut out = String::new();
    for (label, value) in entries {
        let bar = "█".repeat(bar_blocks(*value, max, BAR_WIDTH));
        out.push_str(&format!(
            "{:<lw$} │ {:<bw$} {}\n",
            label,
            bar,
            format_value(*value),
            lw = label_width,
            bw = BAR_WIDTH,
        ));
    }
    out
}

// Labels go in a numbered legend so they never collide with the columns.
pub fn column_chart(entries: &[(String, f64)], format_value: fn(f64) -> String) -> String {
    if entries.is_empty() {
        return EMPTY_NOTE.to_string();
    }

    let max = entries.iter().map(|e| e.1).fold(f64::NEG_INFINITY, f64::max);
    let heights: Vec<usize> = entries
        .iter()
        .map(|(_, value)| bar_blocks(*value, max, COLUMN_HEIGHT))
        .collect();

    let mut out = String::new();
    for row in (1..=COLUMN_HEIGHT).rev() {
        for &height in &heights {
            out.push_str(if height >= row { " ███" } else { "    " });
        }
        out.push('\n');
    }
    out.push_str(&"─".repeat(entries.len() * 4));
    out.push('\n');
    for index in 1..=entries.len() {
        out.push_str(&format!(" {:^3}", index));
    }
    out.push('\n');
    for (index, (label, value)) in entries.iter().enumerate() {
        out.push_str(&format!(" [{}] {}: {}\n", index + 1, label, format_value(*value)));
    }
    out
}

pub fn line_chart(points: &[(String, f64)], format_value: fn(f64) -> String) -> String {
    if points.is_empty() {
        return EMPTY_NOTE.to_string();
    }

    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    let marker_rows: Vec<usize> = points
        .iter()
        .map(|(_, value)| LINE_HEIGHT - 1 - scaled(*value, min, max, LINE_HEIGHT))
        .collect();

    let top_label = format_value(max);
    let bottom_label = format_value(min);
    let gutter = top_label.chars().count().max(bottom_label.chars().count());
    let width = points.len() * 3;

    let mut out = String::new();
    for row in 0..LINE_HEIGHT {
        let label = if row == 0 {
            top_label.as_str()
        } else if row == LINE_HEIGHT - 1 {
            bottom_label.as_str()
        } else {
            ""
        };
        let axis = if label.is_empty() { '│' } else { '┤' };
        out.push_str(&format!("{:>w$} {}", label, axis, w = gutter));
        for &marker_row in &marker_rows {
            out.push_str(if marker_row == row { " ● " } else { "   " });
        }
        out.push('\n');
    }
    out.push_str(&format!("{:>w$} └{}\n", "", "─".repeat(width), w = gutter));
    out.push_str(&x_axis_labels(
        gutter + 2,
        width,
        &points[0].0,
        &points[points.len() - 1].0,
        points.len() == 1,
    ));
    out
}

// One marker glyph per category, assigned alphabetically; when two points
// land on the same cell the later one wins.
pub fn scatter_plot(points: &[ScatterPoint]) -> String {
    if points.is_empty() {
        return EMPTY_NOTE.to_string();
    }

    let min_x = points.iter().map(|p| p.discount).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.discount).fold(f64::NEG_INFINITY, f64::max);
    let min_y = points.iter().map(|p| p.revenue).fold(f64::INFINITY, f64::min);
    let max_y = points.iter().map(|p| p.revenue).fold(f64::NEG_INFINITY, f64::max);

    let categories: BTreeSet<&str> = points.iter().map(|p| p.category.as_str()).collect();
    let glyphs: BTreeMap<&str, char> = categories
        .iter()
        .enumerate()
        .map(|(index, category)| (*category, MARKERS[index % MARKERS.len()]))
        .collect();

    let mut grid = vec![vec![' '; SCATTER_WIDTH]; SCATTER_HEIGHT];
    for point in points {
        let column = scaled(point.discount, min_x, max_x, SCATTER_WIDTH);
        let row = SCATTER_HEIGHT - 1 - scaled(point.revenue, min_y, max_y, SCATTER_HEIGHT);
        grid[row][column] = glyphs[point.category.as_str()];
    }

    let top_label = format_currency(max_y);
    let bottom_label = format_currency(min_y);
    let gutter = top_label.chars().count().max(bottom_label.chars().count());

    let mut out = String::new();
    for (row, cells) in grid.iter().enumerate() {
        let label = if row == 0 {
            top_label.as_str()
        } else if row == SCATTER_HEIGHT - 1 {
            bottom_label.as_str()
        } else {
            ""
        };
        let axis = if label.is_empty() { '│' } else { '┤' };
        out.push_str(&format!("{:>w$} {}", label, axis, w = gutter));
        out.extend(cells.iter());
        out.push('\n');
    }
    out.push_str(&format!("{:>w$} └{}\n", "", "─".repeat(SCATTER_WIDTH), w = gutter));
    out.push_str(&x_axis_labels(
        gutter + 2,
        SCATTER_WIDTH,
        &format_number(min_x),
        &format_number(max_x),
        min_x == max_x,
    ));
    for (category, glyph) in &glyphs {
        out.push_str(&format!("  {} {}\n", glyph, category));
    }
    out
}

// Whiskers from min to max, a ▓ box from q1 to q3, a █ median mark; every
// row shares one scale.
pub fn box_plot(rows: &[(String, BoxStats)], format_value: fn(f64) -> String) -> String {
    if rows.is_empty() {
        return EMPTY_NOTE.to_string();
    }

    let min = rows.iter().map(|r| r.1.min).fold(f64::INFINITY, f64::min);
    let max = rows.iter().map(|r| r.1.max).fold(f64::NEG_INFINITY, f64::max);
    let label_width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, stats) in rows {
        let mut canvas = vec![' '; BOX_WIDTH];
        let p_min = scaled(stats.min, min, max, BOX_WIDTH);
        let p_q1 = scaled(stats.q1, min, max, BOX_WIDTH);
        let p_median = scaled(stats.median, min, max, BOX_WIDTH);
        let p_q3 = scaled(stats.q3, min, max, BOX_WIDTH);
        let p_max = scaled(stats.max, min, max, BOX_WIDTH);

        for cell in canvas.iter_mut().take(p_max + 1).skip(p_min) {
            *cell = '─';
        }
        for cell in canvas.iter_mut().take(p_q3 + 1).skip(p_q1) {
            *cell = '▓';
        }
        canvas[p_min] = '├';
        canvas[p_max] = '┤';
        canvas[p_median] = '█';

        out.push_str(&format!(
            "{:<lw$} {} (n={})\n",
            label,
            canvas.iter().collect::<String>(),
            stats.count,
            lw = label_width,
        ));
    }
    out.push_str(&x_axis_labels(
        label_width + 1,
        BOX_WIDTH,
        &format_value(min),
        &format_value(max),
        min == max,
    ));
    out
}

// `indent` must equal the column where the plot area starts.
fn x_axis_labels(indent: usize, width: usize, low: &str, high: &str, single: bool) -> String {
    let pad = " ".repeat(indent);
    if single {
        return format!("{}{}\n", pad, low);
    }
    let used = low.chars().count() + high.chars().count();
    if width >= used + 2 {
        format!("{}{}{}{}\n", pad, low, " ".repeat(width - used), high)
    } else {
        format!("{}{} .. {}\n", pad, low, high)
    }
}

// Positive values always draw at least one block; zero, negative and
// unscalable values draw none.
fn bar_blocks(value: f64, max: f64, width: usize) -> usize {
    if !(max > 0.0) || value <= 0.0 {
        return 0;
    }
    (((value / max) * width as f64) as usize).clamp(1, width)
}

// A zero-width range lands mid-scale.
fn scaled(value: f64, min: f64, max: f64, slots: usize) -> usize {
    if slots <= 1 {
        return 0;
    }
    let range = max - min;
    if range <= 0.0 {
        return (slots - 1) / 2;
    }
    let position = ((value - min) / range) * (slots - 1) as f64;
    (position.round() as usize).min(slots - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(value: f64) -> String {
        format!("{:.0}", value)
    }

    fn block_count(line: &str) -> usize {
        line.chars().filter(|c| *c == '█').count()
    }

    #[test]
    fn test_scaled_endpoints_and_flat_range() {
        assert_eq!(scaled(0.0, 0.0, 10.0, 41), 0);
        assert_eq!(scaled(10.0, 0.0, 10.0, 41), 40);
        assert_eq!(scaled(5.0, 0.0, 10.0, 41), 20);
        assert_eq!(scaled(7.0, 7.0, 7.0, 41), 20);
    }

    #[test]
    fn test_bar_lengths_proportional_with_full_width_max() {
        let entries = vec![
            ("RJ".to_string(), 50.0),
            ("MG".to_string(), 100.0),
            ("SP".to_string(), 200.0),
        ];
        let chart = horizontal_bar_chart(&entries, plain);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(block_count(lines[0]), 10);
        assert_eq!(block_count(lines[1]), 20);
        assert_eq!(block_count(lines[2]), BAR_WIDTH);
        assert!(lines[2].starts_with("SP"));
        assert!(lines[2].ends_with("200"));
    }

    #[test]
    fn test_bar_chart_nonpositive_values_draw_no_blocks() {
        let entries = vec![
            ("A".to_string(), -25.0),
            ("B".to_string(), 0.0),
            ("C".to_string(), 100.0),
        ];
        let chart = horizontal_bar_chart(&entries, plain);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(block_count(lines[0]), 0);
        assert_eq!(block_count(lines[1]), 0);
        assert!(lines[0].contains("-25"));
    }

    #[test]
    fn test_bar_chart_tiny_positive_value_still_visible() {
        let entries = vec![
            ("small".to_string(), 1.0),
            ("large".to_string(), 10_000.0),
        ];
        let chart = horizontal_bar_chart(&entries, plain);
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(block_count(lines[0]), 1);
        assert_eq!(block_count(lines[1]), BAR_WIDTH);
    }

    #[test]
    fn test_column_chart_heights_and_legend() {
        let entries = vec![
            ("Keyboard".to_string(), 10.0),
            ("Mouse".to_string(), 5.0),
        ];
        let chart = column_chart(&entries, plain);

        // 10 + 5 column cells of "███" across the grid rows
        assert_eq!(chart.matches("███").count(), COLUMN_HEIGHT + COLUMN_HEIGHT / 2);
        assert!(chart.contains(" [1] Keyboard: 10"));
        assert!(chart.contains(" [2] Mouse: 5"));

        // only the tallest column reaches the top row
        let top_row = chart.lines().next().unwrap();
        assert_eq!(top_row.matches("███").count(), 1);
    }

    #[test]
    fn test_line_chart_one_marker_per_point() {
        let points = vec![
            ("2023-01".to_string(), 100.0),
            ("2023-02".to_string(), 300.0),
            ("2023-03".to_string(), 200.0),
        ];
        let chart = line_chart(&points, plain);

        assert_eq!(chart.matches('●').count(), 3);
        assert!(chart.contains("300 ┤"));
        assert!(chart.contains("100 ┤"));
        assert!(chart.contains("2023-01"));
        assert!(chart.contains("2023-03"));
    }

    #[test]
    fn test_line_chart_flat_series_sits_on_one_row() {
        let points = vec![
            ("2023-01".to_string(), 50.0),
            ("2023-02".to_string(), 50.0),
        ];
        let chart = line_chart(&points, plain);

        let marker_rows = chart.lines().filter(|l| l.contains('●')).count();
        assert_eq!(marker_rows, 1);
        assert_eq!(chart.matches('●').count(), 2);
    }

    #[test]
    fn test_scatter_assigns_one_glyph_per_category() {
        let points = vec![
            ScatterPoint {
                discount: 0.05,
                revenue: 10.0,
                category: "Moveis".to_string(),
            },
            ScatterPoint {
                discount: 0.25,
                revenue: 90.0,
                category: "Tecnologia".to_string(),
            },
        ];
        let chart = scatter_plot(&points);

        // alphabetical assignment: Moveis gets the first marker
        assert!(chart.contains("  ● Moveis"));
        assert!(chart.contains("  ▲ Tecnologia"));
        assert_eq!(chart.matches('●').count(), 2);
        assert_eq!(chart.matches('▲').count(), 2);
    }

    #[test]
    fn test_box_plot_rows_share_one_scale() {
        let rows = vec![
            (
                "Consumer / Tech".to_string(),
                BoxStats {
                    min: 0.0,
                    q1: 25.0,
                    median: 50.0,
                    q3: 75.0,
                    max: 100.0,
                    count: 5,
                },
            ),
            (
                "Corporate / Tech".to_string(),
                BoxStats {
                    min: 40.0,
                    q1: 45.0,
                    median: 50.0,
                    q3: 55.0,
                    max: 60.0,
                    count: 3,
                },
            ),
        ];
        let chart = box_plot(&rows, plain);
        let lines: Vec<&str> = chart.lines().collect();

        assert!(lines[0].starts_with("Consumer / Tech"));
        assert!(lines[0].contains('├'));
        assert!(lines[0].contains('┤'));
        assert!(lines[0].contains('█'));
        assert!(lines[0].contains("(n=5)"));
        // the narrow group spans fewer cells than the wide one
        let span = |line: &str| {
            let chars: Vec<char> = line.chars().collect();
            let start = chars.iter().position(|c| *c == '├').unwrap();
            let end = chars.iter().position(|c| *c == '┤').unwrap();
            end - start
        };
        assert!(span(lines[1]) < span(lines[0]));
        // footer carries the shared scale bounds
        assert!(lines[2].contains('0'));
        assert!(lines[2].contains("100"));
    }

    #[test]
    fn test_box_plot_scale_bounds_align_with_canvas() {
        let rows = vec![(
            "Consumer".to_string(),
            BoxStats {
                min: 10.0,
                q1: 20.0,
                median: 30.0,
                q3: 40.0,
                max: 50.0,
                count: 4,
            },
        )];
        let chart = box_plot(&rows, plain);
        let lines: Vec<&str> = chart.lines().collect();

        // the row's min is the shared min, so its whisker opens the canvas
        let canvas_start = lines[0].chars().position(|c| c == '├').unwrap();
        let bounds_start = lines[1].chars().position(|c| c != ' ').unwrap();
        assert_eq!(bounds_start, canvas_start);
        assert!(lines[1].trim_start().starts_with("10"));
        assert!(lines[1].ends_with("50"));
    }

    #[test]
    fn test_empty_inputs_render_placeholder() {
        assert_eq!(horizontal_bar_chart(&[], plain), EMPTY_NOTE);
        assert_eq!(column_chart(&[], plain), EMPTY_NOTE);
        assert_eq!(line_chart(&[], plain), EMPTY_NOTE);
        assert_eq!(scatter_plot(&[]), EMPTY_NOTE);
        assert_eq!(box_plot(&[], plain), EMPTY_NOTE);
    }
}
