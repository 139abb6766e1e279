//! Plain aligned-column table rendering.

const MIN_COLUMN_WIDTH: usize = 4;
const COLUMN_GAP: &str = "  ";

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    /// Total width budget; wide columns shrink (with `…`) to fit.
    pub max_width: Option<usize>,
    /// Colorize HTTP-status-looking cells.
    pub color: bool,
}

/// Render an aligned table: header, dashed divider, one line per row.
/// Numeric cells right-align; over-wide cells truncate with an ellipsis.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let widths = column_widths(headers, rows, options.max_width);

    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&truncate(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    let divider = "-".repeat(header_line.len());

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push(divider);
    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                let cell = truncate(cell, *width);
                let numeric = looks_numeric(&cell);
                let padded = pad(&cell, *width, numeric);
                if options.color { colorize_status(&padded) } else { padded }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP);
        lines.push(line);
    }
    lines.join("\n")
}

/// Natural widths, shrunk to the budget by repeatedly narrowing the widest
/// column that still exceeds its header width.
fn column_widths(headers: &[&str], rows: &[Vec<String>], max_width: Option<usize>) -> Vec<usize> {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    let Some(max_width) = max_width else {
        return widths;
    };
    let gaps = widths.len().saturating_sub(1) * COLUMN_GAP.len();

    while widths.iter().sum::<usize>() + gaps > max_width {
        let shrinkable = widths
            .iter()
            .enumerate()
            .filter(|&(index, width)| {
                *width > headers[index].chars().count().max(MIN_COLUMN_WIDTH)
            })
            .max_by_key(|&(_, width)| *width);
        let Some((index, _)) = shrinkable else {
            break;
        };
        widths[index] -= 1;
    }
    widths
}

fn truncate(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let fill = width.saturating_sub(text.chars().count());
    if right_align {
        format!("{}{text}", " ".repeat(fill))
    } else {
        format!("{text}{}", " ".repeat(fill))
    }
}

fn looks_numeric(cell: &str) -> bool {
    let trimmed = cell.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

/// Green for 2xx, red for 4xx/5xx; anything else passes through.
fn colorize_status(padded: &str) -> String {
    let trimmed = padded.trim();
    let Ok(status) = trimmed.parse::<u16>() else {
        return padded.to_string();
    };
    match status {
        200..=299 => format!("{GREEN}{padded}{RESET}"),
        400..=599 => format!("{RED}{padded}{RESET}"),
        _ => padded.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn no_color() -> TableOptions {
        TableOptions {
            max_width: None,
            color: false,
        }
    }

    #[test]
    fn aligns_mixed_width_columns() {
        let headers = ["id", "status", "model"];
        let rows = vec![
            vec!["req-1".to_string(), "200".to_string(), "gpt-4o".to_string()],
            vec![
                "req-200".to_string(),
                "500".to_string(),
                "claude-sonnet-4".to_string(),
            ],
        ];
        let table = render_table(&headers, &rows, no_color());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("id"));
        assert!(lines[0].contains("status"));
        assert!(lines[1].chars().all(|c| c == '-'));
        // Numeric status right-aligns within its column.
        assert!(lines[2].contains("   200"));
    }

    #[test]
    fn shrinks_to_width_budget_with_ellipsis() {
        let headers = ["id", "note"];
        let rows = vec![vec![
            "req-1".to_string(),
            "a very long note that will not fit".to_string(),
        ]];
        let table = render_table(
            &headers,
            &rows,
            TableOptions {
                max_width: Some(24),
                color: false,
            },
        );
        let first = table.lines().next().expect("header");
        assert!(first.len() <= 24);
        assert!(table.contains('…'));
    }

    #[test]
    fn missing_cells_render_dash() {
        let headers = ["a", "b"];
        let rows = vec![vec!["x".to_string()]];
        let table = render_table(&headers, &rows, no_color());
        assert!(table.lines().nth(2).is_some_and(|line| line.contains('-')));
    }

    #[test]
    fn status_cells_colorize_when_enabled() {
        let headers = ["status"];
        let rows = vec![vec!["404".to_string()]];
        let table = render_table(
            &headers,
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        assert!(table.contains("\x1b[31m"));
    }
}
