use super::{round_to, stroke_style};
use crate::html::parse_cell_fragment;
use crate::options::Context;
use crate::raw::{RawBorder, RawBorders, RawCell, RawTable};
use crate::types::{new_id, Outline, TableCell, TableCellStyle, TableElement, TextAlign};

const DEFAULT_BORDER_COLOR: &str = "#eeece1";
const DEFAULT_BORDER_WIDTH: f64 = 2.0;
const DEFAULT_CELL_MIN_HEIGHT: f64 = 36.0;

/// Convert a table with per-cell styling and one shared outline.
pub fn convert_table(el: &RawTable, ctx: &Context<'_>) -> TableElement {
    let frame = ctx.ratio.frame(&el.frame);

    let data = el
        .data
        .iter()
        .map(|row| row.iter().map(|cell| convert_cell(cell, ctx)).collect())
        .collect();

    let column_count = el.data.iter().map(Vec::len).max().unwrap_or(0);

    TableElement {
        id: new_id(),
        left: frame.left,
        top: frame.top,
        width: frame.width,
        height: frame.height,
        rotate: el.frame.rotate,
        col_widths: normalize_col_widths(&el.col_widths, column_count),
        cell_min_height: el
            .row_heights
            .first()
            .filter(|h| **h > 0.0)
            .map(|h| ctx.ratio.scale(*h))
            .unwrap_or(DEFAULT_CELL_MIN_HEIGHT),
        data,
        outline: table_outline(el, ctx),
    }
}

/// Column widths as fractions of their total.
///
/// Widths that sum to zero (or are missing) become equal shares of
/// `column_count`.
pub fn normalize_col_widths(widths: &[f64], column_count: usize) -> Vec<f64> {
    let total: f64 = widths.iter().sum();
    if widths.is_empty() || total <= 0.0 || !total.is_finite() {
        let count = if widths.is_empty() {
            column_count
        } else {
            widths.len()
        };
        return vec![1.0 / count as f64; count];
    }
    widths.iter().map(|w| w / total).collect()
}

fn convert_cell(cell: &RawCell, ctx: &Context<'_>) -> TableCell {
    let fragment = parse_cell_fragment(&cell.text);

    let align = match fragment.align.as_deref() {
        Some("center") => TextAlign::Center,
        Some("right") => TextAlign::Right,
        _ => TextAlign::Left,
    };

    TableCell {
        id: new_id(),
        colspan: cell.col_span.unwrap_or(1).max(1),
        rowspan: cell.row_span.unwrap_or(1).max(1),
        text: fragment.text,
        style: TableCellStyle {
            bold: cell.font_bold,
            color: fragment
                .color
                .or_else(|| cell.font_color.clone().filter(|c| !c.is_empty()))
                .unwrap_or_else(|| ctx.theme.font_color.clone()),
            backcolor: cell.fill_color.clone().filter(|c| !c.is_empty()),
            fontsize: fragment
                .font_size
                .map(|size| format!("{:.1}px", ctx.ratio.scale(size))),
            fontname: fragment
                .font_family
                .unwrap_or_else(|| ctx.theme.font_name.clone()),
            align,
        },
    }
}

/// The first visible border of the first cell, then of the table itself.
fn table_outline(el: &RawTable, ctx: &Context<'_>) -> Outline {
    let first_cell = el.data.first().and_then(|row| row.first());

    let border = first_cell
        .and_then(|cell| first_border(&cell.borders))
        .or_else(|| first_border(&el.borders));

    let width = border
        .map(|b| ctx.ratio.scale(b.border_width))
        .filter(|w| *w > 0.0)
        .unwrap_or(DEFAULT_BORDER_WIDTH);

    Outline {
        color: border
            .map(|b| b.border_color.clone())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_BORDER_COLOR.to_string()),
        width: round_to(width, 2),
        style: stroke_style(border.map(|b| b.border_type.as_str()).unwrap_or_default()),
    }
}

fn first_border(borders: &RawBorders) -> Option<&RawBorder> {
    [&borders.top, &borders.bottom, &borders.left, &borders.right]
        .into_iter()
        .flatten()
        .find(|b| b.border_width > 0.0 || !b.border_color.is_empty())
}
