//! Lowers a [`ReportDocument`] onto the workbook cell grid.

use crate::document::{
    ChartContent, ColumnSpan, ImagePlacement, KeyValueTable, Region, ReportDocument, Sheet,
    SheetKind, TableCell, TableRow, TextBlock, TitleBlock,
};
use crate::sections::sheet_tint;
use crate::style::{numeric, template, title_row_height, CellRole};
use chrono::Utc;
use cl_workbook::{
    CellRange, CellStyle, CellValue, DocProperties, ImageAnchor, Result, SheetImage, Workbook,
    Worksheet,
};

const BAND_HEIGHT: f64 = 22.0;
const PLACEHOLDER_HEIGHT: f64 = 40.0;

/// Build the workbook for a document: one worksheet per sheet, in order.
pub fn lower(doc: &ReportDocument) -> Result<Workbook> {
    let mut workbook = Workbook::new(DocProperties {
        title: doc.title.clone(),
        subject: doc.subject.clone(),
        creator: doc.creator.clone(),
        company: doc.company.clone().unwrap_or_default(),
        created: doc.generated_at.with_timezone(&Utc),
    });
    for sheet in &doc.sheets {
        workbook.add_sheet(lower_sheet(sheet)?)?;
    }
    Ok(workbook)
}

fn lower_sheet(sheet: &Sheet) -> Result<Worksheet> {
    let mut ws = Worksheet::new(sheet.name());
    ws.set_tab_color(sheet.tab_color());
    for (col, width) in sheet.column_widths().iter().enumerate() {
        ws.set_column_width(col as u32, *width);
    }

    for placed in sheet.regions() {
        let row = placed.first_row;
        match &placed.region {
            Region::Title(t) => title(&mut ws, row, t)?,
            Region::KeyValue(t) => table(&mut ws, row, t)?,
            Region::Image(i) => images(&mut ws, row, i)?,
            Region::Text(t) => text(&mut ws, row, t)?,
        }
    }
    Ok(ws)
}

/// Write a value across `span` on one row, merging when it covers more
/// than one column.
fn put(
    ws: &mut Worksheet,
    row: u32,
    span: ColumnSpan,
    value: CellValue,
    style: CellStyle,
) -> Result<()> {
    if span.first == span.last {
        ws.set_cell(row, span.first, value, style);
        Ok(())
    } else {
        ws.write_merged(CellRange::row_span(row, span.first, span.last), value, style)
    }
}

fn title(ws: &mut Worksheet, row: u32, t: &TitleBlock) -> Result<()> {
    let style = template(CellRole::Title(t.level), &t.tint, 0);
    let last_row = row + t.rows.max(1) - 1;
    let value = CellValue::text(t.text.as_str());
    if last_row == row {
        put(ws, row, t.span, value, style)?;
    } else {
        ws.write_merged(
            CellRange::new(row, t.span.first, last_row, t.span.last),
            value,
            style,
        )?;
    }
    for r in row..=last_row {
        ws.set_row_height(r, title_row_height(t.level));
    }
    Ok(())
}

fn table(ws: &mut Worksheet, first_row: u32, t: &KeyValueTable) -> Result<()> {
    let mut row = first_row;

    if let Some(header) = &t.header {
        for (column, label) in t.columns.iter().zip(header) {
            put(
                ws,
                row,
                column.span,
                CellValue::text(label.as_str()),
                template(CellRole::Header, &t.tint, 0),
            )?;
        }
        row += 1;
    }

    for (index, entry) in t.rows.iter().enumerate() {
        match entry {
            TableRow::Data { cells } => {
                for (column, cell) in t.columns.iter().zip(cells) {
                    let base = CellRole::Column(column.role);
                    let (value, style) = match cell {
                        TableCell::Text(s) => {
                            (CellValue::text(s.as_str()), template(base, &t.tint, index))
                        }
                        TableCell::Number(n) => {
                            (CellValue::Number(*n), numeric(template(base, &t.tint, index)))
                        }
                        TableCell::Status { verified, text } => (
                            CellValue::text(text.as_str()),
                            template(CellRole::Status { verified: *verified }, &t.tint, index),
                        ),
                        TableCell::Empty => (CellValue::Empty, template(base, &t.tint, index)),
                    };
                    put(ws, row, column.span, value, style)?;
                }
            }
            TableRow::Band { text, tint } => {
                put(
                    ws,
                    row,
                    t.span(),
                    CellValue::text(text.as_str()),
                    template(CellRole::Band, tint, index),
                )?;
                ws.set_row_height(row, BAND_HEIGHT);
            }
            TableRow::Spacer => {}
        }
        row += 1;
    }
    Ok(())
}

fn images(ws: &mut Worksheet, row: u32, placement: &ImagePlacement) -> Result<()> {
    for chart in &placement.charts {
        match &chart.content {
            ChartContent::Image { data, .. } => ws.add_image(SheetImage {
                name: chart.title.clone(),
                data: data.clone(),
                anchor: ImageAnchor::new(
                    chart.from_col,
                    row,
                    chart.to_col,
                    row + placement.height,
                ),
            })?,
            ChartContent::Placeholder { reason } => {
                let span = ColumnSpan::new(chart.from_col, chart.to_col.saturating_sub(1));
                put(
                    ws,
                    row,
                    span,
                    CellValue::Text(format!("{}\n{}", chart.title, reason)),
                    template(CellRole::Placeholder, &sheet_tint(SheetKind::Charts), 0),
                )?;
                ws.set_row_height(row, PLACEHOLDER_HEIGHT);
            }
        }
    }
    Ok(())
}

fn text(ws: &mut Worksheet, first_row: u32, t: &TextBlock) -> Result<()> {
    for (index, line) in t.lines.iter().enumerate() {
        let row = first_row + index as u32;
        put(
            ws,
            row,
            t.span,
            CellValue::text(line.as_str()),
            template(CellRole::Text(t.style), &t.tint, index),
        )?;
        if let Some(height) = t.line_height.for_line(line) {
            ws.set_row_height(row, height);
        }
    }
    Ok(())
}
