//! Styled workbook model and `.xlsx` writer.
//!
//! A [`Workbook`] is an in-memory list of [`Worksheet`]s holding styled
//! cells, merged ranges, column widths, row heights and anchored PNG images.
//! [`XlsxWriter`] turns it into a SpreadsheetML package (a ZIP archive of
//! XML parts plus media) that spreadsheet applications open directly.
//!
//! # Package layout
//!
//! - `[Content_Types].xml`, `_rels/.rels`, `docProps/{app,core}.xml`
//! - `xl/workbook.xml`, `xl/_rels/workbook.xml.rels`, `xl/styles.xml`
//! - `xl/worksheets/sheetN.xml` (+ `_rels` when the sheet has images)
//! - `xl/drawings/drawingN.xml` (+ `_rels`) and `xl/media/imageN.png`
//!
//! Strings are written inline (`t="inlineStr"`), so no shared string table
//! is emitted.
//!
//! # Example
//!
//! ```no_run
//! use cl_workbook::{CellStyle, CellValue, Workbook, Worksheet, XlsxWriter};
//! use std::path::Path;
//!
//! let mut sheet = Worksheet::new("Summary");
//! sheet.set_cell(0, 0, CellValue::text("Total mass"), CellStyle::default());
//! sheet.set_cell(0, 1, CellValue::Number(2.0), CellStyle::default());
//!
//! let mut workbook = Workbook::default();
//! workbook.add_sheet(sheet).unwrap();
//! XlsxWriter::from_workbook(&workbook).unwrap().write(Path::new("out.xlsx")).unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod model;
pub mod style;
pub mod writer;
mod xml;

pub use cell::{column_letter, CellRange, CellRef};
pub use error::{Result, WorkbookError};
pub use model::{Cell, CellValue, DocProperties, ImageAnchor, SheetImage, Workbook, Worksheet};
pub use style::{
    Alignment, BorderLine, BorderWeight, CellStyle, Font, HorizontalAlign, Rgb, StyleSheet,
    VerticalAlign,
};
pub use writer::{WorkbookSerializer, XlsxSerializer, XlsxWriter};

/// MIME type of the produced package.
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
