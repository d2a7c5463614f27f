//! In-memory workbook model.

use crate::cell::{CellRange, CellRef};
use crate::error::{Result, WorkbookError};
use crate::style::{CellStyle, Rgb};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const MAX_SHEET_NAME: usize = 31;
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Content of a cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    /// Formatting only.
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// A styled cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// Document metadata written to `docProps/`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocProperties {
    pub title: String,
    pub subject: String,
    pub creator: String,
    pub company: String,
    pub created: DateTime<Utc>,
}

/// Two-cell image anchor, zero-based and exclusive of the `to` cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnchor {
    pub from_col: u32,
    pub from_row: u32,
    pub to_col: u32,
    pub to_row: u32,
}

impl ImageAnchor {
    pub const fn new(from_col: u32, from_row: u32, to_col: u32, to_row: u32) -> Self {
        Self {
            from_col,
            from_row,
            to_col,
            to_row,
        }
    }
}

/// A PNG image placed on a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetImage {
    /// Shown as the picture's name in spreadsheet applications.
    pub name: String,
    #[serde(skip)]
    pub data: Vec<u8>,
    pub anchor: ImageAnchor,
}

/// One sheet of styled cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Worksheet {
    name: String,
    tab_color: Option<Rgb>,
    column_widths: BTreeMap<u32, f64>,
    row_heights: BTreeMap<u32, f64>,
    cells: BTreeMap<CellRef, Cell>,
    merges: Vec<CellRange>,
    images: Vec<SheetImage>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tab_color(&self) -> Option<Rgb> {
        self.tab_color
    }

    pub fn set_tab_color(&mut self, color: Rgb) {
        self.tab_color = Some(color);
    }

    /// Width of a zero-based column in character units.
    pub fn set_column_width(&mut self, col: u32, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// Height of a zero-based row in points.
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.row_heights.insert(row, height);
    }

    pub fn column_widths(&self) -> &BTreeMap<u32, f64> {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    /// Set (or replace) a cell.
    pub fn set_cell(&mut self, row: u32, col: u32, value: CellValue, style: CellStyle) {
        self.cells
            .insert(CellRef::new(row, col), Cell { value, style });
    }

    pub fn cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&CellRef::new(row, col))
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells.iter().map(|(at, cell)| (*at, cell))
    }

    /// Highest used row index, if any cell is set.
    pub fn last_row(&self) -> Option<u32> {
        self.cells.keys().next_back().map(|at| at.row)
    }

    /// Merge a range. Merged ranges may not overlap.
    pub fn merge(&mut self, range: CellRange) -> Result<()> {
        if range.is_single_cell() {
            return Ok(());
        }
        if let Some(existing) = self.merges.iter().find(|m| m.overlaps(&range)) {
            return Err(WorkbookError::OverlappingMerge {
                sheet: self.name.clone(),
                range: range.to_string(),
                existing: existing.to_string(),
            });
        }
        self.merges.push(range);
        Ok(())
    }

    /// Merge `range`, put `value` in its top-left cell and paint every
    /// covered cell with `style` so fills and borders span the merge.
    pub fn write_merged(
        &mut self,
        range: CellRange,
        value: CellValue,
        style: CellStyle,
    ) -> Result<()> {
        self.merge(range)?;
        for row in range.first.row..=range.last.row {
            for col in range.first.col..=range.last.col {
                let value = if row == range.first.row && col == range.first.col {
                    value.clone()
                } else {
                    CellValue::Empty
                };
                self.set_cell(row, col, value, style.clone());
            }
        }
        Ok(())
    }

    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    /// Anchor a PNG image on the sheet.
    pub fn add_image(&mut self, image: SheetImage) -> Result<()> {
        if !image.data.starts_with(PNG_MAGIC) {
            return Err(WorkbookError::InvalidImage {
                sheet: self.name.clone(),
                reason: format!("'{}' is not a PNG", image.name),
            });
        }
        let a = image.anchor;
        if a.to_col <= a.from_col || a.to_row <= a.from_row {
            return Err(WorkbookError::InvalidImage {
                sheet: self.name.clone(),
                reason: format!("'{}' has an empty anchor", image.name),
            });
        }
        self.images.push(image);
        Ok(())
    }

    pub fn images(&self) -> &[SheetImage] {
        &self.images
    }
}

/// An ordered collection of sheets plus document metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    pub properties: DocProperties,
    sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new(properties: DocProperties) -> Self {
        Self {
            properties,
            sheets: Vec::new(),
        }
    }

    /// Append a sheet, returning its zero-based position.
    pub fn add_sheet(&mut self, sheet: Worksheet) -> Result<usize> {
        validate_sheet_name(sheet.name())?;
        if self
            .sheets
            .iter()
            .any(|s| s.name().eq_ignore_ascii_case(sheet.name()))
        {
            return Err(WorkbookError::DuplicateSheetName(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(self.sheets.len() - 1)
    }

    pub fn sheets(&self) -> &[Worksheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Worksheet::name).collect()
    }

    pub fn image_count(&self) -> usize {
        self.sheets.iter().map(|s| s.images().len()).sum()
    }
}

fn validate_sheet_name(name: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(WorkbookError::InvalidSheetName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };
    if name.trim().is_empty() {
        return reject("name is empty");
    }
    if name.chars().count() > MAX_SHEET_NAME {
        return reject("longer than 31 characters");
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        return reject(&format!("contains '{c}'"));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return reject("starts or ends with an apostrophe");
    }
    Ok(())
}
