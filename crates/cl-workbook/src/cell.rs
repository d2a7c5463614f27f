//! A1-style cell addressing. Rows and columns are zero-based internally.

use serde::{Deserialize, Serialize};

/// Column letters for a zero-based column index (`0` → `A`, `27` → `AB`).
pub fn column_letter(col: u32) -> String {
    let mut col = col as u64;
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A single cell position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", column_letter(self.col), self.row + 1)
    }
}

/// An inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRange {
    pub first: CellRef,
    pub last: CellRef,
}

impl CellRange {
    /// Range spanning `first_row..=last_row` × `first_col..=last_col`.
    ///
    /// Corners are normalized so `first` is always top-left.
    pub fn new(first_row: u32, first_col: u32, last_row: u32, last_col: u32) -> Self {
        Self {
            first: CellRef::new(first_row.min(last_row), first_col.min(last_col)),
            last: CellRef::new(first_row.max(last_row), first_col.max(last_col)),
        }
    }

    /// Horizontal run on one row.
    pub fn row_span(row: u32, first_col: u32, last_col: u32) -> Self {
        Self::new(row, first_col, row, last_col)
    }

    pub fn is_single_cell(&self) -> bool {
        self.first == self.last
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        (self.first.row..=self.last.row).contains(&cell.row)
            && (self.first.col..=self.last.col).contains(&cell.col)
    }

    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.first.row <= other.last.row
            && other.first.row <= self.last.row
            && self.first.col <= other.last.col
            && other.first.col <= self.last.col
    }

    /// Number of rows covered.
    pub fn height(&self) -> u32 {
        self.last.row - self.first.row + 1
    }
}

impl std::fmt::Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.first, self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(6), "G");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_range_display() {
        assert_eq!(CellRange::new(2, 1, 4, 6).to_string(), "B3:G5");
        assert_eq!(CellRef::new(1, 1).to_string(), "B2");
        assert_eq!(CellRange::new(4, 6, 2, 1), CellRange::new(2, 1, 4, 6));
    }

    #[test]
    fn test_overlap() {
        let a = CellRange::new(2, 1, 4, 6);
        assert!(a.overlaps(&CellRange::row_span(4, 6, 8)));
        assert!(!a.overlaps(&CellRange::row_span(5, 1, 6)));
        assert!(!a.overlaps(&CellRange::new(0, 7, 10, 9)));
        assert!(a.contains(CellRef::new(3, 3)));
        assert_eq!(a.height(), 3);
    }
}
