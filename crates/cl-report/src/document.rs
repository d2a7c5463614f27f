//! Structured report document.
//!
//! A [`ReportDocument`] is a fixed sequence of [`Sheet`]s. Each sheet is an
//! ordered list of [`Region`]s placed by a forward-only [`RowCursor`]: a region
//! claims the rows starting at the cursor and the cursor moves past them, so
//! regions never overlap and their row ranges strictly increase.

use crate::format;
use chrono::{DateTime, FixedOffset};
use cl_chart::{ChartId, ImageEncoding};
use cl_math::Measure;
use cl_workbook::Rgb;
use serde::Serialize;

/// The seven report sheets, in workbook order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetKind {
    Cover,
    ExperimentalData,
    Charts,
    Formulas,
    Statistics,
    Comparison,
    Notes,
}

impl SheetKind {
    pub const ALL: [SheetKind; 7] = [
        SheetKind::Cover,
        SheetKind::ExperimentalData,
        SheetKind::Charts,
        SheetKind::Formulas,
        SheetKind::Statistics,
        SheetKind::Comparison,
        SheetKind::Notes,
    ];

    /// Worksheet tab name.
    pub fn name(self) -> &'static str {
        match self {
            SheetKind::Cover => "Cover",
            SheetKind::ExperimentalData => "Experimental Data",
            SheetKind::Charts => "Charts",
            SheetKind::Formulas => "Formulas",
            SheetKind::Statistics => "Statistical Analysis",
            SheetKind::Comparison => "Comparative Table",
            SheetKind::Notes => "Notes & Recommendations",
        }
    }

    pub fn tab_color(self) -> Rgb {
        match self {
            SheetKind::Cover => Rgb::hex(0x1A237E),
            SheetKind::ExperimentalData => Rgb::hex(0x4472C4),
            SheetKind::Charts => Rgb::hex(0xFF0000),
            SheetKind::Formulas => Rgb::hex(0xED7D31),
            SheetKind::Statistics => Rgb::hex(0x9C27B0),
            SheetKind::Comparison => Rgb::hex(0x00BCD4),
            SheetKind::Notes => Rgb::hex(0xFF9800),
        }
    }

    /// Column widths from column A onward, in character units.
    pub fn column_widths(self) -> &'static [f64] {
        match self {
            SheetKind::Cover => &[15.0; 8],
            SheetKind::ExperimentalData => &[5.0, 30.0, 18.0, 12.0, 5.0],
            SheetKind::Charts => &[12.0; 10],
            SheetKind::Formulas => &[5.0, 45.0, 20.0, 15.0, 5.0],
            SheetKind::Statistics => &[5.0, 35.0, 18.0, 25.0, 5.0],
            SheetKind::Comparison => &[5.0, 30.0, 18.0, 18.0, 18.0, 5.0],
            SheetKind::Notes => &[5.0, 80.0],
        }
    }
}

impl std::fmt::Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Colours a region is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tint {
    /// Title, header and band fills.
    pub strong: Rgb,
    /// Label-column fill and the shaded rows of striped text.
    pub soft: Rgb,
    /// Secondary text fill.
    pub pale: Rgb,
}

impl Tint {
    pub const fn new(strong: Rgb, soft: Rgb, pale: Rgb) -> Self {
        Self { strong, soft, pale }
    }
}

/// Inclusive zero-based column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpan {
    pub first: u32,
    pub last: u32,
}

impl ColumnSpan {
    pub const fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    pub const fn single(col: u32) -> Self {
        Self::new(col, col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleLevel {
    /// Cover banner.
    Banner,
    /// First region of every sheet.
    Sheet,
    Subtitle,
    /// Centered section band.
    Section,
    /// Left-aligned section heading.
    Heading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleBlock {
    pub text: String,
    pub level: TitleLevel,
    pub span: ColumnSpan,
    /// Rows merged into the title.
    pub rows: u32,
    pub tint: Tint,
}

impl TitleBlock {
    pub fn new(text: impl Into<String>, level: TitleLevel, span: ColumnSpan, tint: Tint) -> Self {
        Self {
            text: text.into(),
            level,
            span,
            rows: 1,
            tint,
        }
    }

    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows.max(1);
        self
    }
}

/// How a table column is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Row label on the soft fill.
    Label,
    /// Plain centered value.
    Value,
    /// Bold value in the region's strong colour.
    Emphasis,
    /// Value on the soft fill.
    Highlight,
    /// Unit or interpretation, italic.
    Detail,
    /// White text on the strong fill.
    Heading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    pub span: ColumnSpan,
    pub role: ColumnRole,
}

impl TableColumn {
    pub const fn new(span: ColumnSpan, role: ColumnRole) -> Self {
        Self { span, role }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum TableCell {
    Text(String),
    /// Written as a number with four decimals.
    Number(f64),
    /// Verification outcome, coloured by result.
    Status { verified: bool, text: String },
    Empty,
}

impl TableCell {
    pub fn text(value: impl Into<String>) -> Self {
        TableCell::Text(value.into())
    }

    /// A number cell; non-finite values become `N/A`.
    pub fn number(value: f64) -> Self {
        if value.is_finite() {
            TableCell::Number(value)
        } else {
            TableCell::Text(format::not_available())
        }
    }

    pub fn measure(value: Measure) -> Self {
        match value.value() {
            Some(v) => TableCell::Number(v),
            None => TableCell::Text(format::not_available()),
        }
    }

    /// Text as shown in the spreadsheet.
    pub fn display(&self) -> String {
        match self {
            TableCell::Text(s) => s.clone(),
            TableCell::Number(n) => format::fixed(*n, format::DECIMALS),
            TableCell::Status { text, .. } => text.clone(),
            TableCell::Empty => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TableRow {
    Data { cells: Vec<TableCell> },
    /// Full-width band introducing a group of rows.
    Band { text: String, tint: Tint },
    Spacer,
}

impl TableRow {
    pub fn data(cells: Vec<TableCell>) -> Self {
        TableRow::Data { cells }
    }

    pub fn band(text: impl Into<String>, tint: Tint) -> Self {
        TableRow::Band {
            text: text.into(),
            tint,
        }
    }
}

/// Rows of label/value cells under an optional header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyValueTable {
    pub columns: Vec<TableColumn>,
    pub header: Option<Vec<String>>,
    pub rows: Vec<TableRow>,
    pub tint: Tint,
}

impl KeyValueTable {
    pub fn new(columns: Vec<TableColumn>, tint: Tint) -> Self {
        Self {
            columns,
            header: None,
            rows: Vec::new(),
            tint,
        }
    }

    pub fn with_header<S: Into<String>>(mut self, header: impl IntoIterator<Item = S>) -> Self {
        self.header = Some(header.into_iter().map(Into::into).collect());
        self
    }

    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn data_row(self, cells: Vec<TableCell>) -> Self {
        self.row(TableRow::data(cells))
    }

    /// Full column range covered by the table.
    pub fn span(&self) -> ColumnSpan {
        let first = self.columns.iter().map(|c| c.span.first).min().unwrap_or(0);
        let last = self.columns.iter().map(|c| c.span.last).max().unwrap_or(first);
        ColumnSpan::new(first, last)
    }
}

/// Payload of one chart slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ChartContent {
    Image {
        encoding: ImageEncoding,
        #[serde(skip)]
        data: Vec<u8>,
    },
    /// The chart was skipped; a note takes its place.
    Placeholder { reason: String },
}

/// A chart anchored between two columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedChart {
    pub id: ChartId,
    pub title: String,
    pub from_col: u32,
    /// Exclusive.
    pub to_col: u32,
    pub content: ChartContent,
}

/// A row of charts side by side, all `height` rows tall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePlacement {
    pub height: u32,
    pub charts: Vec<PlacedChart>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    /// Centered informational line.
    Info,
    Formula,
    Calculation,
    /// Alternating shaded lines.
    Striped,
    Footer,
}

/// Row height policy for text lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineHeight {
    Default,
    Fixed(f64),
    /// `long` for lines over `limit` characters, `short` otherwise.
    ByLength { short: f64, long: f64, limit: usize },
}

impl LineHeight {
    pub fn for_line(self, line: &str) -> Option<f64> {
        match self {
            LineHeight::Default => None,
            LineHeight::Fixed(h) => Some(h),
            LineHeight::ByLength { short, long, limit } => {
                Some(if line.chars().count() > limit { long } else { short })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub style: TextStyle,
    pub span: ColumnSpan,
    pub lines: Vec<String>,
    pub line_height: LineHeight,
    pub tint: Tint,
}

impl TextBlock {
    pub fn new(style: TextStyle, span: ColumnSpan, tint: Tint) -> Self {
        Self {
            style,
            span,
            lines: Vec::new(),
            line_height: LineHeight::Default,
            tint,
        }
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn with_line_height(mut self, line_height: LineHeight) -> Self {
        self.line_height = line_height;
        self
    }
}

/// Region kinds, for inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    TitleBlock,
    KeyValueTable,
    ImagePlacement,
    TextBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Region {
    Title(TitleBlock),
    KeyValue(KeyValueTable),
    Image(ImagePlacement),
    Text(TextBlock),
}

impl Region {
    pub fn kind(&self) -> RegionKind {
        match self {
            Region::Title(_) => RegionKind::TitleBlock,
            Region::KeyValue(_) => RegionKind::KeyValueTable,
            Region::Image(_) => RegionKind::ImagePlacement,
            Region::Text(_) => RegionKind::TextBlock,
        }
    }

    /// Rows claimed on the sheet; never zero.
    pub fn height(&self) -> u32 {
        let rows = match self {
            Region::Title(t) => t.rows,
            Region::KeyValue(t) => t.header.is_some() as u32 + t.rows.len() as u32,
            Region::Image(i) => i.height,
            Region::Text(t) => t.lines.len() as u32,
        };
        rows.max(1)
    }
}

impl From<TitleBlock> for Region {
    fn from(value: TitleBlock) -> Self {
        Region::Title(value)
    }
}

impl From<KeyValueTable> for Region {
    fn from(value: KeyValueTable) -> Self {
        Region::KeyValue(value)
    }
}

impl From<ImagePlacement> for Region {
    fn from(value: ImagePlacement) -> Self {
        Region::Image(value)
    }
}

impl From<TextBlock> for Region {
    fn from(value: TextBlock) -> Self {
        Region::Text(value)
    }
}

/// A region and the inclusive zero-based rows it occupies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedRegion {
    pub first_row: u32,
    pub last_row: u32,
    pub region: Region,
}

/// Forward-only row counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RowCursor {
    next: u32,
}

impl RowCursor {
    pub fn new(start: u32) -> Self {
        Self { next: start }
    }

    /// Next unclaimed row.
    pub fn position(&self) -> u32 {
        self.next
    }

    /// Leave `rows` blank rows.
    pub fn skip(&mut self, rows: u32) {
        self.next += rows;
    }

    /// Claim `rows` rows, returning the inclusive range.
    fn claim(&mut self, rows: u32) -> (u32, u32) {
        let first = self.next;
        self.next += rows;
        (first, self.next - 1)
    }
}

/// One sheet under construction or finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sheet {
    kind: SheetKind,
    regions: Vec<PlacedRegion>,
    cursor: RowCursor,
}

impl Sheet {
    /// Empty sheet whose first region lands on the second row.
    pub fn new(kind: SheetKind) -> Self {
        Self {
            kind,
            regions: Vec::new(),
            cursor: RowCursor::new(1),
        }
    }

    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn tab_color(&self) -> Rgb {
        self.kind.tab_color()
    }

    pub fn column_widths(&self) -> &'static [f64] {
        self.kind.column_widths()
    }

    /// Place `region` at the cursor and return its first row.
    pub fn push(&mut self, region: impl Into<Region>) -> u32 {
        let region = region.into();
        let (first_row, last_row) = self.cursor.claim(region.height());
        self.regions.push(PlacedRegion {
            first_row,
            last_row,
            region,
        });
        first_row
    }

    /// Leave blank rows before the next region.
    pub fn skip(&mut self, rows: u32) {
        self.cursor.skip(rows);
    }

    pub fn cursor(&self) -> RowCursor {
        self.cursor
    }

    pub fn regions(&self) -> &[PlacedRegion] {
        &self.regions
    }

    /// Title text of the sheet's first region.
    pub fn title(&self) -> Option<&str> {
        match self.regions.first().map(|p| &p.region) {
            Some(Region::Title(t)) => Some(&t.text),
            _ => None,
        }
    }

    /// Every table cell and text line rendered as strings, in sheet order.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        for placed in &self.regions {
            match &placed.region {
                Region::Title(t) => out.push(t.text.clone()),
                Region::KeyValue(t) => {
                    out.extend(t.header.iter().flatten().cloned());
                    for row in &t.rows {
                        match row {
                            TableRow::Data { cells } => {
                                out.extend(cells.iter().map(TableCell::display))
                            }
                            TableRow::Band { text, .. } => out.push(text.clone()),
                            TableRow::Spacer => {}
                        }
                    }
                }
                Region::Image(i) => {
                    for chart in &i.charts {
                        out.push(chart.title.clone());
                        if let ChartContent::Placeholder { reason } = &chart.content {
                            out.push(reason.clone());
                        }
                    }
                }
                Region::Text(t) => out.extend(t.lines.iter().cloned()),
            }
        }
        out
    }
}

/// The assembled report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub subject: String,
    pub creator: String,
    pub company: Option<String>,
    pub generated_at: DateTime<FixedOffset>,
    pub sheets: Vec<Sheet>,
}

impl ReportDocument {
    pub fn sheet(&self, kind: SheetKind) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.kind() == kind)
    }

    fn charts(&self) -> impl Iterator<Item = &PlacedChart> {
        self.sheets
            .iter()
            .flat_map(|s| s.regions())
            .filter_map(|p| match &p.region {
                Region::Image(i) => Some(i.charts.iter()),
                _ => None,
            })
            .flatten()
    }

    /// Charts embedded as images.
    pub fn image_count(&self) -> usize {
        self.charts()
            .filter(|c| matches!(c.content, ChartContent::Image { .. }))
            .count()
    }

    /// Charts replaced by a placeholder note.
    pub fn placeholder_ids(&self) -> Vec<ChartId> {
        self.charts()
            .filter(|c| matches!(c.content, ChartContent::Placeholder { .. }))
            .map(|c| c.id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINT: Tint = Tint::new(Rgb::hex(0x4472C4), Rgb::hex(0xD9E1F2), Rgb::WHITE);

    #[test]
    fn test_sheet_names_fit_spreadsheet_rules() {
        for kind in SheetKind::ALL {
            assert!(kind.name().len() <= 31, "{kind}");
            assert!(!kind.column_widths().is_empty());
        }
    }

    #[test]
    fn test_region_heights() {
        let title = Region::from(
            TitleBlock::new("T", TitleLevel::Banner, ColumnSpan::new(1, 6), TINT).with_rows(3),
        );
        assert_eq!(title.height(), 3);

        let table = Region::from(
            KeyValueTable::new(
                vec![TableColumn::new(ColumnSpan::single(1), ColumnRole::Label)],
                TINT,
            )
            .with_header(["Parameter"])
            .data_row(vec![TableCell::text("a")])
            .row(TableRow::Spacer),
        );
        assert_eq!(table.height(), 3);

        let empty_text = Region::from(TextBlock::new(TextStyle::Info, ColumnSpan::single(1), TINT));
        assert_eq!(empty_text.height(), 1);
    }

    #[test]
    fn test_push_advances_cursor() {
        let mut sheet = Sheet::new(SheetKind::ExperimentalData);
        let first = sheet.push(TitleBlock::new(
            "DATA",
            TitleLevel::Sheet,
            ColumnSpan::new(1, 3),
            TINT,
        ));
        sheet.skip(2);
        let second = sheet.push(
            TextBlock::new(TextStyle::Striped, ColumnSpan::single(1), TINT).lines(["a", "b"]),
        );

        assert_eq!(first, 1);
        assert_eq!(second, 4);
        assert_eq!(sheet.regions()[1].last_row, 5);
        assert_eq!(sheet.cursor().position(), 6);
        assert_eq!(sheet.title(), Some("DATA"));
    }

    #[test]
    fn test_table_cells() {
        assert_eq!(TableCell::number(f64::NAN), TableCell::text("N/A"));
        assert_eq!(TableCell::measure(Measure::Indeterminate).display(), "N/A");
        assert_eq!(TableCell::number(0.02).display(), "0.0200");
    }

    #[test]
    fn test_line_height() {
        let policy = LineHeight::ByLength {
            short: 25.0,
            long: 40.0,
            limit: 80,
        };
        assert_eq!(policy.for_line("short"), Some(25.0));
        assert_eq!(policy.for_line(&"x".repeat(81)), Some(40.0));
        assert_eq!(LineHeight::Default.for_line("x"), None);
    }
}
