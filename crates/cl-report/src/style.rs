//! Cell style templates.
//!
//! Every styled cell of the report goes through [`template`]: the cell's
//! role picks the template, the region's [`Tint`] colours it and the row's
//! position inside its region drives alternating shading.

use crate::document::{ColumnRole, TextStyle, Tint, TitleLevel};
use crate::format::NUMBER_FORMAT;
use cl_workbook::{
    Alignment, BorderLine, BorderWeight, CellStyle, Font, HorizontalAlign, Rgb, VerticalAlign,
};

const GRID: Rgb = Rgb::hex(0xBFBFBF);
const VERIFIED: Rgb = Rgb::hex(0x008000);
const NOT_VERIFIED: Rgb = Rgb::hex(0xFF0000);
const INFO_TEXT: Rgb = Rgb::hex(0x424242);
const MUTED_TEXT: Rgb = Rgb::hex(0x666666);
const FOOTER_FILL: Rgb = Rgb::hex(0xF5F5F5);
const FORMULA_FILL: Rgb = Rgb::hex(0xFFE699);
const PLACEHOLDER_FILL: Rgb = Rgb::hex(0xFAFAFA);

/// What a cell is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellRole {
    Title(TitleLevel),
    /// Table header cell.
    Header,
    /// Full-width band inside a table.
    Band,
    Column(ColumnRole),
    Status { verified: bool },
    Text(TextStyle),
    /// Note standing in for a skipped chart.
    Placeholder,
}

/// Resolve the style of a cell. `index` is the row's position in its region.
pub(crate) fn template(role: CellRole, tint: &Tint, index: usize) -> CellStyle {
    match role {
        CellRole::Title(level) => title(level, tint),
        CellRole::Header => CellStyle {
            font: bold(11, Rgb::WHITE),
            fill: Some(tint.strong),
            border: Some(thin()),
            alignment: centered(),
            number_format: None,
        },
        CellRole::Band => CellStyle {
            font: bold(12, Rgb::WHITE),
            fill: Some(tint.strong),
            border: Some(medium(tint.strong)),
            alignment: centered(),
            number_format: None,
        },
        CellRole::Column(role) => column(role, tint),
        CellRole::Status { verified } => CellStyle {
            font: bold(12, if verified { VERIFIED } else { NOT_VERIFIED }),
            fill: None,
            border: Some(thin()),
            alignment: centered(),
            number_format: None,
        },
        CellRole::Text(style) => text(style, tint, index),
        CellRole::Placeholder => CellStyle {
            font: Font {
                italic: true,
                size: 10,
                color: MUTED_TEXT,
                ..Font::default()
            },
            fill: Some(PLACEHOLDER_FILL),
            border: Some(thin()),
            alignment: Alignment {
                wrap: true,
                ..centered()
            },
            number_format: None,
        },
    }
}

/// Same template, formatted for a number.
pub(crate) fn numeric(mut style: CellStyle) -> CellStyle {
    style.number_format = Some(NUMBER_FORMAT.to_string());
    style
}

/// Height of each row a title at `level` covers.
pub(crate) fn title_row_height(level: TitleLevel) -> f64 {
    match level {
        TitleLevel::Banner => 27.0,
        TitleLevel::Sheet | TitleLevel::Subtitle => 30.0,
        TitleLevel::Section | TitleLevel::Heading => 25.0,
    }
}

fn title(level: TitleLevel, tint: &Tint) -> CellStyle {
    match level {
        TitleLevel::Banner => CellStyle {
            font: bold(28, Rgb::WHITE),
            fill: Some(tint.strong),
            border: None,
            alignment: Alignment {
                wrap: true,
                ..centered()
            },
            number_format: None,
        },
        TitleLevel::Sheet => CellStyle {
            font: bold(18, Rgb::WHITE),
            fill: Some(tint.strong),
            border: None,
            alignment: centered(),
            number_format: None,
        },
        TitleLevel::Subtitle => CellStyle {
            font: bold(20, tint.strong),
            fill: None,
            border: None,
            alignment: centered(),
            number_format: None,
        },
        TitleLevel::Section => CellStyle {
            font: bold(14, Rgb::WHITE),
            fill: Some(tint.strong),
            border: Some(thin()),
            alignment: centered(),
            number_format: None,
        },
        TitleLevel::Heading => CellStyle {
            font: bold(13, Rgb::WHITE),
            fill: Some(tint.strong),
            border: Some(medium(tint.strong)),
            alignment: left(1),
            number_format: None,
        },
    }
}

fn column(role: ColumnRole, tint: &Tint) -> CellStyle {
    match role {
        ColumnRole::Label => CellStyle {
            font: bold(11, Rgb::BLACK),
            fill: Some(tint.soft),
            border: Some(thin()),
            alignment: left(1),
            number_format: None,
        },
        ColumnRole::Value => CellStyle {
            font: Font::default(),
            fill: None,
            border: Some(thin()),
            alignment: centered(),
            number_format: None,
        },
        ColumnRole::Emphasis => CellStyle {
            font: bold(12, tint.strong),
            fill: None,
            border: Some(thin()),
            alignment: centered(),
            number_format: None,
        },
        ColumnRole::Highlight => CellStyle {
            font: bold(11, Rgb::BLACK),
            fill: Some(tint.soft),
            border: Some(thin()),
            alignment: centered(),
            number_format: None,
        },
        ColumnRole::Detail => CellStyle {
            font: Font {
                italic: true,
                size: 10,
                ..Font::default()
            },
            fill: None,
            border: Some(thin()),
            alignment: Alignment {
                wrap: true,
                ..centered()
            },
            number_format: None,
        },
        ColumnRole::Heading => CellStyle {
            font: bold(11, Rgb::WHITE),
            fill: Some(tint.strong),
            border: Some(thin()),
            alignment: left(1),
            number_format: None,
        },
    }
}

fn text(style: TextStyle, tint: &Tint, index: usize) -> CellStyle {
    match style {
        TextStyle::Info => CellStyle {
            font: Font {
                size: 12,
                color: INFO_TEXT,
                ..Font::default()
            },
            fill: None,
            border: None,
            alignment: centered(),
            number_format: None,
        },
        TextStyle::Formula => CellStyle {
            font: Font {
                italic: true,
                ..Font::default()
            },
            fill: Some(FORMULA_FILL),
            border: Some(thin()),
            alignment: left(1),
            number_format: None,
        },
        TextStyle::Calculation => CellStyle {
            font: Font {
                size: 10,
                ..Font::default()
            },
            fill: Some(tint.pale),
            border: Some(thin()),
            alignment: left(1),
            number_format: None,
        },
        TextStyle::Striped => CellStyle {
            font: Font::default(),
            fill: Some(if index % 2 == 0 { tint.soft } else { Rgb::WHITE }),
            border: Some(thin()),
            alignment: Alignment {
                horizontal: HorizontalAlign::Left,
                vertical: VerticalAlign::Center,
                wrap: true,
                indent: 2,
            },
            number_format: None,
        },
        TextStyle::Footer => CellStyle {
            font: Font {
                italic: true,
                size: 10,
                color: MUTED_TEXT,
                ..Font::default()
            },
            fill: Some(FOOTER_FILL),
            border: Some(thin()),
            alignment: centered(),
            number_format: None,
        },
    }
}

fn bold(size: u16, color: Rgb) -> Font {
    Font {
        bold: true,
        italic: false,
        size,
        color,
    }
}

fn thin() -> BorderLine {
    BorderLine {
        weight: BorderWeight::Thin,
        color: GRID,
    }
}

fn medium(color: Rgb) -> BorderLine {
    BorderLine {
        weight: BorderWeight::Medium,
        color,
    }
}

fn centered() -> Alignment {
    Alignment {
        horizontal: HorizontalAlign::Center,
        vertical: VerticalAlign::Center,
        wrap: false,
        indent: 0,
    }
}

fn left(indent: u8) -> Alignment {
    Alignment {
        horizontal: HorizontalAlign::Left,
        vertical: VerticalAlign::Center,
        wrap: false,
        indent,
    }
}
