//! Cell formatting and the workbook-wide style table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// `FFRRGGBB`, the form SpreadsheetML expects.
    pub fn argb(&self) -> String {
        format!("FF{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Font settings. The face is always the workbook default (Calibri).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub bold: bool,
    pub italic: bool,
    /// Size in points.
    pub size: u16,
    pub color: Rgb,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            size: 11,
            color: Rgb::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderWeight {
    Thin,
    Medium,
}

impl BorderWeight {
    fn as_str(self) -> &'static str {
        match self {
            BorderWeight::Thin => "thin",
            BorderWeight::Medium => "medium",
        }
    }
}

/// A border drawn on all four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorderLine {
    pub weight: BorderWeight,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    General,
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Center,
    #[default]
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    pub wrap: bool,
    pub indent: u8,
}

impl Alignment {
    fn is_default(&self) -> bool {
        *self == Alignment::default()
    }
}

/// Complete formatting of one cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellStyle {
    pub font: Font,
    /// Solid background fill.
    pub fill: Option<Rgb>,
    pub border: Option<BorderLine>,
    pub alignment: Alignment,
    /// Custom number format code, e.g. `0.0000`.
    pub number_format: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct Xf {
    font: usize,
    fill: usize,
    border: usize,
    num_fmt: u32,
    alignment: Alignment,
}

// Indices below are reserved by the format: fill 0 = none, fill 1 = gray125.
const RESERVED_FILLS: usize = 2;
const FIRST_CUSTOM_NUM_FMT: u32 = 164;

/// Deduplicated style table backing `xl/styles.xml`.
///
/// Index 0 is always the default style.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    fonts: Vec<Font>,
    fills: Vec<Rgb>,
    borders: Vec<BorderLine>,
    num_fmts: Vec<String>,
    xfs: Vec<Xf>,
    index: HashMap<CellStyle, u32>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let mut sheet = Self {
            fonts: vec![Font::default()],
            fills: Vec::new(),
            borders: Vec::new(),
            num_fmts: Vec::new(),
            xfs: Vec::new(),
            index: HashMap::new(),
        };
        sheet.intern(&CellStyle::default());
        sheet
    }
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell format index (`s` attribute) for `style`, adding it if new.
    pub fn intern(&mut self, style: &CellStyle) -> u32 {
        if let Some(&id) = self.index.get(style) {
            return id;
        }

        let font = position_or_push(&mut self.fonts, style.font);
        let fill = style
            .fill
            .map(|c| position_or_push(&mut self.fills, c) + RESERVED_FILLS)
            .unwrap_or(0);
        let border = style
            .border
            .map(|b| position_or_push(&mut self.borders, b) + 1)
            .unwrap_or(0);
        let num_fmt = style
            .number_format
            .as_ref()
            .map(|code| {
                position_or_push(&mut self.num_fmts, code.clone()) as u32 + FIRST_CUSTOM_NUM_FMT
            })
            .unwrap_or(0);

        let id = self.xfs.len() as u32;
        self.xfs.push(Xf {
            font,
            fill,
            border,
            num_fmt,
            alignment: style.alignment,
        });
        self.index.insert(style.clone(), id);
        id
    }

    /// Number of distinct cell formats.
    pub fn len(&self) -> usize {
        self.xfs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xfs.is_empty()
    }

    /// Render `xl/styles.xml`.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(2048 + self.xfs.len() * 160);
        xml.push_str(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
<styleSheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">",
        );

        if !self.num_fmts.is_empty() {
            xml.push_str(&format!("<numFmts count=\"{}\">", self.num_fmts.len()));
            for (i, code) in self.num_fmts.iter().enumerate() {
                xml.push_str(&format!(
                    "<numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    i as u32 + FIRST_CUSTOM_NUM_FMT,
                    crate::xml::escape(code)
                ));
            }
            xml.push_str("</numFmts>");
        }

        xml.push_str(&format!("<fonts count=\"{}\">", self.fonts.len()));
        for font in &self.fonts {
            xml.push_str("<font>");
            if font.bold {
                xml.push_str("<b/>");
            }
            if font.italic {
                xml.push_str("<i/>");
            }
            xml.push_str(&format!(
                "<sz val=\"{}\"/><color rgb=\"{}\"/><name val=\"Calibri\"/><family val=\"2\"/>",
                font.size,
                font.color.argb()
            ));
            xml.push_str("</font>");
        }
        xml.push_str("</fonts>");

        xml.push_str(&format!(
            "<fills count=\"{}\"><fill><patternFill patternType=\"none\"/></fill>\
<fill><patternFill patternType=\"gray125\"/></fill>",
            self.fills.len() + RESERVED_FILLS
        ));
        for fill in &self.fills {
            xml.push_str(&format!(
                "<fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
                fill.argb()
            ));
        }
        xml.push_str("</fills>");

        xml.push_str(&format!(
            "<borders count=\"{}\"><border><left/><right/><top/><bottom/><diagonal/></border>",
            self.borders.len() + 1
        ));
        for border in &self.borders {
            let side = |tag: &str| {
                format!(
                    "<{tag} style=\"{}\"><color rgb=\"{}\"/></{tag}>",
                    border.weight.as_str(),
                    border.color.argb()
                )
            };
            xml.push_str(&format!(
                "<border>{}{}{}{}<diagonal/></border>",
                side("left"),
                side("right"),
                side("top"),
                side("bottom")
            ));
        }
        xml.push_str("</borders>");

        xml.push_str(
            "<cellStyleXfs count=\"1\"><xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/></cellStyleXfs>",
        );
        xml.push_str(&format!("<cellXfs count=\"{}\">", self.xfs.len()));
        for xf in &self.xfs {
            xml.push_str(&format!(
                "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"",
                xf.num_fmt, xf.font, xf.fill, xf.border
            ));
            if xf.num_fmt != 0 {
                xml.push_str(" applyNumberFormat=\"1\"");
            }
            if xf.font != 0 {
                xml.push_str(" applyFont=\"1\"");
            }
            if xf.fill != 0 {
                xml.push_str(" applyFill=\"1\"");
            }
            if xf.border != 0 {
                xml.push_str(" applyBorder=\"1\"");
            }
            if xf.alignment.is_default() {
                xml.push_str("/>");
                continue;
            }
            xml.push_str(" applyAlignment=\"1\"><alignment");
            let a = xf.alignment;
            match a.horizontal {
                HorizontalAlign::General => {}
                HorizontalAlign::Left => xml.push_str(" horizontal=\"left\""),
                HorizontalAlign::Center => xml.push_str(" horizontal=\"center\""),
                HorizontalAlign::Right => xml.push_str(" horizontal=\"right\""),
            }
            match a.vertical {
                VerticalAlign::Bottom => {}
                VerticalAlign::Top => xml.push_str(" vertical=\"top\""),
                VerticalAlign::Center => xml.push_str(" vertical=\"center\""),
            }
            if a.wrap {
                xml.push_str(" wrapText=\"1\"");
            }
            if a.indent > 0 {
                xml.push_str(&format!(" indent=\"{}\"", a.indent));
            }
            xml.push_str("/></xf>");
        }
        xml.push_str("</cellXfs>");

        xml.push_str(
            "<cellStyles count=\"1\"><cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/></cellStyles>\
<dxfs count=\"0\"/><tableStyles count=\"0\"/></styleSheet>",
        );
        xml
    }
}

fn position_or_push<T: PartialEq>(items: &mut Vec<T>, item: T) -> usize {
    match items.iter().position(|existing| *existing == item) {
        Some(i) => i,
        None => {
            items.push(item);
            items.len() - 1
        }
    }
}
