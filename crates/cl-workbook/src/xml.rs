//! SpreadsheetML part generators.

use crate::cell::CellRef;
use crate::error::{Result, WorkbookError};
use crate::model::{CellValue, DocProperties, SheetImage, Worksheet};
use crate::style::StyleSheet;
use std::collections::BTreeSet;

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>";
const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Escape markup characters and drop control characters XML 1.0 forbids.
pub(crate) fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Part counts needed for `[Content_Types].xml`.
pub(crate) struct PackageShape {
    pub sheets: usize,
    pub drawings: usize,
    pub has_images: bool,
}

pub(crate) fn content_types(shape: &PackageShape) -> String {
    let mut xml = String::with_capacity(1200 + shape.sheets * 160 + shape.drawings * 140);
    xml.push_str(XML_DECL);
    xml.push_str(
        "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    );
    if shape.has_images {
        xml.push_str("<Default Extension=\"png\" ContentType=\"image/png\"/>");
    }
    xml.push_str(
        "<Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
<Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>\
<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\
<Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>",
    );
    for i in 1..=shape.sheets {
        xml.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{i}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>"
        ));
    }
    for i in 1..=shape.drawings {
        xml.push_str(&format!(
            "<Override PartName=\"/xl/drawings/drawing{i}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.drawing+xml\"/>"
        ));
    }
    xml.push_str("</Types>");
    xml
}

pub(crate) fn root_rels() -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"{NS_PKG_REL}\">\
<Relationship Id=\"rId1\" Type=\"{NS_REL}/officeDocument\" Target=\"xl/workbook.xml\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\
<Relationship Id=\"rId3\" Type=\"{NS_REL}/extended-properties\" Target=\"docProps/app.xml\"/>\
</Relationships>"
    )
}

pub(crate) fn app_xml(props: &DocProperties, sheet_names: &[&str]) -> String {
    let titles: String = sheet_names
        .iter()
        .map(|n| format!("<vt:lpstr>{}</vt:lpstr>", escape(n)))
        .collect();
    format!(
        "{XML_DECL}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">\
<Application>{app}</Application><DocSecurity>0</DocSecurity><ScaleCrop>false</ScaleCrop>\
<HeadingPairs><vt:vector size=\"2\" baseType=\"variant\">\
<vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>\
<vt:variant><vt:i4>{n}</vt:i4></vt:variant></vt:vector></HeadingPairs>\
<TitlesOfParts><vt:vector size=\"{n}\" baseType=\"lpstr\">{titles}</vt:vector></TitlesOfParts>\
<Company>{company}</Company><LinksUpToDate>false</LinksUpToDate><SharedDoc>false</SharedDoc>\
</Properties>",
        app = escape(env!("CARGO_PKG_NAME")),
        n = sheet_names.len(),
        company = escape(&props.company),
    )
}

pub(crate) fn core_xml(props: &DocProperties) -> String {
    let stamp = props.created.format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        "{XML_DECL}<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" \
xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
<dc:title>{title}</dc:title><dc:subject>{subject}</dc:subject>\
<dc:creator>{creator}</dc:creator><cp:lastModifiedBy>{creator}</cp:lastModifiedBy>\
<dcterms:created xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:created>\
<dcterms:modified xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:modified>\
</cp:coreProperties>",
        title = escape(&props.title),
        subject = escape(&props.subject),
        creator = escape(&props.creator),
    )
}

pub(crate) fn workbook_xml(sheet_names: &[&str]) -> String {
    let mut xml = String::with_capacity(400 + sheet_names.len() * 80);
    xml.push_str(XML_DECL);
    xml.push_str(&format!(
        "<workbook xmlns=\"{NS_MAIN}\" xmlns:r=\"{NS_REL}\">\
<bookViews><workbookView xWindow=\"0\" yWindow=\"0\" windowWidth=\"28800\" windowHeight=\"12600\" activeTab=\"0\"/></bookViews>\
<sheets>"
    ));
    for (i, name) in sheet_names.iter().enumerate() {
        let id = i + 1;
        xml.push_str(&format!(
            "<sheet name=\"{}\" sheetId=\"{id}\" r:id=\"rId{id}\"/>",
            escape(name)
        ));
    }
    xml.push_str("</sheets></workbook>");
    xml
}

pub(crate) fn workbook_rels(sheets: usize) -> String {
    let mut xml = String::with_capacity(300 + sheets * 150);
    xml.push_str(XML_DECL);
    xml.push_str(&format!("<Relationships xmlns=\"{NS_PKG_REL}\">"));
    for i in 1..=sheets {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{i}\" Type=\"{NS_REL}/worksheet\" Target=\"worksheets/sheet{i}.xml\"/>"
        ));
    }
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" Type=\"{NS_REL}/styles\" Target=\"styles.xml\"/></Relationships>",
        sheets + 1
    ));
    xml
}

/// Render one worksheet, interning its cell styles into `styles`.
///
/// `drawing` is true when the sheet links to a drawing part via `rId1`.
pub(crate) fn worksheet_xml(
    sheet: &Worksheet,
    selected: bool,
    drawing: bool,
    styles: &mut StyleSheet,
) -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(&format!("<worksheet xmlns=\"{NS_MAIN}\" xmlns:r=\"{NS_REL}\">"));

    if let Some(color) = sheet.tab_color() {
        xml.push_str(&format!(
            "<sheetPr><tabColor rgb=\"{}\"/></sheetPr>",
            color.argb()
        ));
    }
    xml.push_str("<sheetViews><sheetView");
    if selected {
        xml.push_str(" tabSelected=\"1\"");
    }
    xml.push_str(" workbookViewId=\"0\"/></sheetViews>");
    xml.push_str("<sheetFormatPr defaultRowHeight=\"15\"/>");

    if !sheet.column_widths().is_empty() {
        xml.push_str("<cols>");
        for (col, width) in sheet.column_widths() {
            let n = col + 1;
            xml.push_str(&format!(
                "<col min=\"{n}\" max=\"{n}\" width=\"{width}\" customWidth=\"1\"/>"
            ));
        }
        xml.push_str("</cols>");
    }

    let rows: BTreeSet<u32> = sheet
        .cells()
        .map(|(at, _)| at.row)
        .chain(sheet.row_heights().keys().copied())
        .collect();

    xml.push_str("<sheetData>");
    let mut cells = sheet.cells().peekable();
    for row in rows {
        xml.push_str(&format!("<row r=\"{}\"", row + 1));
        if let Some(height) = sheet.row_heights().get(&row) {
            xml.push_str(&format!(" ht=\"{height}\" customHeight=\"1\""));
        }
        xml.push('>');
        while let Some((at, cell)) = cells.next_if(|(at, _)| at.row == row) {
            let s = styles.intern(&cell.style);
            write_cell(&mut xml, sheet, at, &cell.value, s)?;
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData>");

    if !sheet.merges().is_empty() {
        xml.push_str(&format!("<mergeCells count=\"{}\">", sheet.merges().len()));
        for range in sheet.merges() {
            xml.push_str(&format!("<mergeCell ref=\"{range}\"/>"));
        }
        xml.push_str("</mergeCells>");
    }

    xml.push_str(
        "<pageMargins left=\"0.7\" right=\"0.7\" top=\"0.75\" bottom=\"0.75\" header=\"0.3\" footer=\"0.3\"/>",
    );
    if drawing {
        xml.push_str("<drawing r:id=\"rId1\"/>");
    }
    xml.push_str("</worksheet>");
    Ok(xml)
}

fn write_cell(
    xml: &mut String,
    sheet: &Worksheet,
    at: CellRef,
    value: &CellValue,
    style: u32,
) -> Result<()> {
    let style_attr = if style == 0 {
        String::new()
    } else {
        format!(" s=\"{style}\"")
    };
    match value {
        CellValue::Empty => xml.push_str(&format!("<c r=\"{at}\"{style_attr}/>")),
        CellValue::Number(n) => {
            if !n.is_finite() {
                return Err(WorkbookError::NonFiniteNumber {
                    sheet: sheet.name().to_string(),
                    cell: at.to_string(),
                });
            }
            xml.push_str(&format!("<c r=\"{at}\"{style_attr}><v>{n}</v></c>"));
        }
        CellValue::Text(s) => xml.push_str(&format!(
            "<c r=\"{at}\"{style_attr} t=\"inlineStr\"><is><t xml:space=\"preserve\">{}</t></is></c>",
            escape(s)
        )),
    }
    Ok(())
}

pub(crate) fn worksheet_rels(drawing: usize) -> String {
    format!(
        "{XML_DECL}<Relationships xmlns=\"{NS_PKG_REL}\">\
<Relationship Id=\"rId1\" Type=\"{NS_REL}/drawing\" Target=\"../drawings/drawing{drawing}.xml\"/>\
</Relationships>"
    )
}

/// Drawing part for `images`; picture `i` embeds relationship `rId{i+1}`.
pub(crate) fn drawing_xml(images: &[SheetImage]) -> String {
    let mut xml = String::with_capacity(256 + images.len() * 900);
    xml.push_str(XML_DECL);
    xml.push_str(
        "<xdr:wsDr xmlns:xdr=\"http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing\" \
xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\">",
    );
    for (i, image) in images.iter().enumerate() {
        let a = image.anchor;
        xml.push_str("<xdr:twoCellAnchor editAs=\"oneCell\">");
        xml.push_str(&format!(
            "<xdr:from><xdr:col>{}</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>{}</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:from>",
            a.from_col, a.from_row
        ));
        xml.push_str(&format!(
            "<xdr:to><xdr:col>{}</xdr:col><xdr:colOff>0</xdr:colOff><xdr:row>{}</xdr:row><xdr:rowOff>0</xdr:rowOff></xdr:to>",
            a.to_col, a.to_row
        ));
        xml.push_str(&format!(
            "<xdr:pic><xdr:nvPicPr><xdr:cNvPr id=\"{}\" name=\"{}\"/>\
<xdr:cNvPicPr><a:picLocks noChangeAspect=\"1\"/></xdr:cNvPicPr></xdr:nvPicPr>\
<xdr:blipFill><a:blip xmlns:r=\"{NS_REL}\" r:embed=\"rId{}\"/><a:stretch><a:fillRect/></a:stretch></xdr:blipFill>\
<xdr:spPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/></a:xfrm><a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></xdr:spPr>\
</xdr:pic><xdr:clientData/></xdr:twoCellAnchor>",
            i + 2,
            escape(&image.name),
            i + 1
        ));
    }
    xml.push_str("</xdr:wsDr>");
    xml
}

/// Relationships from a drawing to its media; `media[i]` is the global image number.
pub(crate) fn drawing_rels(media: &[usize]) -> String {
    let mut xml = String::with_capacity(200 + media.len() * 150);
    xml.push_str(XML_DECL);
    xml.push_str(&format!("<Relationships xmlns=\"{NS_PKG_REL}\">"));
    for (i, n) in media.iter().enumerate() {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{}\" Type=\"{NS_REL}/image\" Target=\"../media/image{n}.png\"/>",
            i + 1
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Package path of the `n`th (one-based) part.
pub(crate) fn sheet_path(n: usize) -> String {
    format!("xl/worksheets/sheet{n}.xml")
}

pub(crate) fn sheet_rels_path(n: usize) -> String {
    format!("xl/worksheets/_rels/sheet{n}.xml.rels")
}

pub(crate) fn drawing_path(n: usize) -> String {
    format!("xl/drawings/drawing{n}.xml")
}

pub(crate) fn drawing_rels_path(n: usize) -> String {
    format!("xl/drawings/_rels/drawing{n}.xml.rels")
}

pub(crate) fn media_path(n: usize) -> String {
    format!("xl/media/image{n}.png")
}
