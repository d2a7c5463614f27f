//! Packages written to disk and read back with a real ZIP reader.

use cl_workbook::{
    Alignment, BorderLine, BorderWeight, CellRange, CellStyle, CellValue, DocProperties, Font,
    HorizontalAlign, ImageAnchor, Rgb, SheetImage, Workbook, Worksheet, XlsxWriter,
};
use chrono::{TimeZone, Utc};
use std::io::Read;
use tempfile::TempDir;

fn png() -> Vec<u8> {
    let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
    data.extend_from_slice(b"\0\0\0\rIHDR");
    data.extend_from_slice(&[0; 17]);
    data
}

fn read_part(path: &std::path::Path, name: &str) -> Option<Vec<u8>> {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(name).ok()?;
    let mut out = Vec::new();
    entry.read_to_end(&mut out).unwrap();
    Some(out)
}

fn read_text(path: &std::path::Path, name: &str) -> String {
    String::from_utf8(read_part(path, name).unwrap_or_else(|| panic!("missing {name}"))).unwrap()
}

fn report_like() -> Workbook {
    let mut wb = Workbook::new(DocProperties {
        title: "Collision <report>".into(),
        subject: "Elastic collision".into(),
        creator: "Virtual Physics Laboratory".into(),
        company: String::new(),
        created: Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap(),
    });

    let header = CellStyle {
        font: Font {
            bold: true,
            color: Rgb::WHITE,
            ..Font::default()
        },
        fill: Some(Rgb::hex(0x4472C4)),
        border: Some(BorderLine {
            weight: BorderWeight::Thin,
            color: Rgb::BLACK,
        }),
        alignment: Alignment {
            horizontal: HorizontalAlign::Center,
            ..Alignment::default()
        },
        number_format: None,
    };
    let number = CellStyle {
        number_format: Some("0.0000".into()),
        ..CellStyle::default()
    };

    let mut data = Worksheet::new("Data");
    data.set_tab_color(Rgb::hex(0x4472C4));
    data.set_column_width(1, 30.0);
    data.write_merged(
        CellRange::row_span(1, 1, 3),
        CellValue::text("EXPERIMENT DATA"),
        header.clone(),
    )
    .unwrap();
    data.set_cell(4, 1, CellValue::text("Mass m1 & m2"), CellStyle::default());
    data.set_cell(4, 2, CellValue::Number(1.25), number);
    wb.add_sheet(data).unwrap();

    for title in ["Charts A", "Charts B"] {
        let mut charts = Worksheet::new(title);
        for (i, anchor) in [ImageAnchor::new(1, 4, 5, 24), ImageAnchor::new(5, 4, 9, 24)]
            .into_iter()
            .enumerate()
        {
            charts
                .add_image(SheetImage {
                    name: format!("{title} {i}"),
                    data: png(),
                    anchor,
                })
                .unwrap();
        }
        wb.add_sheet(charts).unwrap();
    }
    wb
}

#[test]
fn package_opens_and_lists_sheets_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.xlsx");
    XlsxWriter::from_workbook(&report_like())
        .unwrap()
        .write(&path)
        .unwrap();

    let workbook = read_text(&path, "xl/workbook.xml");
    let positions: Vec<usize> = ["\"Data\"", "\"Charts A\"", "\"Charts B\""]
        .iter()
        .map(|n| workbook.find(n).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let types = read_text(&path, "[Content_Types].xml");
    assert!(types.contains("/xl/worksheets/sheet3.xml"));
    assert!(types.contains("/xl/drawings/drawing2.xml"));
    assert!(types.contains("Extension=\"png\""));
}

#[test]
fn cells_styles_and_merges_survive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.xlsx");
    XlsxWriter::from_workbook(&report_like())
        .unwrap()
        .write(&path)
        .unwrap();

    let sheet = read_text(&path, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("<mergeCell ref=\"B2:D2\"/>"));
    assert!(sheet.contains("Mass m1 &amp; m2"));
    assert!(sheet.contains("<v>1.25</v>"));
    assert!(sheet.contains("<tabColor rgb=\"FF4472C4\"/>"));

    let styles = read_text(&path, "xl/styles.xml");
    assert!(styles.contains("formatCode=\"0.0000\""));
    assert!(styles.contains("<fgColor rgb=\"FF4472C4\"/>"));
    assert!(styles.contains("<b/>"));
}

#[test]
fn images_are_numbered_across_sheets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.xlsx");
    XlsxWriter::from_workbook(&report_like())
        .unwrap()
        .write(&path)
        .unwrap();

    for n in 1..=4 {
        let media = read_part(&path, &format!("xl/media/image{n}.png")).unwrap();
        assert_eq!(media, png());
    }
    assert!(read_part(&path, "xl/media/image5.png").is_none());

    let rels = read_text(&path, "xl/drawings/_rels/drawing2.xml.rels");
    assert!(rels.contains("../media/image3.png"));
    assert!(rels.contains("../media/image4.png"));

    let sheet_rels = read_text(&path, "xl/worksheets/_rels/sheet3.xml.rels");
    assert!(sheet_rels.contains("../drawings/drawing2.xml"));
    assert!(read_part(&path, "xl/worksheets/_rels/sheet1.xml.rels").is_none());
}

#[test]
fn document_properties_are_escaped() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.xlsx");
    XlsxWriter::from_workbook(&report_like())
        .unwrap()
        .write(&path)
        .unwrap();

    let core = read_text(&path, "docProps/core.xml");
    assert!(core.contains("<dc:title>Collision &lt;report&gt;</dc:title>"));
    assert!(core.contains("<dc:creator>Virtual Physics Laboratory</dc:creator>"));
    assert!(core.contains("2026-10-16T09:30:00Z"));

    let app = read_text(&path, "docProps/app.xml");
    assert!(app.contains("<vt:i4>3</vt:i4>"));
}
