//! Package writer for `.xlsx` workbooks.
//!
//! Lays out every part of a [`Workbook`] and zips them into a package.

use crate::model::Workbook;
use crate::style::StyleSheet;
use crate::xml::{self, PackageShape};
use crate::{Result, WorkbookError};
use std::fs::File;
use std::future::Future;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use tracing::{debug, info};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// Builder holding the package parts of one workbook.
pub struct XlsxWriter {
    files: Vec<(String, Vec<u8>)>,
}

impl XlsxWriter {
    /// Lay out every part of `workbook`.
    ///
    /// Parts are kept in a fixed order starting with `[Content_Types].xml`,
    /// so the same workbook always produces the same package.
    pub fn from_workbook(workbook: &Workbook) -> Result<Self> {
        let sheets = workbook.sheets();
        if sheets.is_empty() {
            return Err(WorkbookError::EmptyWorkbook);
        }
        let names = workbook.sheet_names();

        let mut styles = StyleSheet::new();
        let mut sheet_parts = Vec::with_capacity(sheets.len());
        let mut drawing_parts = Vec::new();
        let mut media = Vec::new();

        for (i, sheet) in sheets.iter().enumerate() {
            let has_drawing = !sheet.images().is_empty();
            let xml = xml::worksheet_xml(sheet, i == 0, has_drawing, &mut styles)?;
            sheet_parts.push((xml::sheet_path(i + 1), xml.into_bytes()));

            if has_drawing {
                let drawing = drawing_parts.len() + 1;
                sheet_parts.push((
                    xml::sheet_rels_path(i + 1),
                    xml::worksheet_rels(drawing).into_bytes(),
                ));

                let mut numbers = Vec::with_capacity(sheet.images().len());
                for image in sheet.images() {
                    media.push(image.data.clone());
                    numbers.push(media.len());
                }
                drawing_parts.push((
                    xml::drawing_path(drawing),
                    xml::drawing_xml(sheet.images()).into_bytes(),
                ));
                drawing_parts.push((
                    xml::drawing_rels_path(drawing),
                    xml::drawing_rels(&numbers).into_bytes(),
                ));
            }
        }

        let shape = PackageShape {
            sheets: sheets.len(),
            drawings: drawing_parts.len() / 2,
            has_images: !media.is_empty(),
        };

        let mut writer = Self { files: Vec::new() };
        writer.add_file("[Content_Types].xml", xml::content_types(&shape).into_bytes());
        writer.add_file("_rels/.rels", xml::root_rels().into_bytes());
        writer.add_file(
            "docProps/app.xml",
            xml::app_xml(&workbook.properties, &names).into_bytes(),
        );
        writer.add_file(
            "docProps/core.xml",
            xml::core_xml(&workbook.properties).into_bytes(),
        );
        writer.add_file("xl/workbook.xml", xml::workbook_xml(&names).into_bytes());
        writer.add_file(
            "xl/_rels/workbook.xml.rels",
            xml::workbook_rels(sheets.len()).into_bytes(),
        );
        writer.add_file("xl/styles.xml", styles.to_xml().into_bytes());
        for (path, data) in sheet_parts.into_iter().chain(drawing_parts) {
            writer.add_file(path, data);
        }
        for (i, data) in media.into_iter().enumerate() {
            writer.add_file(xml::media_path(i + 1), data);
        }

        Ok(writer)
    }

    fn add_file(&mut self, path: impl Into<String>, data: Vec<u8>) {
        let path = path.into();
        let bytes = data.len() as u64;
        debug!(path = %path, bytes, "Added part to workbook");
        self.files.push((path, data));
    }

    /// Part paths in package order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(path, _)| path.as_str())
    }

    /// Get total size in bytes before compression.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|(_, data)| data.len() as u64).sum()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Write the package to a file.
    pub fn write(self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_zip(file)?;

        info!(
            path = %path.display(),
            parts = self.files.len(),
            bytes = self.total_bytes(),
            "Workbook written"
        );
        Ok(())
    }

    /// Write the package to a byte vector.
    pub fn write_to_vec(self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write_zip(&mut buffer)?;
        let bytes = buffer.into_inner();

        info!(
            parts = self.files.len(),
            compressed_bytes = bytes.len(),
            uncompressed_bytes = self.total_bytes(),
            "Workbook written to memory"
        );
        Ok(bytes)
    }

    fn write_zip<W: Write + Seek>(&self, sink: W) -> Result<()> {
        let mut zip = ZipWriter::new(sink);

        // Fixed timestamp keeps packages byte-identical across runs.
        let options: FileOptions<'_, ()> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644)
            .last_modified_time(zip::DateTime::default());

        for (path, data) in &self.files {
            zip.start_file(path.as_str(), options)?;
            zip.write_all(data)?;
        }
        zip.finish()?;
        Ok(())
    }
}

/// Serializes a finished workbook into package bytes.
///
/// Completion is signalled by the returned future resolving.
pub trait WorkbookSerializer: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool {
        true
    }

    fn serialize(&self, workbook: Workbook) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// [`WorkbookSerializer`] backed by [`XlsxWriter`] on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSerializer;

impl WorkbookSerializer for XlsxSerializer {
    fn name(&self) -> &str {
        "xlsx"
    }

    fn serialize(&self, workbook: Workbook) -> impl Future<Output = Result<Vec<u8>>> + Send {
        async move {
            tokio::task::spawn_blocking(move || {
                XlsxWriter::from_workbook(&workbook)?.write_to_vec()
            })
            .await
            .map_err(|e| WorkbookError::Task(e.to_string()))?
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellRange;
    use crate::model::{CellValue, ImageAnchor, SheetImage, Worksheet};
    use crate::style::CellStyle;
    use tempfile::TempDir;

    fn png() -> Vec<u8> {
        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        data.extend_from_slice(&[0; 24]);
        data
    }

    fn sample() -> Workbook {
        let mut cover = Worksheet::new("Cover");
        cover
            .write_merged(
                CellRange::new(2, 1, 4, 6),
                CellValue::text("REPORT"),
                CellStyle::default(),
            )
            .unwrap();
        let mut charts = Worksheet::new("Charts");
        charts
            .add_image(SheetImage {
                name: "Velocities".into(),
                data: png(),
                anchor: ImageAnchor::new(1, 4, 5, 24),
            })
            .unwrap();
        let mut wb = Workbook::default();
        wb.add_sheet(cover).unwrap();
        wb.add_sheet(charts).unwrap();
        wb
    }

    #[test]
    fn test_empty_workbook_fails() {
        let result = XlsxWriter::from_workbook(&Workbook::default());
        assert!(matches!(result, Err(WorkbookError::EmptyWorkbook)));
    }

    #[test]
    fn test_part_layout() {
        let writer = XlsxWriter::from_workbook(&sample()).unwrap();
        let parts: Vec<&str> = writer.part_names().collect();
        assert_eq!(parts[0], "[Content_Types].xml");
        assert!(parts.contains(&"xl/worksheets/sheet2.xml"));
        assert!(parts.contains(&"xl/worksheets/_rels/sheet2.xml.rels"));
        assert!(!parts.contains(&"xl/worksheets/_rels/sheet1.xml.rels"));
        assert!(parts.contains(&"xl/drawings/drawing1.xml"));
        assert!(parts.contains(&"xl/media/image1.png"));
        assert_eq!(writer.file_count(), 13);
    }

    #[test]
    fn test_write_to_vec_is_zip_and_deterministic() {
        let a = XlsxWriter::from_workbook(&sample())
            .unwrap()
            .write_to_vec()
            .unwrap();
        let b = XlsxWriter::from_workbook(&sample())
            .unwrap()
            .write_to_vec()
            .unwrap();
        assert_eq!(&a[0..2], b"PK");
        assert_eq!(a, b);
    }

    #[test]
    fn test_write_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("report.xlsx");
        XlsxWriter::from_workbook(&sample())
            .unwrap()
            .write(&path)
            .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[tokio::test]
    async fn test_serializer_matches_writer() {
        let direct = XlsxWriter::from_workbook(&sample())
            .unwrap()
            .write_to_vec()
            .unwrap();
        let serialized = XlsxSerializer.serialize(sample()).await.unwrap();
        assert_eq!(direct, serialized);
        assert_eq!(XlsxSerializer.name(), "xlsx");
    }
}
