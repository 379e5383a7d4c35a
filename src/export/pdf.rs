//! PDF assembly with lopdf.
//!
//! Turns positioned page layouts into a complete PDF document: base-14
//! Helvetica font dictionaries with WinAnsiEncoding, one content stream per
//! page, a Pages tree carrying shared Resources and the MediaBox, a Catalog,
//! and an Info dictionary. No fonts are embedded.

use super::compose::PageLayout;
use super::metrics;
use super::{DocumentGenerator, DocumentMeta, ExportError};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use std::io::Cursor;

/// The production document backend.
pub struct LopdfGenerator;

impl DocumentGenerator for LopdfGenerator {
    fn render(&self, pages: &[PageLayout], meta: &DocumentMeta) -> Result<Vec<u8>, ExportError> {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let oblique_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Oblique",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
                "F3" => oblique_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in pages {
            let mut operations = Vec::with_capacity(page.spans.len() * 5);
            for span in &page.spans {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![span.font.resource_name().into(), span.size.into()],
                ));
                operations.push(Operation::new("Td", vec![span.x.into(), span.y.into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(
                        metrics::encode_winansi(&span.text),
                        StringFormat::Literal,
                    )],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    meta.page_width.into(),
                    meta.page_height.into(),
                ],
            }),
        );

        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(
                metrics::encode_winansi(&meta.title),
                StringFormat::Literal,
            ),
            "Author" => Object::String(
                metrics::encode_winansi(&meta.author),
                StringFormat::Literal,
            ),
            "Producer" => Object::String(
                concat!("vitae ", env!("CARGO_PKG_VERSION")).as_bytes().to_vec(),
                StringFormat::Literal,
            ),
        });
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut buffer = Cursor::new(Vec::new());
        doc.save_to(&mut buffer)?;
        Ok(buffer.into_inner())
    }
}
