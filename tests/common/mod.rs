//! Builders for small in-memory PDF documents.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// One line of text: content, font size, bold, left edge and baseline in
/// text space, and an optional `cm` matrix drawn inside `q`/`Q`.
pub struct Line {
    pub text: &'static str,
    pub size: i64,
    pub bold: bool,
    pub x: i64,
    pub baseline: i64,
    pub transform: Option<[f32; 6]>,
}

impl Line {
    /// Draw the line under a `cm` transform.
    pub fn transformed(mut self, matrix: [f32; 6]) -> Self {
        self.transform = Some(matrix);
        self
    }
}

pub fn line(text: &'static str, size: i64, bold: bool, baseline: i64) -> Line {
    line_at(text, size, bold, 72, baseline)
}

pub fn line_at(text: &'static str, size: i64, bold: bool, x: i64, baseline: i64) -> Line {
    Line {
        text,
        size,
        bold,
        x,
        baseline,
        transform: None,
    }
}

/// Where the MediaBox is declared.
#[derive(Clone, Copy, PartialEq)]
pub enum MediaBoxOn {
    Page,
    PageTree,
}

/// Build a PDF with one page per entry of `pages` on a 612x792 page.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    build_pdf_with(pages, 792, MediaBoxOn::Page)
}

pub fn build_pdf_with(pages: &[Vec<Line>], height: i64, media_box_on: MediaBoxOn) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let media_box = || -> Object {
        vec![0.into(), 0.into(), 612.into(), Object::Integer(height)].into()
    };

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let content_id = add_content(&mut doc, lines);
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if media_box_on == MediaBoxOn::Page {
            page.set("MediaBox", media_box());
        }
        kids.push(doc.add_object(page).into());
    }

    let mut tree = dictionary! {
        "Type" => "Pages",
        "Count" => Object::Integer(kids.len() as i64),
        "Kids" => kids,
    };
    if media_box_on == MediaBoxOn::PageTree {
        tree.set("MediaBox", media_box());
    }
    doc.objects.insert(pages_id, Object::Dictionary(tree));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn add_content(doc: &mut Document, lines: &[Line]) -> ObjectId {
    let mut operations = Vec::new();
    for l in lines {
        let font = if l.bold { "F2" } else { "F1" };
        if let Some(matrix) = l.transform {
            operations.push(Operation::new("q", vec![]));
            operations.push(Operation::new(
                "cm",
                matrix.iter().map(|&v| Object::Real(v)).collect(),
            ));
        }
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![font.into(), Object::Integer(l.size)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(l.x), Object::Integer(l.baseline)],
        ));
        operations.push(Operation::new("Tj", vec![Object::string_literal(l.text)]));
        operations.push(Operation::new("ET", vec![]));
        if l.transform.is_some() {
            operations.push(Operation::new("Q", vec![]));
        }
    }
    let content = Content { operations };
    doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()))
}

/// Two-page report used across tests.
///
/// Sizes 24, 18, 14 and 12 give thresholds H1=24, H2=18, H3=14.
pub fn sample_report() -> Vec<u8> {
    build_pdf(&[
        vec![
            line("Annual Report", 24, true, 740),
            line("Goals", 18, true, 680),
            line("this is a long line of ordinary body text", 12, false, 640),
            line("and another line of ordinary body text", 12, false, 625),
            line("with a third line of ordinary body text", 12, false, 610),
        ],
        vec![
            line("Mission", 18, true, 740),
            line("plain text continues on the second page", 12, false, 700),
            line("and keeps going for a while longer here", 12, false, 685),
            line("Pathway", 14, true, 600),
            line("closing words at the end of the report", 12, false, 560),
        ],
    ])
}
