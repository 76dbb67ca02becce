#![allow(dead_code)]

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};
use zho_office_converter::service::traits::i_service::TextConverter;

pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

pub fn read_entry(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut text = String::new();
    entry.read_to_string(&mut text).unwrap();
    text
}

pub fn entry_names(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// 逐一套用字串替換的測試用轉換器
pub struct ReplaceConverter {
    pairs: Vec<(&'static str, &'static str)>,
}

impl ReplaceConverter {
    pub fn new(pairs: &[(&'static str, &'static str)]) -> Self {
        ReplaceConverter { pairs: pairs.to_vec() }
    }
}

impl TextConverter for ReplaceConverter {
    fn convert(&self, text: &str, _config: &str, _punctuation: bool) -> String {
        self.pairs
            .iter()
            .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
    }
}

pub const DOCX_DOCUMENT: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r>"#,
    r#"<w:rPr><w:rFonts w:ascii="Calibri" w:eastAsia="宋体"/></w:rPr><w:t>你好</w:t>"#,
    r#"</w:r></w:p></w:body></w:document>"#
);

pub fn docx_entries() -> Vec<(&'static str, &'static str)> {
    vec![
        ("[Content_Types].xml", r#"<?xml version="1.0"?><Types/>"#),
        ("_rels/.rels", r#"<?xml version="1.0"?><Relationships/>"#),
        ("word/document.xml", DOCX_DOCUMENT),
        ("word/styles.xml", r#"<w:styles><w:style w:styleId="标题"/></w:styles>"#),
    ]
}
