mod common;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;
use zip::{CompressionMethod, ZipArchive};
use zho_office_converter::error::{ConvertError, ExtractError, PackError};
use zho_office_converter::facade::conversion_facade::ConversionFacade;
use zho_office_converter::facade::traits::i_conversion::ConversionFacadeTrait;
use zho_office_converter::models::conversion::{ConversionOptions, ConversionRequest};
use zho_office_converter::service::converter::IdentityConverter;
use zho_office_converter::service::traits::i_service::TextConverter;
use zho_office_converter::utils::cancel::CancelToken;

use common::{docx_entries, entry_names, read_entry, write_zip, ReplaceConverter};

fn facade(temp_root: &Path) -> ConversionFacade {
    let converter = ReplaceConverter::new(&[("你", "妳"), ("体", "體"), ("简", "簡")]);
    ConversionFacade::new(Arc::new(converter)).with_temp_root(temp_root)
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).unwrap().next().is_none()
}

#[test]
fn docx_text_is_converted_and_markup_kept() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("report.docx");
    let dest = dir.path().join("out").join("report_s2t.docx");
    write_zip(&source, &docx_entries());

    let outcome = facade(temp_root.path()).convert_document(
        &source,
        &dest,
        "docx",
        ConversionOptions::new("s2t").with_keep_font(true),
    );

    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.fragments_converted, 1);
    assert!(outcome.error.is_none());
    let document = read_entry(&dest, "word/document.xml");
    assert!(document.contains("<w:t>妳好</w:t>"));
    assert!(document.contains(r#"w:ascii="Calibri""#));
    assert!(document.contains(r#"w:eastAsia="宋体""#));
    // 非片段檔案原樣保留
    assert!(read_entry(&dest, "word/styles.xml").contains("标题"));
    assert!(is_empty_dir(temp_root.path()));
}

#[test]
fn font_names_are_converted_when_not_kept() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("report.docx");
    let dest = dir.path().join("report_s2t.docx");
    write_zip(&source, &docx_entries());

    let outcome = facade(temp_root.path()).convert_document(&source, &dest, "DOCX", ConversionOptions::new("s2t"));

    assert!(outcome.success, "{}", outcome.message);
    let document = read_entry(&dest, "word/document.xml");
    assert!(document.contains(r#"w:eastAsia="宋體""#));
    assert!(document.contains("<w:t>妳好</w:t>"));
}

#[test]
fn pptx_counts_every_slide() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("deck.pptx");
    let dest = dir.path().join("deck_s2t.pptx");
    write_zip(
        &source,
        &[
            ("[Content_Types].xml", "<Types/>"),
            ("ppt/presentation.xml", "<p:presentation/>"),
            ("ppt/slides/slide1.xml", r#"<p:sld><a:latin typeface="等线"/><a:t>你好</a:t></p:sld>"#),
            ("ppt/slides/slide2.xml", "<p:sld><a:t>简体</a:t></p:sld>"),
        ],
    );

    let outcome = facade(temp_root.path()).convert_document(
        &source,
        &dest,
        "pptx",
        ConversionOptions::new("s2t").with_keep_font(true),
    );

    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.fragments_converted, 2);
    assert!(read_entry(&dest, "ppt/slides/slide1.xml").contains("<a:t>妳好</a:t>"));
    assert!(read_entry(&dest, "ppt/slides/slide2.xml").contains("<a:t>簡體</a:t>"));
    assert_eq!(read_entry(&dest, "ppt/presentation.xml"), "<p:presentation/>");
}

#[test]
fn archive_without_fragments_fails() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("empty.docx");
    let dest = dir.path().join("empty_s2t.docx");
    write_zip(&source, &[("[Content_Types].xml", "<Types/>")]);

    let outcome = facade(temp_root.path()).convert_document(&source, &dest, "docx", ConversionOptions::new("s2t"));

    assert!(!outcome.success);
    assert_eq!(outcome.fragments_converted, 0);
    assert!(matches!(outcome.error, Some(ConvertError::NoFragments { .. })));
    assert!(!dest.exists());
    assert!(is_empty_dir(temp_root.path()));
}

#[test]
fn unsupported_format_is_reported() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("legacy.doc");
    fs::write(&source, b"binary").unwrap();

    let outcome = facade(dir.path()).convert_document(
        &source,
        dir.path().join("legacy_s2t.doc"),
        "doc",
        ConversionOptions::new("s2t"),
    );

    assert!(!outcome.success);
    assert!(matches!(outcome.error, Some(ConvertError::UnsupportedFormat(_))));
}

#[test]
fn non_archive_input_fails_during_extraction() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("broken.docx");
    fs::write(&source, "這不是壓縮檔").unwrap();

    let outcome = facade(temp_root.path()).convert_document(
        &source,
        dir.path().join("broken_s2t.docx"),
        "docx",
        ConversionOptions::new("s2t"),
    );

    assert!(!outcome.success);
    assert!(matches!(outcome.error, Some(ConvertError::Extract(ExtractError::Archive(_)))));
    assert!(is_empty_dir(temp_root.path()));
}

#[test]
fn epub_output_starts_with_stored_mimetype() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("book.epub");
    let dest = dir.path().join("book_s2t.epub");
    // 輸入檔故意把 mimetype 放在最後
    write_zip(
        &source,
        &[
            ("META-INF/container.xml", "<container/>"),
            ("OEBPS/content.opf", "<package><dc:title>简体书</dc:title></package>"),
            ("OEBPS/ch1.xhtml", r#"<p style="font-family: 宋体;">你好</p>"#),
            ("mimetype", "application/epub+zip"),
        ],
    );

    let outcome = facade(temp_root.path()).convert_document(
        &source,
        &dest,
        "epub",
        ConversionOptions::new("s2t").with_keep_font(true),
    );

    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.fragments_converted, 2);

    let names = entry_names(&dest);
    assert_eq!(names[0], "mimetype");
    let mut archive = ZipArchive::new(fs::File::open(&dest).unwrap()).unwrap();
    assert_eq!(archive.by_index(0).unwrap().compression(), CompressionMethod::Stored);
    drop(archive);

    assert_eq!(read_entry(&dest, "mimetype"), "application/epub+zip");
    let chapter = read_entry(&dest, "OEBPS/ch1.xhtml");
    assert!(chapter.contains("font-family: 宋体;"));
    assert!(chapter.contains(">妳好<"));
    assert!(read_entry(&dest, "OEBPS/content.opf").contains("簡體书"));
}

#[test]
fn epub_without_mimetype_writes_nothing() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("book.epub");
    let dest = dir.path().join("book_s2t.epub");
    write_zip(&source, &[("OEBPS/ch1.xhtml", "<p>你好</p>")]);

    let outcome = facade(temp_root.path()).convert_document(&source, &dest, "epub", ConversionOptions::new("s2t"));

    assert!(!outcome.success);
    assert_eq!(outcome.fragments_converted, 1);
    assert!(matches!(outcome.error, Some(ConvertError::Pack(PackError::MissingMimetype))));
    assert!(!dest.exists());
    assert!(is_empty_dir(temp_root.path()));
}

/// 轉換第一段文字時就觸發取消
struct CancellingConverter {
    cancel: CancelToken,
}

impl TextConverter for CancellingConverter {
    fn convert(&self, text: &str, _config: &str, _punctuation: bool) -> String {
        self.cancel.cancel();
        text.to_string()
    }
}

#[test]
fn cancellation_leaves_no_output_and_no_working_dir() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("report.docx");
    let dest = dir.path().join("report_s2t.docx");
    write_zip(&source, &docx_entries());

    let cancel = CancelToken::new();
    let facade = ConversionFacade::new(Arc::new(CancellingConverter { cancel: cancel.clone() }))
        .with_temp_root(temp_root.path());
    let request = ConversionRequest::new(&source, &dest, "docx", ConversionOptions::new("s2t")).unwrap();

    let outcome = facade.execute_conversion(&request, &cancel);

    assert!(!outcome.success);
    assert!(matches!(outcome.error, Some(ConvertError::Cancelled)));
    assert!(!dest.exists());
    assert!(is_empty_dir(temp_root.path()));
}

#[test]
fn existing_destination_is_replaced() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("report.docx");
    let dest = dir.path().join("report_s2t.docx");
    write_zip(&source, &docx_entries());
    fs::write(&dest, "舊的輸出").unwrap();

    let outcome = facade(temp_root.path()).convert_document(&source, &dest, "docx", ConversionOptions::new("s2t"));

    assert!(outcome.success, "{}", outcome.message);
    assert!(read_entry(&dest, "word/document.xml").contains("妳好"));
}

#[test]
fn async_conversion_runs_on_blocking_pool() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("sheet.xlsx");
    let dest = dir.path().join("sheet_s2t.xlsx");
    write_zip(
        &source,
        &[
            ("[Content_Types].xml", "<Types/>"),
            ("xl/sharedStrings.xml", r#"<sst><si><t>简体</t></si><font><name val="宋体"/></font></sst>"#),
        ],
    );

    let facade = Arc::new(facade(temp_root.path()));
    let request = ConversionRequest::new(
        &source,
        &dest,
        "xlsx",
        ConversionOptions::new("s2t").with_keep_font(true),
    )
    .unwrap();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .unwrap();
    let outcome = runtime.block_on(facade.execute_async(request, CancelToken::new()));

    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.fragments_converted, 1);
    let strings = read_entry(&dest, "xl/sharedStrings.xml");
    assert!(strings.contains("<t>簡體</t>"));
    assert!(strings.contains(r#"val="宋体""#));
    assert!(is_empty_dir(temp_root.path()));
}

#[test]
fn identity_conversion_keeps_odt_content_byte_for_byte() {
    let dir = tempdir().unwrap();
    let temp_root = tempdir().unwrap();
    let source = dir.path().join("notes.odt");
    let dest = dir.path().join("notes_s2t.odt");
    let content = concat!(
        r#"<office:document-content><office:font-face-decls>"#,
        r#"<style:font-face style:name="宋体" svg:font-family="'宋体'"/></office:font-face-decls>"#,
        r#"<text:p text:style-name="P1">简体中文</text:p></office:document-content>"#
    );
    write_zip(&source, &[("mimetype", "application/vnd.oasis.opendocument.text"), ("content.xml", content)]);

    let facade = ConversionFacade::new(Arc::new(IdentityConverter)).with_temp_root(temp_root.path());
    let outcome = facade.convert_document(&source, &dest, "odt", ConversionOptions::new("s2t").with_keep_font(true));

    assert!(outcome.success, "{}", outcome.message);
    assert_eq!(outcome.fragments_converted, 1);
    assert_eq!(read_entry(&dest, "content.xml"), content);
}
