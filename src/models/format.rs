use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;
use regex::Regex;

/// 支援的文件格式，集合是封閉的
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedFormat {
    Docx,
    Xlsx,
    Pptx,
    Odt,
    Ods,
    Odp,
    Epub,
}

/// 判斷壓縮檔內哪些路徑是需要轉換的片段
#[derive(Clone, Copy)]
pub enum FragmentRule {
    /// 固定的相對路徑列表
    Static(&'static [&'static str]),
    /// 從 `root` 遞迴掃描，`include` 收到的是相對於 `root` 的路徑
    Scan {
        root: &'static str,
        include: fn(&Path) -> bool,
    },
}

impl fmt::Debug for FragmentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentRule::Static(paths) => f.debug_tuple("Static").field(paths).finish(),
            FragmentRule::Scan { root, .. } => f.debug_struct("Scan").field("root", root).finish_non_exhaustive(),
        }
    }
}

const DOCX_PARTS: &[&str] = &["word/document.xml"];
const XLSX_PARTS: &[&str] = &["xl/sharedStrings.xml"];
const ODF_PARTS: &[&str] = &["content.xml"];

const PPTX_KEYWORDS: &[&str] = &["slide", "notesslide", "slidemaster", "slidelayout", "comment"];
const EPUB_EXTENSIONS: &[&str] = &["xhtml", "html", "opf", "ncx"];

fn has_extension(path: &Path, candidates: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| candidates.iter().any(|c| ext.eq_ignore_ascii_case(c)))
        .unwrap_or(false)
}

fn is_pptx_fragment(relative: &Path) -> bool {
    if !has_extension(relative, &["xml"]) {
        return false;
    }
    let lowered = relative.to_string_lossy().replace('\\', "/").to_lowercase();
    PPTX_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

fn is_epub_fragment(relative: &Path) -> bool {
    has_extension(relative, EPUB_EXTENSIONS)
}

// 字型名稱的樣式：第 1 組為前綴，第 2 組為字型名稱，第 3 組為結尾分隔符（EPUB 可省略）
static DOCX_FONT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(w:eastAsia="|w:ascii="|w:hAnsi="|w:cs=")(.*?)(")"#).expect("docx font pattern")
});
static XLSX_FONT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(val=")(.*?)(")"#).expect("xlsx font pattern")
});
static PPTX_FONT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(typeface=")(.*?)(")"#).expect("pptx font pattern")
});
static ODF_FONT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"((?:style:font-name(?:-asian|-complex)?|svg:font-family|style:name)=["'])([^"']+)(["'])"#)
        .expect("odf font pattern")
});
// 不跨越 CSS 區塊或標籤邊界，避免 `font-family:X}</style>` 吞掉後面的正文
static EPUB_FONT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(font-family\s*:\s*)([^;"'{}<>]+)([;"'])?"#).expect("epub font pattern")
});

impl SupportedFormat {
    pub const ALL: [SupportedFormat; 7] = [
        SupportedFormat::Docx,
        SupportedFormat::Xlsx,
        SupportedFormat::Pptx,
        SupportedFormat::Odt,
        SupportedFormat::Ods,
        SupportedFormat::Odp,
        SupportedFormat::Epub,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedFormat::Docx => "docx",
            SupportedFormat::Xlsx => "xlsx",
            SupportedFormat::Pptx => "pptx",
            SupportedFormat::Odt => "odt",
            SupportedFormat::Ods => "ods",
            SupportedFormat::Odp => "odp",
            SupportedFormat::Epub => "epub",
        }
    }

    /// 依副檔名推斷格式
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    pub fn fragment_rule(&self) -> FragmentRule {
        match self {
            SupportedFormat::Docx => FragmentRule::Static(DOCX_PARTS),
            SupportedFormat::Xlsx => FragmentRule::Static(XLSX_PARTS),
            SupportedFormat::Odt | SupportedFormat::Ods | SupportedFormat::Odp => FragmentRule::Static(ODF_PARTS),
            SupportedFormat::Pptx => FragmentRule::Scan { root: "ppt", include: is_pptx_fragment },
            SupportedFormat::Epub => FragmentRule::Scan { root: "", include: is_epub_fragment },
        }
    }

    pub fn font_pattern(&self) -> Option<&'static Regex> {
        let pattern: &'static Regex = match self {
            SupportedFormat::Docx => &DOCX_FONT,
            SupportedFormat::Xlsx => &XLSX_FONT,
            SupportedFormat::Pptx => &PPTX_FONT,
            SupportedFormat::Odt | SupportedFormat::Ods | SupportedFormat::Odp => &ODF_FONT,
            SupportedFormat::Epub => &EPUB_FONT,
        };
        Some(pattern)
    }

    /// EPUB 需要 mimetype 置首且不壓縮
    pub fn requires_mimetype_first(&self) -> bool {
        matches!(self, SupportedFormat::Epub)
    }
}

impl FromStr for SupportedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        SupportedFormat::ALL
            .iter()
            .copied()
            .find(|format| format.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for SupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
