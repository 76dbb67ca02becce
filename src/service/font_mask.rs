use std::collections::HashMap;
use std::sync::LazyLock;
use regex::{Captures, Regex};

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__F_O_N_T_(\d+)__").expect("marker pattern")
});

/// 佔位標記到原始字型名稱的對應，只在單一片段的轉換期間存在
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FontPlaceholderMap {
    originals: HashMap<String, String>,
}

impl FontPlaceholderMap {
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    pub fn get(&self, marker: &str) -> Option<&str> {
        self.originals.get(marker).map(String::as_str)
    }
}

fn marker(n: usize) -> String {
    format!("__F_O_N_T_{}__", n)
}

/// 把樣式第 2 組（字型名稱）換成 `__F_O_N_T_<n>__`，第 1、3 組原樣保留。
///
/// 計數器每次呼叫都從 0 開始。樣式只比對屬性語法，並不解析 XML。
pub fn mask(xml: &str, pattern: &Regex) -> (String, FontPlaceholderMap) {
    let mut map = FontPlaceholderMap::default();
    let mut counter = 0usize;
    let masked = pattern.replace_all(xml, |caps: &Captures| {
        let original = caps.get(2).map_or("", |m| m.as_str());
        let token = marker(counter);
        counter += 1;
        map.originals.insert(token.clone(), original.to_string());

        let prefix = caps.get(1).map_or("", |m| m.as_str());
        let tail = caps.get(3).map_or("", |m| m.as_str());
        format!("{}{}{}", prefix, token, tail)
    });
    (masked.into_owned(), map)
}

/// 還原所有已知標記；不在對應表中的標記保持原樣
pub fn unmask(text: &str, map: &FontPlaceholderMap) -> String {
    if map.is_empty() {
        return text.to_string();
    }
    MARKER
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            map.get(token).unwrap_or(token).to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::format::SupportedFormat;

    fn pattern(format: SupportedFormat) -> &'static Regex {
        format.font_pattern().unwrap()
    }

    #[test]
    fn docx_attributes_are_masked_and_restored() {
        let xml = r#"<w:rFonts w:ascii="Calibri" w:eastAsia="微软雅黑" w:hAnsi="Calibri" w:cs="Arial"/><w:t>你好</w:t>"#;
        let (masked, map) = mask(xml, pattern(SupportedFormat::Docx));
        assert_eq!(map.len(), 4);
        assert!(masked.contains(r#"w:ascii="__F_O_N_T_0__""#));
        assert!(masked.contains(r#"w:eastAsia="__F_O_N_T_1__""#));
        assert!(!masked.contains("微软雅黑"));
        assert!(masked.contains("<w:t>你好</w:t>"));
        assert_eq!(unmask(&masked, &map), xml);
    }

    #[test]
    fn counter_restarts_for_each_fragment() {
        let xml = r#"<a:latin typeface="Arial"/><a:ea typeface="宋体"/>"#;
        let (first, first_map) = mask(xml, pattern(SupportedFormat::Pptx));
        let (second, second_map) = mask(xml, pattern(SupportedFormat::Pptx));
        assert_eq!(first, second);
        assert_eq!(first_map.get("__F_O_N_T_0__"), Some("Arial"));
        assert_eq!(second_map.get("__F_O_N_T_1__"), Some("宋体"));
    }

    #[test]
    fn markers_with_shared_prefix_do_not_collide() {
        let xml: String = (0..12).map(|i| format!(r#"<a:ea typeface="字体{}"/>"#, i)).collect();
        let (masked, map) = mask(&xml, pattern(SupportedFormat::Pptx));
        assert!(masked.contains("__F_O_N_T_11__"));
        assert_eq!(unmask(&masked, &map), xml);
    }

    #[test]
    fn epub_quoted_and_semicolon_terminated_declarations() {
        let xml = r#"<p style="font-family:宋体">正文</p><style>h1 { font-family: 黑体; color: red }</style>"#;
        let (masked, map) = mask(xml, pattern(SupportedFormat::Epub));
        assert_eq!(map.len(), 2);
        assert!(masked.contains(r#"style="font-family:__F_O_N_T_0__""#));
        assert!(masked.contains("font-family: __F_O_N_T_1__;"));
        assert!(masked.contains("正文"));
        assert_eq!(unmask(&masked, &map), xml);
    }

    #[test]
    fn epub_declaration_without_terminator_stops_at_block_end() {
        let xml = "<style>p{font-family:楷体}</style><p>简体正文</p>";
        let (masked, map) = mask(xml, pattern(SupportedFormat::Epub));
        assert_eq!(map.get("__F_O_N_T_0__"), Some("楷体"));
        assert!(masked.contains("<p>简体正文</p>"));
        assert_eq!(unmask(&masked, &map), xml);
    }

    #[test]
    fn unusual_quoting_is_left_alone_losslessly() {
        let samples = [
            r#"<w:rFonts w:ascii='Calibri'/>"#,
            r#"<w:rFonts w:ascii="" w:hAnsi="Cambria"/>"#,
            r#"<w:rFonts w:ascii = "Calibri"/>"#,
            r#"<w:rFonts w:ascii="Cal"ibri"/>"#,
            "",
        ];
        for xml in samples {
            let (masked, map) = mask(xml, pattern(SupportedFormat::Docx));
            assert_eq!(unmask(&masked, &map), xml, "round trip failed for {:?}", xml);
        }
    }

    #[test]
    fn unknown_markers_survive_unmask() {
        let (masked, map) = mask(r#"<a typeface="Arial"/>"#, pattern(SupportedFormat::Pptx));
        let text = format!("{} __F_O_N_T_99__", masked);
        assert_eq!(unmask(&text, &map), r#"<a typeface="Arial"/> __F_O_N_T_99__"#);
    }

    #[test]
    fn odf_and_xlsx_patterns_round_trip() {
        let odf = r#"<style:font-face style:name="宋体" svg:font-family="'宋体'"/><text:p>文字</text:p>"#;
        let (masked, map) = mask(odf, pattern(SupportedFormat::Odt));
        assert!(!map.is_empty());
        assert_eq!(unmask(&masked, &map), odf);

        let xlsx = r#"<si><r><rPr><rFont val="等线"/></rPr><t>数据</t></r></si>"#;
        let (masked, map) = mask(xlsx, pattern(SupportedFormat::Xlsx));
        assert_eq!(map.get("__F_O_N_T_0__"), Some("等线"));
        assert!(masked.contains("<t>数据</t>"));
        assert_eq!(unmask(&masked, &map), xlsx);
    }
}
