use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use log::info;
use serde::{Deserialize, Serialize};

/// 設定檔內容，載入後以不可變值注入轉換流程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    /// 簡體標點到繁體標點的對應，反向轉換時對調使用
    pub punctuations: BTreeMap<String, String>,
    /// 以純文字方式整檔轉換的副檔名（含前導點）
    pub text_file_types: Vec<String>,
    pub office_file_types: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        let punctuations = [("“", "「"), ("”", "」"), ("‘", "『"), ("’", "』")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let text_file_types = [
            ".txt", ".srt", ".vtt", ".ass", ".xml", ".ttml2", ".csv", ".json", ".html", ".cs", ".py",
            ".java", ".md", ".js",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        let office_file_types = [".docx", ".xlsx", ".pptx", ".odt", ".ods", ".odp", ".epub"]
            .into_iter()
            .map(String::from)
            .collect();
        Settings {
            punctuations,
            text_file_types,
            office_file_types,
        }
    }
}

impl Settings {
    /// 讀取設定檔；檔案不存在時寫入預設值後回傳預設值
    pub fn load_or_init(path: &Path) -> io::Result<Self> {
        if path.exists() {
            let text = fs::read_to_string(path)?;
            let settings = serde_json::from_str(&text)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("設定檔格式錯誤 {}: {}", path.display(), e)))?;
            info!("載入設定檔：{}", path.display());
            return Ok(settings);
        }

        let settings = Settings::default();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, text)?;
        info!("設定檔不存在，已寫入預設設定：{}", path.display());
        Ok(settings)
    }

    pub fn is_text_file(&self, path: &Path) -> bool {
        Self::matches_extension(&self.text_file_types, path)
    }

    pub fn is_office_file(&self, path: &Path) -> bool {
        Self::matches_extension(&self.office_file_types, path)
    }

    fn matches_extension(types: &[String], path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        types
            .iter()
            .any(|t| t.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}
