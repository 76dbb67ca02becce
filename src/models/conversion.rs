use std::path::{Path, PathBuf};
use crate::error::ConvertError;
use crate::models::format::SupportedFormat;

/// 與文件格式無關的轉換參數
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// 轉換設定名稱，例如 `s2t`、`t2s`
    pub config: String,
    pub punctuation: bool,
    pub keep_font: bool,
}

impl ConversionOptions {
    pub fn new(config: impl Into<String>) -> Self {
        ConversionOptions {
            config: config.into(),
            punctuation: false,
            keep_font: false,
        }
    }

    pub fn with_punctuation(mut self, punctuation: bool) -> Self {
        self.punctuation = punctuation;
        self
    }

    pub fn with_keep_font(mut self, keep_font: bool) -> Self {
        self.keep_font = keep_font;
        self
    }
}

/// 經過驗證的轉換請求，建立後不可變
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    source: PathBuf,
    destination: PathBuf,
    format: SupportedFormat,
    options: ConversionOptions,
}

impl ConversionRequest {
    /// 先檢查格式（不碰檔案系統），再檢查來源檔是否存在
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        format: &str,
        options: ConversionOptions,
    ) -> Result<Self, ConvertError> {
        let format: SupportedFormat = format
            .parse()
            .map_err(ConvertError::UnsupportedFormat)?;
        Self::with_format(source, destination, format, options)
    }

    pub fn with_format(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        format: SupportedFormat,
        options: ConversionOptions,
    ) -> Result<Self, ConvertError> {
        let source = source.into();
        if !source.is_file() {
            return Err(ConvertError::SourceNotFound(source));
        }
        Ok(ConversionRequest {
            source,
            destination: destination.into(),
            format,
            options,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn format(&self) -> SupportedFormat {
        self.format
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }
}

/// 轉換結果；預期內的失敗都以此回報，不會以錯誤往外拋
#[derive(Debug)]
pub struct ConversionOutcome {
    pub success: bool,
    pub message: String,
    pub fragments_converted: usize,
    pub error: Option<ConvertError>,
}

impl ConversionOutcome {
    pub fn succeeded(message: impl Into<String>, fragments_converted: usize) -> Self {
        ConversionOutcome {
            success: true,
            message: message.into(),
            fragments_converted,
            error: None,
        }
    }

    pub fn failed(error: ConvertError) -> Self {
        Self::failed_after(error, 0)
    }

    /// 片段已轉換完畢但後續步驟失敗時，保留已轉換的數量
    pub fn failed_after(error: ConvertError, fragments_converted: usize) -> Self {
        ConversionOutcome {
            success: false,
            message: error.to_string(),
            fragments_converted,
            error: Some(error),
        }
    }
}

impl From<ConvertError> for ConversionOutcome {
    fn from(error: ConvertError) -> Self {
        ConversionOutcome::failed(error)
    }
}

/// 批次處理中單一輸入的結果
#[derive(Debug)]
pub struct BatchEntry {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    pub outcome: ConversionOutcome,
}
