use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 解壓縮階段的錯誤，任何一種都會中止整個請求
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("無法開啟壓縮檔 {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("不是有效的壓縮檔: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// 重新打包階段的錯誤
#[derive(Error, Debug)]
pub enum PackError {
    #[error("缺少 'mimetype' 檔案，EPUB 必須以它作為第一個項目")]
    MissingMimetype,

    #[error("寫入壓縮檔失敗: {0}")]
    Io(#[from] io::Error),

    #[error("建立壓縮檔失敗: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("打包已取消")]
    Cancelled,
}

/// 單一文件轉換的失敗原因，最終會被包進 `ConversionOutcome`
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("找不到輸入檔案: {0}")]
    SourceNotFound(PathBuf),

    #[error("不支援或無效的格式: {0}")]
    UnsupportedFormat(String),

    #[error("解壓縮失敗: {0}")]
    Extract(#[from] ExtractError),

    #[error("在 '{format}' 文件中找不到有效的 XML 片段")]
    NoFragments { format: String },

    #[error("'{format}' 文件中的 {found} 個 XML 片段皆無法轉換")]
    NoConvertibleFragments { format: String, found: usize },

    #[error("重新打包失敗: {0}")]
    Pack(#[from] PackError),

    #[error("轉換已取消")]
    Cancelled,

    #[error("不支援的檔案類型，已跳過: {0}")]
    Skipped(PathBuf),

    #[error("轉換失敗: {0}")]
    Io(#[from] io::Error),
}
