use std::io;
use crate::models::conversion::BatchEntry;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub inputs: Vec<String>,
    pub output: String,
    pub config: String,
    pub punctuation: bool,
    pub keep_font: bool,
    pub dictionaries: Vec<String>,
    pub settings_path: String,
    pub jobs: Option<usize>,
    pub no_progress: bool,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 轉換執行的 Port
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> io::Result<Vec<BatchEntry>>;
}
