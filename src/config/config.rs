use clap::Parser;
use std::io;
use std::path::Path;

pub const DEFAULT_SETTINGS_PATH: &str = "LanguageSettings.json";
pub const DEFAULT_OUTPUT: &str = "output";
pub const DEFAULT_CONFIG: &str = "s2t";

/// 可選的轉換設定
pub const CONFIG_NAMES: [&str; 8] = ["s2t", "s2tw", "s2twp", "s2hk", "t2s", "tw2s", "tw2sp", "t2hk"];

#[derive(Parser, Clone, Debug)]
#[command(
    name = "zho_office_converter",
    about = "轉換 Office 文件與 EPUB 中的簡繁中文文字",
    long_about = "將 docx、xlsx、pptx、odt、ods、odp、epub 文件內的文字進行簡繁轉換，只改動文字內容，不改動標記，並可保留字型名稱。\n亦可批次轉換設定檔中列出的純文字檔。\n不帶任何參數執行時進入互動模式。使用 `--help` 查看詳細用法。",
    arg_required_else_help = true
)]
pub struct Cli {
    /// 輸入檔案或目錄，可指定多個
    #[arg(required = true)]
    pub inputs: Vec<String>,
    #[arg(short, long)]
    pub output: Option<String>,
    #[arg(long, value_parser = CONFIG_NAMES)]
    pub config: Option<String>,
    #[arg(long)]
    pub punctuation: Option<bool>,
    #[arg(long)]
    pub keep_font: Option<bool>,
    /// OpenCC 文字格式詞典，可重複指定
    #[arg(long = "dict")]
    pub dictionaries: Vec<String>,
    #[arg(long)]
    pub settings: Option<String>,
    #[arg(long)]
    pub jobs: Option<usize>,
    #[arg(long)]
    pub no_progress: Option<bool>,
    #[arg(long, value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: Option<String>,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

impl Cli {
    /// 只給了輸入與輸出路徑時使用預設配置
    pub fn is_default_config(&self) -> bool {
        self.config.is_none()
            && self.punctuation.is_none()
            && self.keep_font.is_none()
            && self.dictionaries.is_empty()
            && self.settings.is_none()
            && self.jobs.is_none()
            && self.no_progress.is_none()
            && self.log_level.is_none()
    }
}

pub fn validate_input_path(input: &str) -> io::Result<&Path> {
    let path = Path::new(input);
    if !path.exists() {
        log::error!("輸入路徑不存在：{}", input);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("輸入路徑 '{}' 不存在", input)
        ));
    }
    Ok(path)
}

pub fn validate_config_name(config: &str) -> io::Result<()> {
    if CONFIG_NAMES.contains(&config) {
        Ok(())
    } else {
        Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的轉換設定: {}", config)))
    }
}
