use dialoguer::{Confirm, Input, Select};
use std::io;
use std::path::Path;

use crate::config::config::{CONFIG_NAMES, DEFAULT_OUTPUT, DEFAULT_SETTINGS_PATH};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::facade::batch::BatchConversionAdapter;
use crate::models::conversion::BatchEntry;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::utils::setup_logging;

pub fn process_interactive_mode() -> io::Result<Vec<BatchEntry>> {
    println!("=== 歡迎使用互動模式 ===");
    setup_logging("info")?;
    let use_default_config = get_default_config_option()?;
    let input = get_input_path()?;
    let output = get_output_path()?;

    let config_port: Box<dyn ConfigPort> = if use_default_config {
        println!("使用預設配置：簡轉繁，保留字型，不轉換標點");
        Box::new(DefaultConfigAdapter::new(vec![input], output))
    } else {
        Box::new(InteractiveConfigAdapter::new(input, output))
    };

    let config = ConfigService::new(config_port).get_config()?;
    println!("實際使用的配置：{:#?}", config);
    BatchConversionAdapter.execute(config)
}

pub fn get_default_config_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否使用預設配置？（簡轉繁、保留字型，僅需指定輸入和輸出路徑）")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("預設配置選擇失敗: {}", e)))
}

pub fn get_input_path() -> io::Result<String> {
    Input::new()
        .with_prompt("請輸入檔案或目錄路徑（例如：./report.docx 或 ./books）")
        .validate_with(|input: &String| -> Result<(), String> {
            if Path::new(input).exists() { Ok(()) } else { Err(format!("路徑 '{}' 不存在", input)) }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_output_path() -> io::Result<String> {
    Input::new()
        .with_prompt("輸入輸出目錄（例如：./output，預設為 output）")
        .default(DEFAULT_OUTPUT.to_string())
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

pub fn get_config_name() -> io::Result<String> {
    let items = [
        "s2t - 簡體到繁體",
        "s2tw - 簡體到臺灣正體",
        "s2twp - 簡體到臺灣正體（含慣用詞）",
        "s2hk - 簡體到香港繁體",
        "t2s - 繁體到簡體",
        "tw2s - 臺灣正體到簡體",
        "tw2sp - 臺灣正體到簡體（含慣用詞）",
        "t2hk - 繁體到香港繁體",
    ];
    let index = Select::new()
        .with_prompt("選擇轉換設定（使用方向鍵選擇，按 Enter 確認）")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("轉換設定選擇失敗: {}", e)))?;
    Ok(CONFIG_NAMES[index].to_string())
}

pub fn get_punctuation_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否一併轉換標點符號？")
        .default(false)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("標點選項輸入失敗: {}", e)))
}

pub fn get_keep_font_option() -> io::Result<bool> {
    Confirm::new()
        .with_prompt("是否保留原始字型名稱？")
        .default(true)
        .interact()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("字型選項輸入失敗: {}", e)))
}

pub fn get_dictionaries() -> io::Result<Vec<String>> {
    let raw: String = Input::new()
        .with_prompt("輸入詞典檔路徑（以逗號分隔，可留空）")
        .default(String::new())
        .allow_empty(true)
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("詞典路徑輸入失敗: {}", e)))?;
    Ok(raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

// 交互配置適配器
pub struct InteractiveConfigAdapter {
    input: String,
    output: String,
}

impl InteractiveConfigAdapter {
    pub fn new(input: String, output: String) -> Self {
        InteractiveConfigAdapter { input, output }
    }
}

impl ConfigPort for InteractiveConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let config = get_config_name()?;
        let punctuation = get_punctuation_option()?;
        let keep_font = get_keep_font_option()?;
        let dictionaries = get_dictionaries()?;

        Ok(AppConfig {
            inputs: vec![self.input.clone()],
            output: self.output.clone(),
            config,
            punctuation,
            keep_font,
            dictionaries,
            settings_path: DEFAULT_SETTINGS_PATH.to_string(),
            jobs: None,
            no_progress: false,
        })
    }
}
