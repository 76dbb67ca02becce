use std::io;
use crate::config::config::{DEFAULT_CONFIG, DEFAULT_SETTINGS_PATH};
use crate::config::ports::{AppConfig, ConfigPort};

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：簡轉繁、保留字型、不轉換標點
pub struct DefaultConfigAdapter {
    inputs: Vec<String>,
    output: String,
}

impl DefaultConfigAdapter {
    pub fn new(inputs: Vec<String>, output: String) -> Self {
        DefaultConfigAdapter { inputs, output }
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            inputs: self.inputs.clone(),
            output: self.output.clone(),
            config: DEFAULT_CONFIG.to_string(),
            punctuation: false,
            keep_font: true,
            dictionaries: Vec::new(),
            settings_path: DEFAULT_SETTINGS_PATH.to_string(),
            jobs: None,
            no_progress: false,
        })
    }
}
