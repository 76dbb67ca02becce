use std::io;
use clap::Parser;
use crate::action::interactive::process_interactive_mode;
use crate::config::config::{
    validate_config_name, validate_input_path, Cli, DEFAULT_CONFIG, DEFAULT_OUTPUT, DEFAULT_SETTINGS_PATH,
};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::facade::batch::BatchConversionAdapter;
use crate::models::conversion::BatchEntry;
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> io::Result<Vec<BatchEntry>> {
    if args.len() == 1 {
        process_interactive_mode()
    } else {
        process_cli_mode()
    }
}

pub fn process_cli_mode() -> io::Result<Vec<BatchEntry>> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref().unwrap_or("info"))?;

    let output = cli.output.clone().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());
    let config_port: Box<dyn ConfigPort> = if cli.is_default_config() {
        log::info!("未提供選項參數，使用預設配置：簡轉繁，保留字型，不轉換標點");
        Box::new(DefaultConfigAdapter::new(cli.inputs.clone(), output))
    } else {
        Box::new(CliConfigAdapter::new(cli.clone()))
    };

    let config_service = ConfigService::new(config_port);
    let config = config_service.get_config()?;
    for input in &config.inputs {
        validate_input_path(input)?;
    }

    if cli.show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    let conversion_port: Box<dyn ConversionPort> = Box::new(BatchConversionAdapter);
    conversion_port.execute(config)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let config = self.cli.config.clone().unwrap_or_else(|| DEFAULT_CONFIG.to_string());
        validate_config_name(&config)?;
        for dict in &self.cli.dictionaries {
            validate_input_path(dict)?;
        }

        Ok(AppConfig {
            inputs: self.cli.inputs.clone(),
            output: self.cli.output.clone().unwrap_or_else(|| DEFAULT_OUTPUT.to_string()),
            config,
            punctuation: self.cli.punctuation.unwrap_or(false),
            keep_font: self.cli.keep_font.unwrap_or(true),
            dictionaries: self.cli.dictionaries.clone(),
            settings_path: self.cli.settings.clone().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string()),
            jobs: self.cli.jobs,
            no_progress: self.cli.no_progress.unwrap_or(false),
        })
    }
}

/// 將批次結果整理成表格文字
pub fn format_summary(entries: &[BatchEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len() + 1);
    for entry in entries {
        let status = if entry.outcome.success { "成功" } else { "失敗" };
        let target = entry
            .destination
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "[{}] {} -> {}：{}",
            status,
            entry.source.display(),
            target,
            entry.outcome.message
        ));
    }
    let succeeded = entries.iter().filter(|e| e.outcome.success).count();
    lines.push(format!("共 {} 個檔案，成功 {} 個，失敗 {} 個", entries.len(), succeeded, entries.len() - succeeded));
    lines.join("\n")
}
