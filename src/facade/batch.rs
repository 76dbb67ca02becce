use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use log::{info, warn};
use rayon::prelude::*;
use crate::config::ports::{AppConfig, ConversionPort};
use crate::config::settings::Settings;
use crate::error::ConvertError;
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{BatchEntry, ConversionOptions, ConversionOutcome, ConversionRequest};
use crate::models::format::SupportedFormat;
use crate::service::converter::DictionaryConverter;
use crate::service::traits::i_service::TextConverter;
use crate::utils::cancel::CancelToken;
use crate::utils::file::{collect_input_files, read_utf8_text, write_utf8_text, InputFile};
use crate::utils::utils::create_progress_bar;

/// 批次轉換多個輸入；每個輸入各自回報結果，單一失敗不會中止整批
pub struct BatchConverter {
    facade: ConversionFacade,
    converter: Arc<dyn TextConverter>,
    settings: Settings,
    options: ConversionOptions,
    output_dir: PathBuf,
    jobs: Option<usize>,
    no_progress: bool,
}

impl BatchConverter {
    pub fn new(
        converter: Arc<dyn TextConverter>,
        settings: Settings,
        options: ConversionOptions,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        BatchConverter {
            facade: ConversionFacade::new(Arc::clone(&converter)),
            converter,
            settings,
            options,
            output_dir: output_dir.into(),
            jobs: None,
            no_progress: true,
        }
    }

    /// 同時處理的文件數上限，`None` 表示交給 rayon 決定
    pub fn with_jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs.filter(|&n| n > 0);
        self
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.no_progress = !show;
        self
    }

    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.facade = self.facade.with_temp_root(temp_root);
        self
    }

    /// 輸出檔名為 `<主檔名>_<設定>.<副檔名>`，並保留輸入的子目錄結構
    pub fn output_path(&self, relative: &Path) -> PathBuf {
        let stem = relative
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        let name = match relative.extension() {
            Some(ext) => format!("{}_{}.{}", stem, self.options.config, ext.to_string_lossy()),
            None => format!("{}_{}", stem, self.options.config),
        };
        match relative.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => self.output_dir.join(parent).join(name),
            None => self.output_dir.join(name),
        }
    }

    /// 在平行轉換前決定所有輸出路徑；重複時依序加上 `_1`、`_2`…
    fn plan_destinations(&self, files: &[InputFile]) -> Vec<PathBuf> {
        let mut claimed = HashSet::new();
        files
            .iter()
            .map(|file| {
                let base = self.output_path(&file.relative);
                let mut candidate = base.clone();
                let mut n = 0;
                while !claimed.insert(candidate.clone()) {
                    n += 1;
                    candidate = with_numeric_suffix(&base, n);
                }
                if n > 0 {
                    warn!("輸出路徑重複，{} 改為輸出到 {}", file.path.display(), candidate.display());
                }
                candidate
            })
            .collect()
    }

    pub fn convert_all(&self, inputs: &[PathBuf], cancel: &CancelToken) -> io::Result<Vec<BatchEntry>> {
        let files = collect_input_files(inputs)?;
        fs::create_dir_all(&self.output_dir)?;
        info!("批次轉換 {} 個檔案，輸出目錄：{}", files.len(), self.output_dir.display());

        let pool = {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(jobs) = self.jobs {
                builder = builder.num_threads(jobs);
            }
            builder
                .build()
                .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("建立執行緒池失敗: {}", e)))?
        };

        let destinations = self.plan_destinations(&files);
        let pm = create_progress_bar(files.len() as u64, self.no_progress);
        let done = AtomicU64::new(0);
        let entries: Vec<BatchEntry> = pool.install(|| {
            files
                .par_iter()
                .zip(destinations.par_iter())
                .map(|(file, destination)| {
                    let entry = self.convert_one(&file.path, destination, cancel);
                    let count = done.fetch_add(1, Ordering::SeqCst) + 1;
                    pm.update(count, &file.path.display().to_string());
                    entry
                })
                .collect()
        });

        let succeeded = entries.iter().filter(|e| e.outcome.success).count();
        pm.finish(succeeded, entries.len() - succeeded);
        info!("批次轉換結束：成功 {} 個，失敗 {} 個", succeeded, entries.len() - succeeded);
        Ok(entries)
    }

    fn convert_one(&self, source: &Path, destination: &Path, cancel: &CancelToken) -> BatchEntry {
        if cancel.is_cancelled() {
            return BatchEntry {
                source: source.to_path_buf(),
                destination: None,
                outcome: ConversionOutcome::failed(ConvertError::Cancelled),
            };
        }

        let outcome = match SupportedFormat::from_path(source) {
            Some(format) if self.settings.is_office_file(source) => {
                match ConversionRequest::with_format(source, destination, format, self.options.clone()) {
                    Ok(request) => self.facade.execute_conversion(&request, cancel),
                    Err(e) => ConversionOutcome::failed(e),
                }
            }
            _ if self.settings.is_text_file(source) => self.convert_text_file(source, destination),
            _ => {
                warn!("略過不支援的檔案：{}", source.display());
                return BatchEntry {
                    source: source.to_path_buf(),
                    destination: None,
                    outcome: ConversionOutcome::failed(ConvertError::Skipped(source.to_path_buf())),
                };
            }
        };
        BatchEntry {
            source: source.to_path_buf(),
            destination: Some(destination.to_path_buf()),
            outcome,
        }
    }

    /// 純文字檔整檔轉換，視為單一片段
    fn convert_text_file(&self, source: &Path, destination: &Path) -> ConversionOutcome {
        let result = read_utf8_text(source).and_then(|text| {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            let converted = self.converter.convert(&text, &self.options.config, self.options.punctuation);
            write_utf8_text(destination, &converted)
        });
        match result {
            Ok(()) => {
                info!("文字檔轉換完成：{} -> {}", source.display(), destination.display());
                ConversionOutcome::succeeded(format!("成功轉換文字檔 {}", source.display()), 1)
            }
            Err(e) => {
                warn!("文字檔轉換失敗 {}: {}", source.display(), e);
                ConversionOutcome::failed(ConvertError::Io(e))
            }
        }
    }
}

fn with_numeric_suffix(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_{}.{}", stem, n, ext.to_string_lossy()),
        None => format!("{}_{}", stem, n),
    };
    path.with_file_name(name)
}

/// 由 `AppConfig` 組出詞典轉換器與批次轉換器並執行
pub struct BatchConversionAdapter;

impl ConversionPort for BatchConversionAdapter {
    fn execute(&self, config: AppConfig) -> io::Result<Vec<BatchEntry>> {
        let settings = Settings::load_or_init(Path::new(&config.settings_path))?;
        let mut converter = DictionaryConverter::new(&settings);
        for dict in &config.dictionaries {
            converter.load_dictionary(&config.config, Path::new(dict))?;
        }

        let options = ConversionOptions::new(config.config.clone())
            .with_punctuation(config.punctuation)
            .with_keep_font(config.keep_font);
        let inputs: Vec<PathBuf> = config.inputs.iter().map(PathBuf::from).collect();
        let batch = BatchConverter::new(Arc::new(converter), settings, options, &config.output)
            .with_jobs(config.jobs)
            .with_progress(!config.no_progress);
        batch.convert_all(&inputs, &CancelToken::new())
    }
}
