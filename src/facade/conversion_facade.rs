use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use log::{error, info, warn};
use crate::error::{ConvertError, PackError};
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionOptions, ConversionOutcome, ConversionRequest};
use crate::service::archive::{extract, repackage};
use crate::service::fragment::FragmentTransformer;
use crate::service::locator::locate;
use crate::service::traits::i_service::TextConverter;
use crate::service::workdir::WorkingDir;
use crate::utils::cancel::{CancelOnDrop, CancelToken};

/// 單一文件的轉換流程：解壓 → 找片段 → 遮蔽字型並轉換 → 重新打包
pub struct ConversionFacade {
    converter: Arc<dyn TextConverter>,
    temp_root: PathBuf,
}

impl ConversionFacade {
    pub fn new(converter: Arc<dyn TextConverter>) -> Self {
        ConversionFacade {
            converter,
            temp_root: std::env::temp_dir(),
        }
    }

    /// 工作目錄改建在 `temp_root` 之下
    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = temp_root.into();
        self
    }

    /// 由未驗證的參數建立請求並執行；格式或來源檔無效時直接回傳失敗結果
    pub fn convert_document(
        &self,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        format: &str,
        options: ConversionOptions,
    ) -> ConversionOutcome {
        match ConversionRequest::new(source, destination, format, options) {
            Ok(request) => self.execute_conversion(&request, &CancelToken::new()),
            Err(e) => {
                warn!("轉換請求無效: {}", e);
                ConversionOutcome::failed(e)
            }
        }
    }

    /// 在阻塞執行緒池中執行轉換；future 被丟棄時會觸發取消，工作目錄仍會被清除
    pub async fn execute_async(
        self: Arc<Self>,
        request: ConversionRequest,
        cancel: CancelToken,
    ) -> ConversionOutcome {
        let guard = CancelOnDrop::new(cancel.clone());
        let result = tokio::task::spawn_blocking(move || self.execute_conversion(&request, &cancel)).await;
        guard.disarm();
        match result {
            Ok(outcome) => outcome,
            Err(e) => ConversionOutcome::failed(ConvertError::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("轉換工作中斷: {}", e),
            ))),
        }
    }

    fn run_pipeline(&self, request: &ConversionRequest, cancel: &CancelToken) -> Result<usize, PipelineFailure> {
        let format = request.format();
        let options = request.options();
        check_cancelled(cancel)?;

        let working_dir = WorkingDir::create(&self.temp_root, format).map_err(ConvertError::Io)?;
        extract(request.source(), working_dir.path()).map_err(ConvertError::from)?;
        check_cancelled(cancel)?;

        let fragments = locate(format, working_dir.path());
        if fragments.is_empty() {
            return Err(ConvertError::NoFragments { format: format.to_string() }.into());
        }
        info!("{} 文件共有 {} 個待轉換片段", format, fragments.len());

        let font_pattern = if options.keep_font { format.font_pattern() } else { None };
        let transformer = FragmentTransformer::new(self.converter.as_ref(), &options.config, options.punctuation)
            .with_font_pattern(font_pattern);
        let converted = transformer.transform_all(format, working_dir.path(), &fragments, cancel)?;

        if cancel.is_cancelled() {
            return Err(PipelineFailure::after(ConvertError::Cancelled, converted));
        }
        repackage(working_dir.path(), format, request.destination(), cancel).map_err(|e| {
            let error = match e {
                PackError::Cancelled => ConvertError::Cancelled,
                other => ConvertError::Pack(other),
            };
            PipelineFailure::after(error, converted)
        })?;
        Ok(converted)
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, request: &ConversionRequest, cancel: &CancelToken) -> ConversionOutcome {
        let format = request.format();
        info!(
            "開始轉換 {} 文件：{} -> {}，設定：{}，標點：{}，保留字型：{}",
            format,
            request.source().display(),
            request.destination().display(),
            request.options().config,
            request.options().punctuation,
            request.options().keep_font
        );
        match self.run_pipeline(request, cancel) {
            Ok(converted) => {
                info!("轉換完成：{}，共 {} 個片段", display_name(request.destination()), converted);
                ConversionOutcome::succeeded(
                    format!("成功轉換 {} 文件中的 {} 個片段", format, converted),
                    converted,
                )
            }
            Err(failure) => {
                error!("轉換 {} 失敗: {}", request.source().display(), failure.error);
                ConversionOutcome::failed_after(failure.error, failure.fragments_converted)
            }
        }
    }
}

struct PipelineFailure {
    error: ConvertError,
    fragments_converted: usize,
}

impl PipelineFailure {
    fn after(error: ConvertError, fragments_converted: usize) -> Self {
        PipelineFailure { error, fragments_converted }
    }
}

impl From<ConvertError> for PipelineFailure {
    fn from(error: ConvertError) -> Self {
        PipelineFailure::after(error, 0)
    }
}

fn check_cancelled(cancel: &CancelToken) -> Result<(), ConvertError> {
    if cancel.is_cancelled() {
        return Err(ConvertError::Cancelled);
    }
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
