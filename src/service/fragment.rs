use std::io;
use std::path::Path;
use log::{debug, error, warn};
use regex::Regex;
use crate::error::ConvertError;
use crate::models::format::SupportedFormat;
use crate::models::fragment::FragmentSet;
use crate::service::font_mask::{mask, unmask};
use crate::service::traits::i_service::TextConverter;
use crate::utils::cancel::CancelToken;
use crate::utils::file::{read_utf8_text, write_utf8_text};

/// 對單一片段套用文字轉換，需要時先遮蔽字型名稱
pub struct FragmentTransformer<'a> {
    converter: &'a dyn TextConverter,
    config: &'a str,
    punctuation: bool,
    font_pattern: Option<&'a Regex>,
}

impl<'a> FragmentTransformer<'a> {
    pub fn new(converter: &'a dyn TextConverter, config: &'a str, punctuation: bool) -> Self {
        FragmentTransformer {
            converter,
            config,
            punctuation,
            font_pattern: None,
        }
    }

    /// 設定後每個片段都會先遮蔽符合樣式的字型名稱
    pub fn with_font_pattern(mut self, pattern: Option<&'a Regex>) -> Self {
        self.font_pattern = pattern;
        self
    }

    /// 轉換文字本身，每次呼叫轉換服務恰好一次
    pub fn transform_text(&self, xml: &str) -> String {
        match self.font_pattern {
            Some(pattern) => {
                let (masked, fonts) = mask(xml, pattern);
                let converted = self.converter.convert(&masked, self.config, self.punctuation);
                unmask(&converted, &fonts)
            }
            None => self.converter.convert(xml, self.config, self.punctuation),
        }
    }

    /// 就地改寫檔案；檔案不存在時回傳 `Ok(false)`
    pub fn transform_fragment(&self, path: &Path) -> io::Result<bool> {
        let Some(xml) = Self::read_fragment(path)? else {
            return Ok(false);
        };
        self.write_fragment(path, &xml)?;
        Ok(true)
    }

    fn read_fragment(path: &Path) -> io::Result<Option<String>> {
        if !path.is_file() {
            debug!("片段不存在，略過：{}", path.display());
            return Ok(None);
        }
        read_utf8_text(path).map(Some)
    }

    fn write_fragment(&self, path: &Path, xml: &str) -> io::Result<()> {
        let converted = self.transform_text(xml);
        write_utf8_text(path, &converted)?;
        debug!("已轉換片段：{}（{} 位元組）", path.display(), converted.len());
        Ok(())
    }

    /// 依序轉換所有片段並回傳實際轉換的數量。
    ///
    /// 讀取失敗的片段只記錄警告並保留原檔；寫回失敗則整個請求失敗。
    /// 全部都沒轉換時回傳 `NoConvertibleFragments`。
    pub fn transform_all(
        &self,
        format: SupportedFormat,
        working_dir: &Path,
        fragments: &FragmentSet,
        cancel: &CancelToken,
    ) -> Result<usize, ConvertError> {
        let mut converted = 0;
        for relative in fragments {
            if cancel.is_cancelled() {
                return Err(ConvertError::Cancelled);
            }
            let path = working_dir.join(relative);
            let xml = match Self::read_fragment(&path) {
                Ok(Some(xml)) => xml,
                Ok(None) => continue,
                Err(e) => {
                    warn!("讀取片段 {} 失敗，保留原內容: {}", relative.display(), e);
                    continue;
                }
            };
            self.write_fragment(&path, &xml).map_err(|e| {
                error!("寫回片段 {} 失敗: {}", relative.display(), e);
                ConvertError::Io(e)
            })?;
            converted += 1;
        }
        if converted == 0 {
            return Err(ConvertError::NoConvertibleFragments {
                format: format.to_string(),
                found: fragments.len(),
            });
        }
        Ok(converted)
    }
}
