use crate::models::conversion::{ConversionOutcome, ConversionRequest};
use crate::utils::cancel::CancelToken;

// Facade 接口，負責協調單一文件的轉換流程
pub trait ConversionFacadeTrait: Send + Sync {
    /// 執行單一文件轉換：解壓、找片段、轉換、重新打包
    /// # 參數
    /// - request: 已驗證的轉換請求
    /// - cancel: 取消旗標，於各階段之間檢查
    /// # 回傳
    /// - 轉換結果；所有預期內的失敗都編碼在結果中，不會以錯誤回傳
    fn execute_conversion(&self, request: &ConversionRequest, cancel: &CancelToken) -> ConversionOutcome;
}
