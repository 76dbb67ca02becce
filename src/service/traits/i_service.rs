// 文字轉換服務接口，實際的轉換規則由外部提供
pub trait TextConverter: Send + Sync {
    /// 轉換整段文字
    /// # 參數
    /// - text: 要轉換的文字，可能是完整的 XML 片段
    /// - config: 轉換設定名稱，例如 `s2t`
    /// - punctuation: 是否一併轉換標點
    /// # 回傳
    /// - 轉換後的文字；相同輸入必須得到相同輸出，且不可改動無法辨識的 ASCII 標記
    fn convert(&self, text: &str, config: &str, punctuation: bool) -> String;
}
