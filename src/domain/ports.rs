use crate::domain::model::AdapterResult;

/// 統一的系統介面，每個舊系統透過一個轉接器實作它
pub trait SystemAdapter: Send + Sync {
    /// 註冊表使用的系統名稱
    fn system_name(&self) -> &str;

    /// 只檢查請求形狀（必要欄位），格式錯誤時回傳 false 而非失敗
    fn validate_data(&self, data: &str) -> bool;

    /// 解析請求、呼叫一次後端操作並回傳結果訊息
    fn integrate_system(&self, data: &str) -> AdapterResult;
}
