//! 媒體後處理契約（外部協作者）
//!
//! 影像正規化與 QR 碼繪製由外部服務實作；核心只負責組裝載荷與說明文字，
//! 並將回傳的位元組存入實體欄位。失敗以 `Processing` 錯誤同步回報，不重試。

use depot_core::Result;

/// 影像最佳化：解碼 → 標準色彩模型 → 等比縮放至邊界框 → 固定品質重新編碼
pub trait ImageOptimizer {
    fn optimize_image(&self, raw: &[u8]) -> Result<Vec<u8>>;
}

/// QR 碼繪製：編碼載荷字串並在圖旁排版說明文字
pub trait QrCodeRenderer {
    fn generate_qr_code(&self, data: &str, caption_lines: &[String]) -> Result<Vec<u8>>;
}

/// 訂單 QR 載荷：`"O" + 訂單號`
pub fn order_qr_payload(order_number: &str) -> String {
    format!("O{order_number}")
}

/// 貨架 QR 載荷：`"W" + 貨架代碼`
pub fn shelf_qr_payload(shelf_code: &str) -> String {
    format!("W{shelf_code}")
}

/// 直通媒體實作（測試與示例用）
///
/// 影像原樣返回；QR 碼以確定性文字位元組代替圖片。
pub struct PassthroughMedia;

impl ImageOptimizer for PassthroughMedia {
    fn optimize_image(&self, raw: &[u8]) -> Result<Vec<u8>> {
        Ok(raw.to_vec())
    }
}

impl QrCodeRenderer for PassthroughMedia {
    fn generate_qr_code(&self, data: &str, caption_lines: &[String]) -> Result<Vec<u8>> {
        Ok(format!("QR|{}|{}", data, caption_lines.join("|")).into_bytes())
    }
}
