//! QR 代碼查詢入口

use depot_core::{DepotError, Result};
use depot_store::DepotStore;

/// QR 代碼解析結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrTarget {
    /// 訂單（`O` 前綴）
    Order(i64),
    /// 貨架（`W` 前綴）
    Shelf(i64),
}

/// 解析掃描到的代碼：`O…` 對應訂單，`W…` 對應貨架
pub fn resolve_code(store: &DepotStore, code: &str) -> Result<QrTarget> {
    let code = code.trim();

    if let Some(order_number) = code.strip_prefix('O') {
        let order = store
            .find_order_by_number(order_number)
            .ok_or_else(|| DepotError::NotFound(format!("訂單號 {order_number}")))?;
        return Ok(QrTarget::Order(order.id));
    }
    if let Some(shelf_code) = code.strip_prefix('W') {
        let shelf = store
            .find_shelf_by_code(shelf_code)
            .ok_or_else(|| DepotError::NotFound(format!("貨架代碼 {shelf_code}")))?;
        return Ok(QrTarget::Shelf(shelf.id));
    }

    Err(DepotError::InvalidInput(format!(
        "無法識別的 QR 代碼前綴: {code}"
    )))
}
