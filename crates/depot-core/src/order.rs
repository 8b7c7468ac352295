//! 訂單模型

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{DepotError, Result};

/// 訂單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// 已受理
    Accepted,
    /// 裝車中
    Loading,
    /// 運送中
    InTransit,
    /// 卸貨中
    Unloading,
    /// 已入庫
    InWarehouse,
    /// 已完成（終態）
    Completed,
    /// 已取消（終態）
    Canceled,
    /// 退回（終態）
    Return,
}

impl OrderStatus {
    /// 顯示名稱
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Accepted => "已受理",
            OrderStatus::Loading => "裝車中",
            OrderStatus::InTransit => "運送中",
            OrderStatus::Unloading => "卸貨中",
            OrderStatus::InWarehouse => "已入庫",
            OrderStatus::Completed => "已完成",
            OrderStatus::Canceled => "已取消",
            OrderStatus::Return => "退回",
        }
    }

    /// 機器可讀代碼（儲存層與匯入匯出使用）
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Accepted => "accepted",
            OrderStatus::Loading => "loading",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Unloading => "unloading",
            OrderStatus::InWarehouse => "in_warehouse",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Return => "return",
        }
    }

    /// 從機器可讀代碼解析
    pub fn parse(code: &str) -> Result<Self> {
        match code {
            "accepted" => Ok(OrderStatus::Accepted),
            "loading" => Ok(OrderStatus::Loading),
            "in_transit" => Ok(OrderStatus::InTransit),
            "unloading" => Ok(OrderStatus::Unloading),
            "in_warehouse" => Ok(OrderStatus::InWarehouse),
            "completed" => Ok(OrderStatus::Completed),
            "canceled" => Ok(OrderStatus::Canceled),
            "return" => Ok(OrderStatus::Return),
            other => Err(DepotError::InvalidInput(format!("未知的訂單狀態: {other}"))),
        }
    }

    /// 檢查是否為在途狀態（裝車中／運送中／卸貨中）
    ///
    /// 路線在有任何在途訂單時不可關閉（設為 inactive 或 completed）。
    pub fn is_en_route(&self) -> bool {
        matches!(
            self,
            OrderStatus::Loading | OrderStatus::InTransit | OrderStatus::Unloading
        )
    }

    /// 檢查是否參與路線狀態級聯
    ///
    /// 已入庫／已完成／已取消／退回的訂單不受路線狀態變更影響。
    pub fn follows_route_cascade(&self) -> bool {
        matches!(
            self,
            OrderStatus::Accepted
                | OrderStatus::Loading
                | OrderStatus::InTransit
                | OrderStatus::Unloading
        )
    }

    /// 檢查是否為終態
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Completed | OrderStatus::Canceled | OrderStatus::Return
        )
    }
}

/// 訂單
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// 主鍵（由儲存層指派）
    pub id: i64,

    /// 訂單號：`<DDMMYY>-<當日 4 位數序列>`，首次儲存時生成一次，之後不變
    pub order_number: String,

    /// 訂單狀態
    pub status: OrderStatus,

    /// 寄件客戶
    pub sender_id: i64,

    /// 收件客戶
    pub receiver_id: i64,

    /// 所在貨架（狀態變為已完成時清空）
    pub shelf_id: Option<i64>,

    /// 所屬路線
    pub route_id: Option<i64>,

    /// 貨位數
    pub seat_count: u32,

    /// 價格
    pub price: Decimal,

    /// 已付金額
    pub paid_amount: Decimal,

    /// 是否無現金支付
    pub is_cashless: bool,

    /// 備註
    pub comment: Option<String>,

    /// 貨品照片（儲存前經過影像正規化）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<u8>>,

    /// QR 碼圖片（編碼 `"O" + order_number`）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<Vec<u8>>,

    /// 建立時間
    pub created_at: NaiveDateTime,

    /// 更新時間
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// 創建新的訂單草稿（訂單號由收件服務在首次儲存時生成）
    pub fn new(
        sender_id: i64,
        receiver_id: i64,
        seat_count: u32,
        price: Decimal,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            id: 0,
            order_number: String::new(),
            status: OrderStatus::Accepted,
            sender_id,
            receiver_id,
            shelf_id: None,
            route_id: None,
            seat_count,
            price,
            paid_amount: Decimal::ZERO,
            is_cashless: false,
            comment: None,
            photo: None,
            qr_code: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 建構器模式：設置所屬路線
    pub fn with_route(mut self, route_id: i64) -> Self {
        self.route_id = Some(route_id);
        self
    }

    /// 建構器模式：設置無現金支付
    pub fn with_cashless(mut self, is_cashless: bool) -> Self {
        self.is_cashless = is_cashless;
        self
    }

    /// 建構器模式：設置已付金額
    pub fn with_paid_amount(mut self, paid_amount: Decimal) -> Self {
        self.paid_amount = paid_amount;
        self
    }

    /// 建構器模式：設置備註
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// 建構器模式：附加照片（原始位元組，儲存時正規化）
    pub fn with_photo(mut self, photo: Vec<u8>) -> Self {
        self.photo = Some(photo);
        self
    }

    /// 驗證業務欄位
    ///
    /// 貨位數必須為正；金額不可為負且小數位不超過 2 位。
    pub fn validate(&self) -> Result<()> {
        if self.seat_count == 0 {
            return Err(DepotError::Validation("貨位數必須大於 0".to_string()));
        }
        validate_money("價格", self.price)?;
        validate_money("已付金額", self.paid_amount)?;
        Ok(())
    }
}

fn validate_money(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(DepotError::Validation(format!("{field}不可為負: {value}")));
    }
    if value.scale() > 2 {
        return Err(DepotError::Validation(format!(
            "{field}小數位不可超過 2 位: {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_create_order() {
        let order = Order::new(1, 2, 3, Decimal::new(15000, 2), now());
        assert_eq!(order.status, OrderStatus::Accepted);
        assert!(order.order_number.is_empty());
        assert_eq!(order.paid_amount, Decimal::ZERO);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_order_builder() {
        let order = Order::new(1, 2, 1, Decimal::from(500), now())
            .with_route(7)
            .with_cashless(true)
            .with_paid_amount(Decimal::from(200))
            .with_comment("易碎品");

        assert_eq!(order.route_id, Some(7));
        assert!(order.is_cashless);
        assert_eq!(order.paid_amount, Decimal::from(200));
        assert_eq!(order.comment.as_deref(), Some("易碎品"));
    }

    #[test]
    fn test_order_validation() {
        let zero_seats = Order::new(1, 2, 0, Decimal::from(100), now());
        assert!(zero_seats.validate().is_err());

        let negative_price = Order::new(1, 2, 1, Decimal::from(-1), now());
        assert!(negative_price.validate().is_err());

        // 小數位超過 2 位
        let bad_scale = Order::new(1, 2, 1, Decimal::new(10001, 3), now());
        assert!(bad_scale.validate().is_err());
    }

    #[test]
    fn test_status_predicates() {
        assert!(OrderStatus::Loading.is_en_route());
        assert!(OrderStatus::InTransit.is_en_route());
        assert!(OrderStatus::Unloading.is_en_route());
        assert!(!OrderStatus::Accepted.is_en_route());
        assert!(!OrderStatus::InWarehouse.is_en_route());

        assert!(OrderStatus::Accepted.follows_route_cascade());
        assert!(!OrderStatus::Completed.follows_route_cascade());
        assert!(!OrderStatus::InWarehouse.follows_route_cascade());

        assert!(OrderStatus::Return.is_terminal());
        assert!(!OrderStatus::Unloading.is_terminal());
    }

    #[test]
    fn test_status_roundtrip() {
        assert_eq!(
            OrderStatus::parse(OrderStatus::InWarehouse.as_str()).unwrap(),
            OrderStatus::InWarehouse
        );
        assert!(OrderStatus::parse("shipped").is_err());
    }
}
