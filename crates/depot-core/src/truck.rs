//! 貨車與路線模型

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::order::OrderStatus;
use crate::{DepotError, Result};

/// 貨車
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    /// 主鍵（由儲存層指派）
    pub id: i64,

    /// 貨車名稱
    pub name: String,

    /// 車牌號（全域唯一）
    pub plate_number: String,
}

impl Truck {
    /// 創建新的貨車
    pub fn new(name: impl Into<String>, plate_number: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            plate_number: plate_number.into(),
        }
    }
}

/// 路線狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteStatus {
    /// 未啟用（初始，也可作取消回退）
    Inactive,
    /// 裝車中
    Loading,
    /// 行駛中
    OnWay,
    /// 卸貨中
    Unloading,
    /// 已完成（終態）
    Completed,
}

impl RouteStatus {
    /// 顯示名稱
    pub fn display_name(&self) -> &'static str {
        match self {
            RouteStatus::Inactive => "未啟用",
            RouteStatus::Loading => "裝車中",
            RouteStatus::OnWay => "行駛中",
            RouteStatus::Unloading => "卸貨中",
            RouteStatus::Completed => "已完成",
        }
    }

    /// 機器可讀代碼
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Inactive => "inactive",
            RouteStatus::Loading => "loading",
            RouteStatus::OnWay => "on_way",
            RouteStatus::Unloading => "unloading",
            RouteStatus::Completed => "completed",
        }
    }

    /// 從機器可讀代碼解析
    pub fn parse(code: &str) -> Result<Self> {
        match code {
            "inactive" => Ok(RouteStatus::Inactive),
            "loading" => Ok(RouteStatus::Loading),
            "on_way" => Ok(RouteStatus::OnWay),
            "unloading" => Ok(RouteStatus::Unloading),
            "completed" => Ok(RouteStatus::Completed),
            other => Err(DepotError::InvalidInput(format!("未知的路線狀態: {other}"))),
        }
    }

    /// 轉入此狀態前是否需要檢查在途訂單
    ///
    /// 路線有任何在途訂單時不可設為未啟用或已完成。
    pub fn requires_idle_orders(&self) -> bool {
        matches!(self, RouteStatus::Inactive | RouteStatus::Completed)
    }

    /// 此狀態級聯到訂單的目標狀態
    ///
    /// 裝車中 → 裝車中；行駛中 → 運送中；卸貨中 → 卸貨中。
    pub fn cascade_target(&self) -> Option<OrderStatus> {
        match self {
            RouteStatus::Loading => Some(OrderStatus::Loading),
            RouteStatus::OnWay => Some(OrderStatus::InTransit),
            RouteStatus::Unloading => Some(OrderStatus::Unloading),
            RouteStatus::Inactive | RouteStatus::Completed => None,
        }
    }
}

/// 路線（一輛貨車的一趟行程，聚合多筆訂單）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// 主鍵（由儲存層指派）
    pub id: i64,

    /// 所屬貨車
    pub truck_id: i64,

    /// 路線狀態
    pub status: RouteStatus,

    /// 唯一編號：`<DDMMYY>-<車牌號>-<當日 2 位數序列>`，首次儲存時生成一次
    pub unique_number: String,

    /// 建立時間
    pub created_at: NaiveDateTime,

    /// 更新時間
    pub updated_at: NaiveDateTime,
}

impl Route {
    /// 創建新的路線（唯一編號由路線服務在首次儲存時生成）
    pub fn new(truck_id: i64, now: NaiveDateTime) -> Self {
        Self {
            id: 0,
            truck_id,
            status: RouteStatus::Inactive,
            unique_number: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascade_target_map() {
        assert_eq!(
            RouteStatus::Loading.cascade_target(),
            Some(OrderStatus::Loading)
        );
        assert_eq!(
            RouteStatus::OnWay.cascade_target(),
            Some(OrderStatus::InTransit)
        );
        assert_eq!(
            RouteStatus::Unloading.cascade_target(),
            Some(OrderStatus::Unloading)
        );
        assert_eq!(RouteStatus::Inactive.cascade_target(), None);
        assert_eq!(RouteStatus::Completed.cascade_target(), None);
    }

    #[test]
    fn test_requires_idle_orders() {
        assert!(RouteStatus::Inactive.requires_idle_orders());
        assert!(RouteStatus::Completed.requires_idle_orders());
        assert!(!RouteStatus::Loading.requires_idle_orders());
        assert!(!RouteStatus::OnWay.requires_idle_orders());
    }

    #[test]
    fn test_route_status_roundtrip() {
        assert_eq!(
            RouteStatus::parse(RouteStatus::OnWay.as_str()).unwrap(),
            RouteStatus::OnWay
        );
        assert!(RouteStatus::parse("paused").is_err());
    }

    #[test]
    fn test_new_route_is_inactive() {
        let now = chrono::NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let route = Route::new(1, now);
        assert_eq!(route.status, RouteStatus::Inactive);
        assert!(route.unique_number.is_empty());
    }
}
