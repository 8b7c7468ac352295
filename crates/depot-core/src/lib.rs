//! # Depot Core
//!
//! 物流倉儲後台核心資料模型與類型定義

pub mod client;
pub mod order;
pub mod truck;
pub mod warehouse;

// Re-export 主要類型
pub use client::{Client, PhoneNumber};
pub use order::{Order, OrderStatus};
pub use truck::{Route, RouteStatus, Truck};
pub use warehouse::{Area, Sector, Shelf, Surface, Warehouse};

/// 倉儲後台錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum DepotError {
    #[error("驗證錯誤: {0}")]
    Validation(String),

    #[error("找不到資料: {0}")]
    NotFound(String),

    #[error("無效的輸入: {0}")]
    InvalidInput(String),

    #[error("唯一值衝突: {0}")]
    Duplicate(String),

    #[error("媒體處理錯誤: {0}")]
    Processing(String),

    #[error("貨架代碼空間已用盡: {0}")]
    CodeSpaceExhausted(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, DepotError>;
