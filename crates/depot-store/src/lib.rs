//! # Depot Store
//!
//! 通用持久儲存層：自增主鍵資料表、唯一性約束、範圍查詢與級聯刪除。
//!
//! 單寫者模型：所有變更都經過 `&mut DepotStore`，讀取-檢查-寫入不會交錯。

pub mod store;
pub mod table;

// Re-export 主要類型
pub use store::DepotStore;
pub use table::{Keyed, Table};
