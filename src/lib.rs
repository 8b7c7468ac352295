//! # Depot
//!
//! 貨運倉儲後台核心的統一入口，重新匯出各子 crate：
//!
//! - [`depot_core`]：領域模型、狀態機與錯誤類型
//! - [`depot_store`]：單寫入者的記憶體資料層
//! - [`depot_ops`]：代碼生成、訂單收件、路線轉換、貨架指派與匯出

pub use depot_core::{
    Area, Client, DepotError, Order, OrderStatus, PhoneNumber, Result, Route, RouteStatus, Sector,
    Shelf, Surface, Truck, Warehouse,
};
pub use depot_ops::{
    resolve_code, CodeGenerator, ImageOptimizer, OrderExportRow, OrderExporter, OrderIntakeService,
    PassthroughMedia, QrCodeRenderer, QrTarget, RouteService, RouteTransition,
    ShelfAssignmentService, WarehouseService,
};
pub use depot_store::DepotStore;
