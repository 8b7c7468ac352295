//! # Depot Ops
//!
//! 倉儲後台作業層：代碼生成、訂單收件、路線轉換、貨架指派、
//! 媒體後處理契約、QR 查詢與匯出。

pub mod codegen;
pub mod export;
pub mod forms;
pub mod hierarchy;
pub mod intake;
pub mod lookup;
pub mod media;
pub mod route;
pub mod shelf_assignment;

// Re-export 主要類型
pub use codegen::CodeGenerator;
pub use export::{OrderExportRow, OrderExporter};
pub use hierarchy::WarehouseService;
pub use intake::OrderIntakeService;
pub use lookup::{resolve_code, QrTarget};
pub use media::{ImageOptimizer, PassthroughMedia, QrCodeRenderer};
pub use route::{RouteService, RouteTransition};
pub use shelf_assignment::ShelfAssignmentService;
