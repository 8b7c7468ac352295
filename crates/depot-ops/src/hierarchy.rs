//! 倉庫層級建立服務

use depot_core::{Area, Result, Sector, Shelf, Surface, Warehouse};
use depot_store::DepotStore;

use crate::codegen::CodeGenerator;
use crate::media::{shelf_qr_payload, QrCodeRenderer};

/// 倉庫層級服務：建立時指派唯一代碼，貨架另生成 QR 碼
pub struct WarehouseService;

impl WarehouseService {
    /// 建立倉庫
    pub fn create_warehouse(
        store: &mut DepotStore,
        name: &str,
        location: Option<&str>,
    ) -> Result<i64> {
        let mut warehouse = Warehouse::new(name);
        if let Some(location) = location {
            warehouse = warehouse.with_location(location);
        }
        warehouse.unique_id = CodeGenerator::next_warehouse_code(store);

        tracing::info!("建立倉庫 {}，代碼 {}", name, warehouse.unique_id);
        store.insert_warehouse(warehouse)
    }

    /// 建立區域
    pub fn create_area(store: &mut DepotStore, warehouse_id: i64, name: &str) -> Result<i64> {
        let warehouse = store.warehouse(warehouse_id)?.clone();
        let mut area = Area::new(warehouse_id, name);
        area.unique_id = CodeGenerator::next_area_code(store, &warehouse);

        tracing::info!("建立區域 {}，代碼 {}", name, area.unique_id);
        store.insert_area(area)
    }

    /// 建立分區
    pub fn create_sector(store: &mut DepotStore, area_id: i64, name: &str) -> Result<i64> {
        let area = store.area(area_id)?.clone();
        let mut sector = Sector::new(area_id, name);
        sector.unique_id = CodeGenerator::next_sector_code(store, &area)?;

        tracing::info!("建立分區 {}，代碼 {}", name, sector.unique_id);
        store.insert_sector(sector)
    }

    /// 建立貨架：生成碰撞安全的代碼與 QR 碼（載荷 `"W" + 代碼`，
    /// 說明文字為倉庫／區域／分區名稱）
    pub fn create_shelf(
        store: &mut DepotStore,
        sector_id: i64,
        name: &str,
        surface: Surface,
        renderer: &dyn QrCodeRenderer,
    ) -> Result<i64> {
        let code = CodeGenerator::next_shelf_code(store, sector_id, surface)?;

        let sector = store.sector(sector_id)?;
        let area = store.area(sector.area_id)?;
        let warehouse = store.warehouse(area.warehouse_id)?;
        let captions = vec![
            warehouse.name.clone(),
            area.name.clone(),
            sector.name.clone(),
        ];

        let qr_code = renderer.generate_qr_code(&shelf_qr_payload(&code), &captions)?;

        let mut shelf = Shelf::new(sector_id, name, surface);
        shelf.unique_id = code;
        shelf.qr_code = Some(qr_code);

        tracing::info!("建立貨架 {}，代碼 {}", name, shelf.unique_id);
        store.insert_shelf(shelf)
    }
}
