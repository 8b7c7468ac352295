//! 唯一代碼生成
//!
//! 單寫者模型下的讀取-檢查-寫入生成：同一父範圍內的代碼嚴格遞增。
//! 當日序列取自同日列自身的序列分量最大值 + 1，新的一天相對當日既有列重置。

use chrono::NaiveDate;
use depot_core::{Area, DepotError, Result, Surface, Warehouse};
use depot_store::DepotStore;

/// 唯一代碼生成器
pub struct CodeGenerator;

impl CodeGenerator {
    /// 下一個倉庫代碼：全域 2 位數序列
    pub fn next_warehouse_code(store: &DepotStore) -> String {
        let max_seq = store
            .warehouses()
            .filter_map(|w| w.unique_id.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("{:02}", max_seq + 1)
    }

    /// 下一個區域代碼：`<倉庫代碼><倉庫內 2 位數序列>`
    pub fn next_area_code(store: &DepotStore, warehouse: &Warehouse) -> String {
        let max_seq = store
            .areas_of_warehouse(warehouse.id)
            .iter()
            .filter_map(|a| {
                a.unique_id
                    .strip_prefix(warehouse.unique_id.as_str())
                    .and_then(|seq| seq.parse::<u32>().ok())
            })
            .max()
            .unwrap_or(0);
        format!("{}{:02}", warehouse.unique_id, max_seq + 1)
    }

    /// 下一個分區代碼：`<倉庫代碼><區域代碼>-S<區域內 2 位數序列>`
    pub fn next_sector_code(store: &DepotStore, area: &Area) -> Result<String> {
        let warehouse = store.warehouse(area.warehouse_id)?;
        let max_seq = store
            .sectors_of_area(area.id)
            .iter()
            .filter_map(|s| {
                s.unique_id
                    .rsplit_once("-S")
                    .and_then(|(_, seq)| seq.parse::<u32>().ok())
            })
            .max()
            .unwrap_or(0);
        Ok(format!(
            "{}{}-S{:02}",
            warehouse.unique_id,
            area.unique_id,
            max_seq + 1
        ))
    }

    /// 下一個貨架代碼
    ///
    /// 基底 = 倉庫、區域、分區代碼的尾兩碼 + 面位字母；碰撞時附加 2 位數後綴
    /// 重試，查詢對象是全部貨架代碼空間而非兄弟節點。後綴空間（01-99）用盡
    /// 時返回錯誤。
    pub fn next_shelf_code(store: &DepotStore, sector_id: i64, surface: Surface) -> Result<String> {
        let sector = store.sector(sector_id)?;
        let area = store.area(sector.area_id)?;
        let warehouse = store.warehouse(area.warehouse_id)?;

        let base: String = [
            last_two(&warehouse.unique_id),
            last_two(&area.unique_id),
            last_two(&sector.unique_id),
        ]
        .concat();
        let base = format!("{}{}", base, surface.code_letter());

        if !store.shelf_code_exists(&base) {
            return Ok(base);
        }
        for counter in 1..=99u32 {
            let candidate = format!("{}{:02}", base, counter);
            if !store.shelf_code_exists(&candidate) {
                return Ok(candidate);
            }
        }
        Err(DepotError::CodeSpaceExhausted(base))
    }

    /// 下一個訂單號：`<DDMMYY>-<當日 4 位數序列>`
    pub fn next_order_number(store: &DepotStore, day: NaiveDate) -> String {
        let max_seq = store
            .orders_created_on(day)
            .iter()
            .filter_map(|o| trailing_sequence(&o.order_number))
            .max()
            .unwrap_or(0);
        format!("{}-{:04}", day.format("%d%m%y"), max_seq + 1)
    }

    /// 下一個路線編號：`<DDMMYY>-<車牌號>-<當日 2 位數序列>`
    pub fn next_route_number(store: &DepotStore, day: NaiveDate, plate_number: &str) -> String {
        let max_seq = store
            .routes_created_on(day)
            .iter()
            .filter_map(|r| trailing_sequence(&r.unique_number))
            .max()
            .unwrap_or(0);
        format!("{}-{}-{:02}", day.format("%d%m%y"), plate_number, max_seq + 1)
    }
}

/// 取代碼最後一個 '-' 之後的序列分量（殼列的空編號直接略過）
fn trailing_sequence(code: &str) -> Option<u32> {
    code.rsplit_once('-')
        .and_then(|(_, seq)| seq.parse::<u32>().ok())
}

/// 代碼尾兩碼（生成的代碼皆為 ASCII）
fn last_two(code: &str) -> &str {
    &code[code.len().saturating_sub(2)..]
}
