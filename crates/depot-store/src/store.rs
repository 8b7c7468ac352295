//! 倉儲後台持久儲存

use chrono::NaiveDate;
use depot_core::{
    Area, Client, DepotError, Order, PhoneNumber, Result, Route, Sector, Shelf, Truck, Warehouse,
};

use crate::table::Table;

/// 持久儲存：鏡像關聯式結構的九張資料表
///
/// 唯一性約束：訂單號、路線編號、層級代碼、車牌號、電話號碼。
/// 派生欄位（訂單號、路線編號）經由兩段式儲存：先插入殼列取得主鍵，
/// 再以 `finalize_*` 寫入生成欄位。
#[derive(Debug, Clone, Default)]
pub struct DepotStore {
    clients: Table<Client>,
    phone_numbers: Table<PhoneNumber>,
    warehouses: Table<Warehouse>,
    areas: Table<Area>,
    sectors: Table<Sector>,
    shelves: Table<Shelf>,
    trucks: Table<Truck>,
    routes: Table<Route>,
    orders: Table<Order>,
}

impl DepotStore {
    /// 創建空的儲存
    pub fn new() -> Self {
        Self::default()
    }

    // ---- 客戶 ----

    /// 插入客戶
    pub fn insert_client(&mut self, client: Client) -> i64 {
        self.clients.insert(client)
    }

    /// 依主鍵取得客戶
    pub fn client(&self, id: i64) -> Result<&Client> {
        self.clients
            .get(id)
            .ok_or_else(|| DepotError::NotFound(format!("客戶 id={id}")))
    }

    /// 為客戶新增電話號碼（先正規化，再檢查全域唯一）
    pub fn add_phone_number(&mut self, client_id: i64, raw: &str) -> Result<i64> {
        self.client(client_id)?;
        let phone = PhoneNumber::new(client_id, raw)?;

        if self.phone_numbers.iter().any(|p| p.number == phone.number) {
            return Err(DepotError::Duplicate(format!("電話號碼 {}", phone.number)));
        }

        Ok(self.phone_numbers.insert(phone))
    }

    /// 客戶的電話號碼（登錄順序）
    pub fn phones_of_client(&self, client_id: i64) -> Vec<&PhoneNumber> {
        self.phone_numbers
            .iter()
            .filter(|p| p.client_id == client_id)
            .collect()
    }

    /// 客戶的第一支電話號碼
    pub fn first_phone_of_client(&self, client_id: i64) -> Option<&str> {
        self.phone_numbers
            .iter()
            .find(|p| p.client_id == client_id)
            .map(|p| p.number.as_str())
    }

    /// 刪除客戶，級聯刪除其電話號碼與收寄訂單
    pub fn delete_client(&mut self, client_id: i64) -> Result<()> {
        self.client(client_id)?;

        let phone_ids: Vec<i64> = self
            .phone_numbers
            .iter()
            .filter(|p| p.client_id == client_id)
            .map(|p| p.id)
            .collect();
        for id in phone_ids {
            self.phone_numbers.remove(id);
        }

        let order_ids: Vec<i64> = self
            .orders
            .iter()
            .filter(|o| o.sender_id == client_id || o.receiver_id == client_id)
            .map(|o| o.id)
            .collect();
        for id in order_ids {
            self.orders.remove(id);
        }

        self.clients.remove(client_id);
        Ok(())
    }

    // ---- 倉庫層級 ----

    /// 插入倉庫（代碼必須已指派且唯一）
    pub fn insert_warehouse(&mut self, warehouse: Warehouse) -> Result<i64> {
        check_code(
            &warehouse.unique_id,
            self.warehouses.iter().map(|w| w.unique_id.as_str()),
        )?;
        Ok(self.warehouses.insert(warehouse))
    }

    /// 依主鍵取得倉庫
    pub fn warehouse(&self, id: i64) -> Result<&Warehouse> {
        self.warehouses
            .get(id)
            .ok_or_else(|| DepotError::NotFound(format!("倉庫 id={id}")))
    }

    /// 所有倉庫（主鍵順序）
    pub fn warehouses(&self) -> impl Iterator<Item = &Warehouse> {
        self.warehouses.iter()
    }

    /// 插入區域
    pub fn insert_area(&mut self, area: Area) -> Result<i64> {
        self.warehouse(area.warehouse_id)?;
        check_code(
            &area.unique_id,
            self.areas.iter().map(|a| a.unique_id.as_str()),
        )?;
        Ok(self.areas.insert(area))
    }

    /// 依主鍵取得區域
    pub fn area(&self, id: i64) -> Result<&Area> {
        self.areas
            .get(id)
            .ok_or_else(|| DepotError::NotFound(format!("區域 id={id}")))
    }

    /// 倉庫下的區域
    pub fn areas_of_warehouse(&self, warehouse_id: i64) -> Vec<&Area> {
        self.areas
            .iter()
            .filter(|a| a.warehouse_id == warehouse_id)
            .collect()
    }

    /// 插入分區
    pub fn insert_sector(&mut self, sector: Sector) -> Result<i64> {
        self.area(sector.area_id)?;
        check_code(
            &sector.unique_id,
            self.sectors.iter().map(|s| s.unique_id.as_str()),
        )?;
        Ok(self.sectors.insert(sector))
    }

    /// 依主鍵取得分區
    pub fn sector(&self, id: i64) -> Result<&Sector> {
        self.sectors
            .get(id)
            .ok_or_else(|| DepotError::NotFound(format!("分區 id={id}")))
    }

    /// 區域下的分區
    pub fn sectors_of_area(&self, area_id: i64) -> Vec<&Sector> {
        self.sectors
            .iter()
            .filter(|s| s.area_id == area_id)
            .collect()
    }

    /// 插入貨架
    pub fn insert_shelf(&mut self, shelf: Shelf) -> Result<i64> {
        self.sector(shelf.sector_id)?;
        check_code(
            &shelf.unique_id,
            self.shelves.iter().map(|s| s.unique_id.as_str()),
        )?;
        Ok(self.shelves.insert(shelf))
    }

    /// 依主鍵取得貨架
    pub fn shelf(&self, id: i64) -> Result<&Shelf> {
        self.shelves
            .get(id)
            .ok_or_else(|| DepotError::NotFound(format!("貨架 id={id}")))
    }

    /// 檢查貨架代碼是否已存在（碰撞重試迴圈查詢的是全部貨架代碼空間）
    pub fn shelf_code_exists(&self, code: &str) -> bool {
        self.shelves.iter().any(|s| s.unique_id == code)
    }

    /// 依唯一代碼尋找貨架
    pub fn find_shelf_by_code(&self, code: &str) -> Option<&Shelf> {
        self.shelves.iter().find(|s| s.unique_id == code)
    }

    // ---- 貨車與路線 ----

    /// 插入貨車（車牌號唯一）
    pub fn insert_truck(&mut self, truck: Truck) -> Result<i64> {
        if self
            .trucks
            .iter()
            .any(|t| t.plate_number == truck.plate_number)
        {
            return Err(DepotError::Duplicate(format!(
                "車牌號 {}",
                truck.plate_number
            )));
        }
        Ok(self.trucks.insert(truck))
    }

    /// 依主鍵取得貨車
    pub fn truck(&self, id: i64) -> Result<&Truck> {
        self.trucks
            .get(id)
            .ok_or_else(|| DepotError::NotFound(format!("貨車 id={id}")))
    }

    /// 刪除貨車，級聯刪除其路線；路線上的訂單保留，清空路線引用
    pub fn delete_truck(&mut self, truck_id: i64) -> Result<()> {
        self.truck(truck_id)?;

        let route_ids: Vec<i64> = self
            .routes
            .iter()
            .filter(|r| r.truck_id == truck_id)
            .map(|r| r.id)
            .collect();

        for order in self.orders.iter_mut() {
            if let Some(route_id) = order.route_id {
                if route_ids.contains(&route_id) {
                    order.route_id = None;
                }
            }
        }
        for id in route_ids {
            self.routes.remove(id);
        }

        self.trucks.remove(truck_id);
        Ok(())
    }

    /// 插入路線殼列（編號留空，由 `finalize_route_number` 寫入）
    pub fn insert_route(&mut self, route: Route) -> Result<i64> {
        self.truck(route.truck_id)?;
        Ok(self.routes.insert(route))
    }

    /// 依主鍵取得路線
    pub fn route(&self, id: i64) -> Result<&Route> {
        self.routes
            .get(id)
            .ok_or_else(|| DepotError::NotFound(format!("路線 id={id}")))
    }

    /// 依主鍵取得路線（可變）
    pub fn route_mut(&mut self, id: i64) -> Result<&mut Route> {
        self.routes
            .get_mut(id)
            .ok_or_else(|| DepotError::NotFound(format!("路線 id={id}")))
    }

    /// 兩段式儲存第二段：寫入生成的路線編號（僅能寫入一次）
    pub fn finalize_route_number(&mut self, route_id: i64, unique_number: String) -> Result<()> {
        if self.routes.iter().any(|r| r.unique_number == unique_number) {
            return Err(DepotError::Duplicate(format!("路線編號 {unique_number}")));
        }
        let route = self.route_mut(route_id)?;
        if !route.unique_number.is_empty() {
            return Err(DepotError::Validation(format!(
                "路線編號已生成，不可變更: {}",
                route.unique_number
            )));
        }
        route.unique_number = unique_number;
        Ok(())
    }

    /// 指定日期建立的路線
    pub fn routes_created_on(&self, day: NaiveDate) -> Vec<&Route> {
        self.routes
            .iter()
            .filter(|r| r.created_at.date() == day)
            .collect()
    }

    /// 路線上的訂單
    pub fn orders_of_route(&self, route_id: i64) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.route_id == Some(route_id))
            .collect()
    }

    // ---- 訂單 ----

    /// 插入訂單殼列（訂單號留空，由 `finalize_order_number` 寫入）
    pub fn insert_order(&mut self, order: Order) -> Result<i64> {
        self.client(order.sender_id)?;
        self.client(order.receiver_id)?;
        if let Some(shelf_id) = order.shelf_id {
            self.shelf(shelf_id)?;
        }
        if let Some(route_id) = order.route_id {
            self.route(route_id)?;
        }
        Ok(self.orders.insert(order))
    }

    /// 依主鍵取得訂單
    pub fn order(&self, id: i64) -> Result<&Order> {
        self.orders
            .get(id)
            .ok_or_else(|| DepotError::NotFound(format!("訂單 id={id}")))
    }

    /// 依主鍵取得訂單（可變）
    pub fn order_mut(&mut self, id: i64) -> Result<&mut Order> {
        self.orders
            .get_mut(id)
            .ok_or_else(|| DepotError::NotFound(format!("訂單 id={id}")))
    }

    /// 兩段式儲存第二段：寫入生成的訂單號與 QR 碼（僅能寫入一次）
    pub fn finalize_order_number(
        &mut self,
        order_id: i64,
        order_number: String,
        qr_code: Option<Vec<u8>>,
    ) -> Result<()> {
        if self.orders.iter().any(|o| o.order_number == order_number) {
            return Err(DepotError::Duplicate(format!("訂單號 {order_number}")));
        }
        let order = self.order_mut(order_id)?;
        if !order.order_number.is_empty() {
            return Err(DepotError::Validation(format!(
                "訂單號已生成，不可變更: {}",
                order.order_number
            )));
        }
        order.order_number = order_number;
        order.qr_code = qr_code;
        Ok(())
    }

    /// 刪除訂單列（僅供兩段式儲存失敗時回滾殼列）
    pub fn remove_order(&mut self, order_id: i64) -> Option<Order> {
        self.orders.remove(order_id)
    }

    /// 依訂單號尋找訂單
    pub fn find_order_by_number(&self, order_number: &str) -> Option<&Order> {
        self.orders
            .iter()
            .find(|o| !o.order_number.is_empty() && o.order_number == order_number)
    }

    /// 依一批訂單號解析主鍵（不存在的訂單號直接略過）
    pub fn orders_by_numbers(&self, order_numbers: &[String]) -> Vec<i64> {
        self.orders
            .iter()
            .filter(|o| {
                !o.order_number.is_empty() && order_numbers.iter().any(|n| *n == o.order_number)
            })
            .map(|o| o.id)
            .collect()
    }

    /// 指定日期建立的訂單
    pub fn orders_created_on(&self, day: NaiveDate) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.created_at.date() == day)
            .collect()
    }

    /// 所有訂單（主鍵順序）
    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }
}

/// 層級代碼插入前檢查：必須已指派、僅限 ASCII、且在同型實體間唯一
fn check_code<'a>(code: &str, mut existing: impl Iterator<Item = &'a str>) -> Result<()> {
    if code.is_empty() {
        return Err(DepotError::Validation(
            "層級代碼必須在插入前指派".to_string(),
        ));
    }
    // 下游的代碼派生以位元組切片取尾碼
    if !code.is_ascii() {
        return Err(DepotError::Validation(format!(
            "層級代碼僅限 ASCII 字元: {code}"
        )));
    }
    if existing.any(|c| c == code) {
        return Err(DepotError::Duplicate(format!("層級代碼 {code}")));
    }
    Ok(())
}
