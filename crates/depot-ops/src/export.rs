//! 訂單清單匯出：展平成報表列

use depot_core::Result;
use depot_store::DepotStore;
use rust_decimal::Decimal;
use serde::Serialize;

/// 無電話客戶在報表中的佔位
const NO_PHONE: &str = "無電話號碼";

/// 報表單列，關聯欄位已展平為文字
#[derive(Debug, Clone, Serialize)]
pub struct OrderExportRow {
    /// 訂單號
    pub order_number: String,

    /// 狀態顯示名
    pub status: String,

    /// 收件人姓名
    pub receiver_full_name: String,

    /// 收件人電話（逗號相接）
    pub receiver_phone_numbers: String,

    /// 座位數
    pub seat_count: u32,

    /// 貨架代碼（未上架為空）
    pub shelf_unique_id: String,

    /// 價格
    pub price: Decimal,

    /// 是否轉帳支付
    pub is_cashless: String,

    /// 路線車輛車牌（未綁定為空）
    pub truck_plate_number: String,

    /// 建立日期（DD.MM.YY）
    pub date: String,
}

/// 訂單匯出服務
pub struct OrderExporter;

impl OrderExporter {
    /// 將全部已定稿訂單展平為報表列（依主鍵排序）
    pub fn export(store: &DepotStore) -> Result<Vec<OrderExportRow>> {
        let mut rows = Vec::new();

        for order in store.orders() {
            // 尚未定稿的殼列不進報表
            if order.order_number.is_empty() {
                continue;
            }

            let receiver = store.client(order.receiver_id)?;
            let phones: Vec<&str> = store
                .phones_of_client(order.receiver_id)
                .iter()
                .map(|p| p.number.as_str())
                .collect();
            let receiver_phone_numbers = if phones.is_empty() {
                NO_PHONE.to_string()
            } else {
                phones.join(", ")
            };

            let shelf_unique_id = match order.shelf_id {
                Some(shelf_id) => store.shelf(shelf_id)?.unique_id.clone(),
                None => String::new(),
            };

            let truck_plate_number = match order.route_id {
                Some(route_id) => {
                    let route = store.route(route_id)?;
                    store.truck(route.truck_id)?.plate_number.clone()
                }
                None => String::new(),
            };

            rows.push(OrderExportRow {
                order_number: order.order_number.clone(),
                status: order.status.display_name().to_string(),
                receiver_full_name: receiver.full_name.clone(),
                receiver_phone_numbers,
                seat_count: order.seat_count,
                shelf_unique_id,
                price: order.price,
                is_cashless: if order.is_cashless { "是" } else { "否" }.to_string(),
                truck_plate_number,
                date: order.created_at.format("%d.%m.%y").to_string(),
            });
        }

        tracing::debug!("匯出 {} 筆訂單", rows.len());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::WarehouseService;
    use crate::intake::OrderIntakeService;
    use crate::media::PassthroughMedia;
    use crate::route::RouteService;
    use crate::shelf_assignment::ShelfAssignmentService;
    use chrono::{NaiveDate, NaiveDateTime};
    use depot_core::{Client, Order, Surface, Truck};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_export_flattens_relations() {
        let mut store = DepotStore::new();
        let sender = store.insert_client(Client::new("寄件人", now()));
        let receiver = store.insert_client(Client::new("收件人", now()));
        store.add_phone_number(receiver, "+77001234567").unwrap();
        store.add_phone_number(receiver, "+77007654321").unwrap();

        let truck_id = store.insert_truck(Truck::new("Volvo", "111AAA01")).unwrap();
        let route_id = RouteService::create_route(&mut store, truck_id, now()).unwrap();

        let order_id = OrderIntakeService::create_order(
            &mut store,
            Order::new(sender, receiver, 3, Decimal::new(15050, 2), now())
                .with_route(route_id)
                .with_cashless(true),
            &PassthroughMedia,
            &PassthroughMedia,
        )
        .unwrap();
        let order_number = store.order(order_id).unwrap().order_number.clone();

        let warehouse_id = WarehouseService::create_warehouse(&mut store, "倉", None).unwrap();
        let area_id = WarehouseService::create_area(&mut store, warehouse_id, "區").unwrap();
        let sector_id = WarehouseService::create_sector(&mut store, area_id, "分區").unwrap();
        let shelf_id = WarehouseService::create_shelf(
            &mut store,
            sector_id,
            "架",
            Surface::Middle,
            &PassthroughMedia,
        )
        .unwrap();
        let shelf_code = store.shelf(shelf_id).unwrap().unique_id.clone();
        ShelfAssignmentService::assign_orders_to_shelf(
            &mut store,
            &[order_number.clone()],
            &shelf_code,
        )
        .unwrap();

        let rows = OrderExporter::export(&store).unwrap();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.order_number, order_number);
        assert_eq!(row.status, "已受理");
        assert_eq!(row.receiver_full_name, "收件人");
        assert_eq!(row.receiver_phone_numbers, "+77001234567, +77007654321");
        assert_eq!(row.seat_count, 3);
        assert_eq!(row.shelf_unique_id, shelf_code);
        assert_eq!(row.price, Decimal::new(15050, 2));
        assert_eq!(row.is_cashless, "是");
        assert_eq!(row.truck_plate_number, "111AAA01");
        assert_eq!(row.date, "10.03.25");
    }

    #[test]
    fn test_export_uses_placeholders_for_missing_relations() {
        let mut store = DepotStore::new();
        let sender = store.insert_client(Client::new("寄件人", now()));
        let receiver = store.insert_client(Client::new("收件人", now()));

        OrderIntakeService::create_order(
            &mut store,
            Order::new(sender, receiver, 1, Decimal::from(100), now()),
            &PassthroughMedia,
            &PassthroughMedia,
        )
        .unwrap();

        let rows = OrderExporter::export(&store).unwrap();
        let row = &rows[0];
        assert_eq!(row.receiver_phone_numbers, "無電話號碼");
        assert_eq!(row.shelf_unique_id, "");
        assert_eq!(row.truck_plate_number, "");
        assert_eq!(row.is_cashless, "否");
    }

    #[test]
    fn test_export_serializes_to_json() {
        let mut store = DepotStore::new();
        let sender = store.insert_client(Client::new("寄件人", now()));
        let receiver = store.insert_client(Client::new("收件人", now()));
        OrderIntakeService::create_order(
            &mut store,
            Order::new(sender, receiver, 1, Decimal::from(100), now()),
            &PassthroughMedia,
            &PassthroughMedia,
        )
        .unwrap();

        let rows = OrderExporter::export(&store).unwrap();
        let json = serde_json::to_string(&rows).unwrap();
        assert!(json.contains("100325-0001"));
        assert!(json.contains("10.03.25"));
    }
}
