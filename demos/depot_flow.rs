//! 倉儲後台完整流程示例

use chrono::NaiveDate;
use depot::{
    Order, OrderIntakeService, OrderStatus, PassthroughMedia, RouteService, RouteStatus,
    ShelfAssignmentService, Surface, Truck, WarehouseService,
};
use depot::{Client, DepotStore, OrderExporter};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== 倉儲後台完整流程示例 ===\n");

    let mut store = DepotStore::new();
    let now = NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    // 1. 建立客戶與電話
    let sender = store.insert_client(Client::new("王大明", now));
    let receiver = store.insert_client(Client::new("陳小華", now));
    store.add_phone_number(sender, "+7 700 123-45-67")?;
    store.add_phone_number(receiver, "+77009876543")?;

    // 2. 建立倉庫層級與貨架
    let warehouse_id = WarehouseService::create_warehouse(&mut store, "中央倉", None)?;
    let area_id = WarehouseService::create_area(&mut store, warehouse_id, "A 區")?;
    let sector_id = WarehouseService::create_sector(&mut store, area_id, "第一分區")?;
    let shelf_id = WarehouseService::create_shelf(
        &mut store,
        sector_id,
        "一號架",
        Surface::Middle,
        &PassthroughMedia,
    )?;
    let shelf_code = store.shelf(shelf_id)?.unique_id.clone();
    println!("貨架代碼: {shelf_code}");

    // 3. 建立卡車與路線
    let truck_id = store.insert_truck(Truck::new("Volvo FH", "111AAA01"))?;
    let route_id = RouteService::create_route(&mut store, truck_id, now)?;
    println!("路線編號: {}", store.route(route_id)?.unique_number);

    // 4. 收件兩筆訂單
    let mut order_numbers = Vec::new();
    for seats in [2u32, 3] {
        let order_id = OrderIntakeService::create_order(
            &mut store,
            Order::new(sender, receiver, seats, Decimal::from(1500), now).with_route(route_id),
            &PassthroughMedia,
            &PassthroughMedia,
        )?;
        let number = store.order(order_id)?.order_number.clone();
        println!("訂單號: {number}");
        order_numbers.push(number);
    }

    // 5. 路線轉換，訂單狀態跟隨級聯
    for status in [RouteStatus::Loading, RouteStatus::OnWay, RouteStatus::Unloading] {
        let receipt = RouteService::transition(&mut store, route_id, status, now)?;
        println!(
            "路線轉為「{}」，級聯 {} 筆訂單",
            receipt.to.display_name(),
            receipt.cascaded_orders.len()
        );
    }

    // 6. 訂單入庫後上架
    let order_ids: Vec<i64> = order_numbers
        .iter()
        .map(|n| store.find_order_by_number(n).unwrap().id)
        .collect();
    for &order_id in &order_ids {
        OrderIntakeService::update_status(&mut store, order_id, OrderStatus::InWarehouse, now)?;
    }
    let message =
        ShelfAssignmentService::assign_orders_to_shelf(&mut store, &order_numbers, &shelf_code)?;
    println!("{message}");

    // 7. 路線完成
    RouteService::transition(&mut store, route_id, RouteStatus::Completed, now)?;

    // 8. 匯出報表
    println!("\n訂單報表:");
    for row in OrderExporter::export(&store)? {
        println!(
            "  - {} | {} | {} 座 | 貨架 {} | 車牌 {} | {}",
            row.order_number,
            row.status,
            row.seat_count,
            row.shelf_unique_id,
            row.truck_plate_number,
            row.date
        );
    }

    Ok(())
}
