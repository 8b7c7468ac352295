//! 路線服務：編號生成與顯式狀態轉換命令

use chrono::NaiveDateTime;
use depot_core::{DepotError, Result, Route, RouteStatus};
use depot_store::DepotStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codegen::CodeGenerator;

/// 路線轉換回執：路線變更與受級聯影響的訂單綁成一個單元返回
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteTransition {
    /// 回執ID
    pub id: Uuid,

    /// 路線主鍵
    pub route_id: i64,

    /// 轉換前狀態
    pub from: RouteStatus,

    /// 轉換後狀態
    pub to: RouteStatus,

    /// 被級聯更新的訂單號
    pub cascaded_orders: Vec<String>,
}

/// 路線服務
pub struct RouteService;

impl RouteService {
    /// 建立路線（兩段式儲存）
    ///
    /// 第一段插入殼列，第二段以建立日與車牌號生成唯一編號後定稿。
    pub fn create_route(store: &mut DepotStore, truck_id: i64, now: NaiveDateTime) -> Result<i64> {
        let plate_number = store.truck(truck_id)?.plate_number.clone();
        let route_id = store.insert_route(Route::new(truck_id, now))?;

        let unique_number = CodeGenerator::next_route_number(store, now.date(), &plate_number);
        store.finalize_route_number(route_id, unique_number.clone())?;

        tracing::info!("建立路線 {}（id={}）", unique_number, route_id);
        Ok(route_id)
    }

    /// 路線狀態轉換命令
    ///
    /// 守衛：轉入未啟用／已完成前，路線上不得有在途訂單，違反時返回
    /// 驗證錯誤並列出訂單號，狀態不變。
    /// 級聯：成功轉入裝車中／行駛中／卸貨中後，整批更新仍跟隨路線的
    /// 訂單為對應狀態；已入庫與終態訂單不受影響。
    pub fn transition(
        store: &mut DepotStore,
        route_id: i64,
        new_status: RouteStatus,
        now: NaiveDateTime,
    ) -> Result<RouteTransition> {
        let route = store.route(route_id)?;
        let from = route.status;
        let unique_number = route.unique_number.clone();

        if new_status.requires_idle_orders() {
            let blocking: Vec<String> = store
                .orders_of_route(route_id)
                .iter()
                .filter(|o| o.status.is_en_route())
                .map(|o| o.order_number.clone())
                .collect();

            if !blocking.is_empty() {
                return Err(DepotError::Validation(format!(
                    "無法將路線 {} 設為「{}」，下列訂單狀態不允許: {}",
                    unique_number,
                    new_status.display_name(),
                    blocking.join(", ")
                )));
            }
        }

        let route = store.route_mut(route_id)?;
        route.status = new_status;
        route.updated_at = now;

        let mut cascaded_orders = Vec::new();
        if from != new_status {
            if let Some(target) = new_status.cascade_target() {
                let order_ids: Vec<i64> = store
                    .orders_of_route(route_id)
                    .iter()
                    .filter(|o| o.status.follows_route_cascade())
                    .map(|o| o.id)
                    .collect();

                for order_id in order_ids {
                    let order = store.order_mut(order_id)?;
                    order.status = target;
                    order.updated_at = now;
                    cascaded_orders.push(order.order_number.clone());
                }
            }
        }

        tracing::info!(
            "路線 {} 狀態 {} → {}，級聯 {} 筆訂單",
            unique_number,
            from.display_name(),
            new_status.display_name(),
            cascaded_orders.len()
        );

        Ok(RouteTransition {
            id: Uuid::new_v4(),
            route_id,
            from,
            to: new_status,
            cascaded_orders,
        })
    }
}
