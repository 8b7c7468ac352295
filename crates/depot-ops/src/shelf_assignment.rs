//! 貨架指派服務：整批訂單上架到同一貨架

use depot_core::{DepotError, Result};
use depot_store::DepotStore;

use crate::forms;

/// 貨架指派服務
pub struct ShelfAssignmentService;

impl ShelfAssignmentService {
    /// 將一批訂單（以訂單號）指派到一個貨架（以唯一代碼）
    ///
    /// 先整批解析再套用，全有或全無；重複呼叫結果相同（純覆寫）。
    /// 找不到的訂單號在更新時略過，但會在確認訊息中單獨列出。
    pub fn assign_orders_to_shelf(
        store: &mut DepotStore,
        order_numbers: &[String],
        shelf_code: &str,
    ) -> Result<String> {
        if order_numbers.is_empty() {
            return Err(DepotError::InvalidInput("訂單號列表為空".to_string()));
        }

        let shelf = store
            .find_shelf_by_code(shelf_code)
            .ok_or_else(|| DepotError::NotFound(format!("貨架代碼 {shelf_code}")))?;
        let shelf_id = shelf.id;
        let shelf_code = shelf.unique_id.clone();

        let order_ids = store.orders_by_numbers(order_numbers);
        if order_ids.is_empty() {
            return Err(DepotError::NotFound(format!(
                "訂單號 {} 均不存在",
                order_numbers.join(", ")
            )));
        }

        let mut matched = Vec::new();
        for order_id in order_ids {
            let order = store.order_mut(order_id)?;
            order.shelf_id = Some(shelf_id);
            matched.push(order.order_number.clone());
        }

        let unmatched: Vec<&String> = order_numbers
            .iter()
            .filter(|n| !matched.iter().any(|m| m == *n))
            .collect();

        tracing::info!(
            "{} 筆訂單上架至貨架 {}（{} 筆訂單號未匹配）",
            matched.len(),
            shelf_code,
            unmatched.len()
        );

        let mut message = format!("訂單 {} 已上架至貨架 {}", matched.join(", "), shelf_code);
        if !unmatched.is_empty() {
            let unmatched: Vec<&str> = unmatched.iter().map(|s| s.as_str()).collect();
            message.push_str(&format!("；未找到的訂單號: {}", unmatched.join(", ")));
        }
        Ok(message)
    }

    /// 表單入口：訂單號與貨架代碼先經正規化再委派
    pub fn assign_from_form(
        store: &mut DepotStore,
        raw_order_numbers: &str,
        raw_shelf_code: &str,
    ) -> Result<String> {
        let order_numbers = forms::parse_order_numbers(raw_order_numbers)?;
        let shelf_code = forms::parse_shelf_code(raw_shelf_code)?;
        Self::assign_orders_to_shelf(store, &order_numbers, &shelf_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::WarehouseService;
    use crate::intake::OrderIntakeService;
    use crate::media::PassthroughMedia;
    use chrono::{NaiveDate, NaiveDateTime};
    use depot_core::{Client, Order, Surface};
    use rust_decimal::Decimal;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    struct Fixture {
        store: DepotStore,
        shelf_code: String,
        numbers: Vec<String>,
    }

    fn fixture() -> Fixture {
        let mut store = DepotStore::new();
        let sender = store.insert_client(Client::new("寄件人", now()));
        let receiver = store.insert_client(Client::new("收件人", now()));

        let warehouse_id = WarehouseService::create_warehouse(&mut store, "倉", None).unwrap();
        let area_id = WarehouseService::create_area(&mut store, warehouse_id, "區").unwrap();
        let sector_id = WarehouseService::create_sector(&mut store, area_id, "分區").unwrap();
        let shelf_id = WarehouseService::create_shelf(
            &mut store,
            sector_id,
            "架",
            Surface::Upper,
            &PassthroughMedia,
        )
        .unwrap();
        let shelf_code = store.shelf(shelf_id).unwrap().unique_id.clone();

        let mut numbers = Vec::new();
        for _ in 0..2 {
            let order_id = OrderIntakeService::create_order(
                &mut store,
                Order::new(sender, receiver, 1, Decimal::from(100), now()),
                &PassthroughMedia,
                &PassthroughMedia,
            )
            .unwrap();
            numbers.push(store.order(order_id).unwrap().order_number.clone());
        }

        Fixture {
            store,
            shelf_code,
            numbers,
        }
    }

    #[test]
    fn test_assign_sets_shelf_on_all_matched() {
        let mut fx = fixture();
        let message = ShelfAssignmentService::assign_orders_to_shelf(
            &mut fx.store,
            &fx.numbers,
            &fx.shelf_code,
        )
        .unwrap();

        assert!(message.contains(&fx.shelf_code));
        for number in &fx.numbers {
            let order = fx.store.find_order_by_number(number).unwrap();
            assert!(order.shelf_id.is_some());
        }
    }

    #[test]
    fn test_assign_is_idempotent() {
        let mut fx = fixture();
        ShelfAssignmentService::assign_orders_to_shelf(&mut fx.store, &fx.numbers, &fx.shelf_code)
            .unwrap();
        let snapshot: Vec<_> = fx
            .store
            .orders()
            .map(|o| (o.id, o.shelf_id))
            .collect();

        ShelfAssignmentService::assign_orders_to_shelf(&mut fx.store, &fx.numbers, &fx.shelf_code)
            .unwrap();
        let again: Vec<_> = fx.store.orders().map(|o| (o.id, o.shelf_id)).collect();
        assert_eq!(snapshot, again);
    }

    #[test]
    fn test_empty_order_list_is_invalid_input() {
        let mut fx = fixture();
        let result =
            ShelfAssignmentService::assign_orders_to_shelf(&mut fx.store, &[], &fx.shelf_code);
        assert!(matches!(result, Err(DepotError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_shelf_makes_no_change() {
        let mut fx = fixture();
        let numbers = vec!["9999-0001".to_string(), "9999-0002".to_string()];
        let result =
            ShelfAssignmentService::assign_orders_to_shelf(&mut fx.store, &numbers, "BADCODE");

        assert!(matches!(result, Err(DepotError::NotFound(_))));
        for order in fx.store.orders() {
            assert_eq!(order.shelf_id, None);
        }
    }

    #[test]
    fn test_no_matching_orders_is_not_found() {
        let mut fx = fixture();
        let numbers = vec!["9999-0001".to_string()];
        let result = ShelfAssignmentService::assign_orders_to_shelf(
            &mut fx.store,
            &numbers,
            &fx.shelf_code,
        );
        assert!(matches!(result, Err(DepotError::NotFound(_))));
    }

    #[test]
    fn test_unmatched_numbers_reported_separately() {
        let mut fx = fixture();
        let mut numbers = fx.numbers.clone();
        numbers.push("9999-0001".to_string());

        let message = ShelfAssignmentService::assign_orders_to_shelf(
            &mut fx.store,
            &numbers,
            &fx.shelf_code,
        )
        .unwrap();

        assert!(message.contains("未找到的訂單號: 9999-0001"));
        // 未匹配的號碼不會出現在成功清單裡
        let (assigned_part, _) = message.split_once('；').unwrap();
        assert!(!assigned_part.contains("9999-0001"));
    }

    #[test]
    fn test_assign_from_form_accepts_comma_list() {
        let mut fx = fixture();
        let raw = format!(" {} , '{}' ", fx.numbers[0], fx.numbers[1]);
        let message =
            ShelfAssignmentService::assign_from_form(&mut fx.store, &raw, &fx.shelf_code).unwrap();
        assert!(message.contains(&fx.numbers[1]));
    }
}
