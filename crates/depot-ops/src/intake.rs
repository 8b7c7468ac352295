//! 訂單收件與生命週期服務

use chrono::NaiveDateTime;
use depot_core::{Order, OrderStatus, Result};
use depot_store::DepotStore;

use crate::codegen::CodeGenerator;
use crate::media::{order_qr_payload, ImageOptimizer, QrCodeRenderer};

/// 無電話客戶在 QR 說明文字中的佔位
const NO_PHONE: &str = "未留電話";

/// 訂單收件服務
pub struct OrderIntakeService;

impl OrderIntakeService {
    /// 建立訂單（兩段式儲存）
    ///
    /// 第一段插入殼列取得主鍵與建立日；第二段生成訂單號與 QR 碼後定稿。
    /// QR 生成或定稿失敗時移除殼列，不留部分狀態。
    pub fn create_order(
        store: &mut DepotStore,
        mut draft: Order,
        optimizer: &dyn ImageOptimizer,
        renderer: &dyn QrCodeRenderer,
    ) -> Result<i64> {
        draft.validate()?;

        if let Some(raw) = draft.photo.take() {
            draft.photo = Some(optimizer.optimize_image(&raw)?);
        }

        let created_day = draft.created_at.date();
        let sender_id = draft.sender_id;
        let receiver_id = draft.receiver_id;
        let order_id = store.insert_order(draft)?;

        let order_number = CodeGenerator::next_order_number(store, created_day);
        let captions = vec![
            order_number.clone(),
            store
                .first_phone_of_client(sender_id)
                .unwrap_or(NO_PHONE)
                .to_string(),
            store
                .first_phone_of_client(receiver_id)
                .unwrap_or(NO_PHONE)
                .to_string(),
        ];

        let finalized = renderer
            .generate_qr_code(&order_qr_payload(&order_number), &captions)
            .and_then(|qr_code| {
                store.finalize_order_number(order_id, order_number.clone(), Some(qr_code))
            });
        if let Err(err) = finalized {
            store.remove_order(order_id);
            return Err(err);
        }

        tracing::info!("建立訂單 {}（id={}）", order_number, order_id);
        Ok(order_id)
    }

    /// 直接編輯訂單狀態
    ///
    /// 不做路線守衛檢查（人工修正權限）；轉為已完成時清空貨架引用。
    pub fn update_status(
        store: &mut DepotStore,
        order_id: i64,
        new_status: OrderStatus,
        now: NaiveDateTime,
    ) -> Result<()> {
        let order = store.order_mut(order_id)?;
        let old_status = order.status;
        order.status = new_status;
        order.updated_at = now;

        if new_status == OrderStatus::Completed {
            order.shelf_id = None;
        }

        tracing::info!(
            "訂單 {} 狀態 {} → {}",
            order.order_number,
            old_status.display_name(),
            new_status.display_name()
        );
        Ok(())
    }

    /// 附加照片：每次儲存都先經影像正規化再落盤
    pub fn attach_photo(
        store: &mut DepotStore,
        order_id: i64,
        raw: &[u8],
        optimizer: &dyn ImageOptimizer,
        now: NaiveDateTime,
    ) -> Result<()> {
        let normalized = optimizer.optimize_image(raw)?;
        let order = store.order_mut(order_id)?;
        order.photo = Some(normalized);
        order.updated_at = now;
        Ok(())
    }

    /// 標記為已全額支付：對每筆 price > paid_amount 的訂單設 paid_amount = price
    ///
    /// 返回實際更新的筆數。
    pub fn mark_fully_paid(
        store: &mut DepotStore,
        order_ids: &[i64],
        now: NaiveDateTime,
    ) -> Result<u32> {
        // 先整批驗證存在性，再套用（全有或全無）
        for &id in order_ids {
            store.order(id)?;
        }

        let mut updated = 0;
        for &id in order_ids {
            let order = store.order_mut(id)?;
            if order.price > order.paid_amount {
                order.paid_amount = order.price;
                order.updated_at = now;
                updated += 1;
            }
        }

        tracing::info!("{} 筆訂單標記為已全額支付", updated);
        Ok(updated)
    }
}
