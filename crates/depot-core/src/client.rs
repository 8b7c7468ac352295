//! 客戶模型

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{DepotError, Result};

/// 電話號碼格式：可選的 '+' 開頭，10-15 位數字
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{10,15}$").expect("電話號碼正則表達式無效"));

/// 客戶
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// 主鍵（由儲存層指派）
    pub id: i64,

    /// 姓名全稱
    pub full_name: String,

    /// 建立時間
    pub created_at: NaiveDateTime,

    /// 更新時間
    pub updated_at: NaiveDateTime,
}

impl Client {
    /// 創建新的客戶（尚未存入儲存層，id 為 0）
    pub fn new(full_name: impl Into<String>, now: NaiveDateTime) -> Self {
        Self {
            id: 0,
            full_name: full_name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// 電話號碼（獨立記錄，隨客戶刪除而刪除）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneNumber {
    /// 主鍵（由儲存層指派）
    pub id: i64,

    /// 所屬客戶
    pub client_id: i64,

    /// 正規化後的號碼
    pub number: String,
}

impl PhoneNumber {
    /// 創建新的電話號碼，輸入會先正規化再驗證
    pub fn new(client_id: i64, raw: &str) -> Result<Self> {
        let number = normalize_phone(raw)?;
        Ok(Self {
            id: 0,
            client_id,
            number,
        })
    }
}

/// 正規化電話號碼：移除空白與連字號後驗證格式
///
/// 驗證規則：只能包含數字，可以 '+' 開頭，10-15 位數字。
pub fn normalize_phone(raw: &str) -> Result<String> {
    let cleaned: String = raw.chars().filter(|c| *c != ' ' && *c != '-').collect();

    if !PHONE_PATTERN.is_match(&cleaned) {
        return Err(DepotError::Validation(format!(
            "電話號碼只能包含 10-15 位數字，且可以 '+' 開頭: {raw}"
        )));
    }

    Ok(cleaned)
}
