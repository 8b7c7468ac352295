//! 倉庫層級模型（倉庫 → 區域 → 分區 → 貨架）

use serde::{Deserialize, Serialize};

/// 貨架面位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    /// 下層
    Lower,
    /// 中層
    Middle,
    /// 上層
    Upper,
    /// 前排
    Front,
}

impl Surface {
    /// 面位代碼字母（用於貨架代碼生成）
    pub fn code_letter(&self) -> char {
        match self {
            Surface::Lower => 'H',
            Surface::Middle => 'C',
            Surface::Upper => 'B',
            Surface::Front => 'F',
        }
    }

    /// 顯示名稱
    pub fn display_name(&self) -> &'static str {
        match self {
            Surface::Lower => "下層",
            Surface::Middle => "中層",
            Surface::Upper => "上層",
            Surface::Front => "前排",
        }
    }
}

/// 倉庫
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    /// 主鍵（由儲存層指派）
    pub id: i64,

    /// 倉庫名稱
    pub name: String,

    /// 所在位置
    pub location: Option<String>,

    /// 唯一代碼（2 位數序列，建立時指派一次，之後不變）
    pub unique_id: String,
}

impl Warehouse {
    /// 創建新的倉庫（unique_id 由建立服務指派）
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            location: None,
            unique_id: String::new(),
        }
    }

    /// 建構器模式：設置位置
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// 區域（隸屬於一個倉庫）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    /// 主鍵（由儲存層指派）
    pub id: i64,

    /// 所屬倉庫
    pub warehouse_id: i64,

    /// 區域名稱
    pub name: String,

    /// 唯一代碼：`<倉庫代碼><倉庫內 2 位數序列>`
    pub unique_id: String,
}

impl Area {
    /// 創建新的區域
    pub fn new(warehouse_id: i64, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            warehouse_id,
            name: name.into(),
            unique_id: String::new(),
        }
    }
}

/// 分區（隸屬於一個區域）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sector {
    /// 主鍵（由儲存層指派）
    pub id: i64,

    /// 所屬區域
    pub area_id: i64,

    /// 分區名稱
    pub name: String,

    /// 唯一代碼：`<倉庫代碼><區域代碼>-S<區域內 2 位數序列>`
    pub unique_id: String,
}

impl Sector {
    /// 創建新的分區
    pub fn new(area_id: i64, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            area_id,
            name: name.into(),
            unique_id: String::new(),
        }
    }
}

/// 貨架（隸屬於一個分區）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shelf {
    /// 主鍵（由儲存層指派）
    pub id: i64,

    /// 所屬分區
    pub sector_id: i64,

    /// 貨架名稱
    pub name: String,

    /// 面位
    pub surface: Surface,

    /// 唯一代碼：祖先代碼尾兩碼 + 面位字母，碰撞時附加 2 位數後綴
    pub unique_id: String,

    /// QR 碼圖片（編碼 `"W" + unique_id`）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<Vec<u8>>,
}

impl Shelf {
    /// 創建新的貨架
    pub fn new(sector_id: i64, name: impl Into<String>, surface: Surface) -> Self {
        Self {
            id: 0,
            sector_id,
            name: name.into(),
            surface,
            unique_id: String::new(),
            qr_code: None,
        }
    }
}
