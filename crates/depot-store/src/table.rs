//! 自增主鍵資料表

use std::collections::BTreeMap;

/// 具 i64 主鍵的實體
pub trait Keyed {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! impl_keyed {
    ($($ty:ty),+ $(,)?) => {
        $(impl Keyed for $ty {
            fn id(&self) -> i64 {
                self.id
            }
            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })+
    };
}

impl_keyed!(
    depot_core::Client,
    depot_core::PhoneNumber,
    depot_core::Warehouse,
    depot_core::Area,
    depot_core::Sector,
    depot_core::Shelf,
    depot_core::Truck,
    depot_core::Route,
    depot_core::Order,
);

/// 自增主鍵資料表
///
/// 主鍵從 1 開始遞增，刪除不回收，對應關聯式資料庫的自增序列。
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Keyed> Table<T> {
    /// 創建空的資料表
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// 插入一列，指派主鍵並返回
    pub fn insert(&mut self, mut row: T) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        row.set_id(id);
        self.rows.insert(id, row);
        id
    }

    /// 依主鍵取得
    pub fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    /// 依主鍵取得（可變）
    pub fn get_mut(&mut self, id: i64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    /// 依主鍵刪除
    pub fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }

    /// 以主鍵順序迭代
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// 以主鍵順序迭代（可變）
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.rows.values_mut()
    }

    /// 列數
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// 是否為空
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<T: Keyed> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}
