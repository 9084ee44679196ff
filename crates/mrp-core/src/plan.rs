//! 計劃訂單與排程台帳

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 計劃訂單類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlannedOrderType {
    /// 採購（無子件的外購件/原材料）
    Purchase,
    /// 生產（有 BOM 子件）
    Production,
}

/// 需求追溯記錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeggingRecord {
    /// 源頭獨立需求ID
    pub demand_id: Uuid,

    /// 追溯路徑（頂層物料 -> ... -> 本物料）
    pub path: Vec<String>,
}

impl PeggingRecord {
    /// 創建新的追溯記錄
    pub fn new(demand_id: Uuid) -> Self {
        Self {
            demand_id,
            path: Vec::new(),
        }
    }

    /// 建構器模式：設置追溯路徑
    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }

    /// 獲取追溯深度（層級）
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// 直接上層父件（頂層需求為 None）
    pub fn parent(&self) -> Option<&str> {
        self.path.iter().rev().nth(1).map(String::as_str)
    }
}

/// 生產計劃訂單（排程台帳的一列）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionOrder {
    /// 產生順序（運算內從 0 起算）
    pub sequence: usize,

    /// 計劃開工日 = max(0, 需求日 - 提前期)
    pub planned_day: u32,

    /// 需求日（完成日）
    pub due_day: u32,

    /// 物料ID
    pub item_id: String,

    /// 觸發本訂單的毛需求
    pub gross_requirement: Decimal,

    /// 淨需求
    pub net_requirement: Decimal,

    /// 計劃生產數量（批量的整數倍）
    pub quantity: Decimal,

    /// 批數
    pub lots: Decimal,

    /// 訂單類型
    pub order_type: PlannedOrderType,

    /// 提前期超出需求日的天數（0 表示可行）
    pub lead_time_overrun_days: u32,

    /// 需求追溯
    pub pegging: PeggingRecord,
}

impl ProductionOrder {
    /// 檢查計劃是否可在期間內完成
    pub fn is_feasible(&self) -> bool {
        self.lead_time_overrun_days == 0
    }

    /// 計算提前期（天數，截斷後）
    pub fn lead_time_days(&self) -> u32 {
        self.due_day - self.planned_day
    }

    /// 超出淨需求的批量餘量
    pub fn excess_quantity(&self) -> Decimal {
        self.quantity - self.net_requirement
    }

    pub fn is_purchase(&self) -> bool {
        self.order_type == PlannedOrderType::Purchase
    }

    pub fn is_production(&self) -> bool {
        self.order_type == PlannedOrderType::Production
    }
}

/// 排程台帳
///
/// 展開期間只能追加；全部需求處理完後呼叫 [`ScheduleLedger::finalize`]
/// 依計劃開工日穩定排序一次，同日訂單保持產生順序。不合併、不去重。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleLedger {
    orders: Vec<ProductionOrder>,
}

impl ScheduleLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 下一筆訂單的產生順序
    pub fn next_sequence(&self) -> usize {
        self.orders.len()
    }

    /// 追加計劃訂單
    pub fn append(&mut self, order: ProductionOrder) {
        self.orders.push(order);
    }

    /// 依計劃開工日穩定排序
    pub fn finalize(&mut self) {
        self.orders.sort_by_key(|order| order.planned_day);
    }

    pub fn orders(&self) -> &[ProductionOrder] {
        &self.orders
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProductionOrder> {
        self.orders.iter()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn into_orders(self) -> Vec<ProductionOrder> {
        self.orders
    }

    /// 指定物料的所有計劃訂單
    pub fn orders_for<'a>(&'a self, item_id: &'a str) -> impl Iterator<Item = &'a ProductionOrder> {
        self.orders.iter().filter(move |order| order.item_id == item_id)
    }

    /// 指定物料的計劃生產總量
    pub fn total_quantity_for(&self, item_id: &str) -> Decimal {
        self.orders_for(item_id).map(|order| order.quantity).sum()
    }
}

impl<'a> IntoIterator for &'a ScheduleLedger {
    type Item = &'a ProductionOrder;
    type IntoIter = std::slice::Iter<'a, ProductionOrder>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}
