//! 需求模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 需求類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandType {
    /// 銷售訂單
    SalesOrder,
    /// 銷售預測
    Forecast,
}

/// 需求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demand {
    /// 需求ID
    pub id: Uuid,

    /// 物料ID
    pub item_id: String,

    /// 需求數量（毛需求）
    pub quantity: Decimal,

    /// 需求日（計劃期間內的第幾天）
    pub due_day: u32,

    /// 需求類型
    pub demand_type: DemandType,

    /// 來源單據（如銷售訂單號）
    pub source_ref: Option<String>,
}

impl Demand {
    /// 創建新的需求
    pub fn new(
        item_id: impl Into<String>,
        quantity: Decimal,
        due_day: u32,
        demand_type: DemandType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id: item_id.into(),
            quantity,
            due_day,
            demand_type,
            source_ref: None,
        }
    }

    /// 創建銷售訂單需求
    pub fn sales_order(item_id: impl Into<String>, quantity: Decimal, due_day: u32) -> Self {
        Self::new(item_id, quantity, due_day, DemandType::SalesOrder)
    }

    /// 建構器模式：設置來源單據
    pub fn with_source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.source_ref = Some(source_ref.into());
        self
    }

    /// 檢查是否為預測需求
    pub fn is_forecast(&self) -> bool {
        self.demand_type == DemandType::Forecast
    }
}
