//! # MRP Core
//!
//! 核心資料模型與類型定義：物料主檔、BOM 圖、需求、計劃訂單與排程台帳

pub mod bom;
pub mod config;
pub mod demand;
pub mod item;
pub mod plan;

// Re-export 主要類型
pub use bom::{BomEdge, BomGraph};
pub use config::{LeadTimePolicy, PlanningConfig};
pub use demand::{Demand, DemandType};
pub use item::{Item, ItemCatalog};
pub use plan::{PeggingRecord, PlannedOrderType, ProductionOrder, ScheduleLedger};

/// MRP 錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MrpError {
    #[error("無效的物料主檔 {item_id}: {reason}")]
    InvalidItem { item_id: String, reason: String },

    #[error("無效的 BOM 關係 {parent_id} -> {component_id}: {reason}")]
    InvalidBomEdge {
        parent_id: String,
        component_id: String,
        reason: String,
    },

    #[error("BOM 存在循環: {}", .path.join(" -> "))]
    CyclicBom { path: Vec<String> },

    #[error("BOM 展開深度超過上限 {max_depth}: {}", .path.join(" -> "))]
    DepthLimitExceeded { max_depth: usize, path: Vec<String> },

    #[error("物料 {item_id} 提前期 {lead_time} 天超過需求日 {due_day}，需提前 {overrun_days} 天開工")]
    LeadTimeOverrun {
        item_id: String,
        due_day: u32,
        lead_time: u32,
        overrun_days: u32,
    },

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

pub type Result<T> = std::result::Result<T, MrpError>;
