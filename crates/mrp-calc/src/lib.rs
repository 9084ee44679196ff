//! # MRP Calculation Engine
//!
//! 核心 MRP 計算引擎：淨算、固定批量、提前期偏移與多階 BOM 展開

pub mod calculator;
pub mod explosion;
pub mod lead_time;
pub mod lot_sizing;
pub mod netting;
pub mod pegging;

// Re-export 主要類型
pub use calculator::MrpCalculator;
pub use explosion::ExplosionEngine;
pub use netting::NetRequirement;

use mrp_core::{ProductionOrder, ScheduleLedger};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// MRP 計算結果
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// 排程台帳（已依計劃開工日排序）
    pub ledger: ScheduleLedger,

    /// 需求追溯：獨立需求ID -> 訂單產生順序
    pub pegging: HashMap<uuid::Uuid, Vec<usize>>,

    /// 警告信息
    pub warnings: Vec<MrpWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlanResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            ledger: ScheduleLedger::new(),
            pegging: HashMap::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: MrpWarning) {
        self.warnings.push(warning);
    }

    /// 計劃訂單（依計劃開工日排序）
    pub fn orders(&self) -> &[ProductionOrder] {
        self.ledger.orders()
    }

    /// 提前期超出、需在期間前開工的訂單
    pub fn infeasible_orders(&self) -> impl Iterator<Item = &ProductionOrder> {
        self.ledger.iter().filter(|order| !order.is_feasible())
    }

    pub fn is_feasible(&self) -> bool {
        self.infeasible_orders().next().is_none()
    }
}

/// MRP 警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrpWarning {
    pub item_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl MrpWarning {
    pub fn new(item_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            item_id,
            message,
            severity,
        }
    }

    pub fn info(item_id: String, message: String) -> Self {
        Self::new(item_id, message, WarningSeverity::Info)
    }

    pub fn warning(item_id: String, message: String) -> Self {
        Self::new(item_id, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
