//! # MRP Planner
//!
//! 多階物料需求計劃：由 BOM、物料主檔與獨立需求產生按開工日排序的計劃訂單。
//!
//! ```
//! use mrp_planner::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let mut bom = BomGraph::new();
//! bom.add_component("CHAIR", "LEGS", Decimal::from(4)).unwrap();
//!
//! let mut catalog = ItemCatalog::from_items(vec![
//!     Item::new("CHAIR").with_lead_time(5),
//!     Item::new("LEGS").with_lot_size(Decimal::from(20)).with_lead_time(2),
//! ])
//! .unwrap();
//!
//! let demands = vec![Demand::sales_order("CHAIR", Decimal::from(15), 10)];
//! let result = MrpCalculator::new(bom).calculate(&mut catalog, &demands).unwrap();
//!
//! assert_eq!(result.orders()[0].item_id, "LEGS");
//! assert_eq!(result.orders()[0].quantity, Decimal::from(60));
//! ```

pub mod logging;

pub use mrp_calc;
pub use mrp_core;

/// 常用類型，方便一次匯入
pub mod prelude {
    pub use mrp_calc::{MrpCalculator, MrpWarning, PlanResult, WarningSeverity};
    pub use mrp_core::{
        BomEdge, BomGraph, Demand, DemandType, Item, ItemCatalog, LeadTimePolicy, MrpError,
        PlannedOrderType, PlanningConfig, ProductionOrder, ScheduleLedger,
    };
}
