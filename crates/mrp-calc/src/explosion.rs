//! 需求展開引擎

use mrp_core::{
    BomGraph, Demand, ItemCatalog, MrpError, PeggingRecord, PlannedOrderType, PlanningConfig,
    ProductionOrder, ScheduleLedger,
};
use rust_decimal::Decimal;

use crate::lead_time::LeadTimeCalculator;
use crate::lot_sizing::LotSizingCalculator;
use crate::netting::NettingCalculator;
use crate::MrpWarning;

/// 待展開的需求
#[derive(Debug)]
struct Frame {
    item_id: String,
    due_day: u32,
    gross_requirement: Decimal,
    /// 頂層物料 -> ... -> 本物料
    path: Vec<String>,
}

/// 需求展開引擎
///
/// 以顯式工作堆疊做深度優先展開。子件以宣告順序的反序入堆疊，
/// 因此訪問順序與逐層遞迴完全相同：兄弟子件的整棵子樹處理完後才輪到下一個兄弟，
/// 而前者對庫存的修改會被後者看到。
pub struct ExplosionEngine<'a> {
    bom: &'a BomGraph,
    config: &'a PlanningConfig,
}

impl<'a> ExplosionEngine<'a> {
    pub fn new(bom: &'a BomGraph, config: &'a PlanningConfig) -> Self {
        Self { bom, config }
    }

    /// 展開單筆需求
    ///
    /// 淨需求為 0 時不產生訂單，也不展開子件（子件需求只由父件的計劃生產驅動）。
    /// 產生的訂單數量立即計入 `catalog` 的現有庫存，供後續需求淨算。
    ///
    /// 失敗時不回復：錯誤前已產生的訂單留在 `ledger`，庫存增加也留在 `catalog`。
    /// 需要整批成功或整批不變時請使用 [`MrpCalculator::calculate`](crate::MrpCalculator::calculate)。
    pub fn explode(
        &self,
        catalog: &mut ItemCatalog,
        ledger: &mut ScheduleLedger,
        demand: &Demand,
    ) -> mrp_core::Result<Vec<MrpWarning>> {
        let mut warnings = Vec::new();

        if demand.quantity <= Decimal::ZERO {
            tracing::debug!(
                "需求 {} 數量 {} 不為正，略過",
                demand.id,
                demand.quantity
            );
            return Ok(warnings);
        }

        let mut stack = vec![Frame {
            item_id: demand.item_id.clone(),
            due_day: demand.due_day,
            gross_requirement: demand.quantity,
            path: vec![demand.item_id.clone()],
        }];

        while let Some(frame) = stack.pop() {
            self.check_path(&frame)?;

            if !catalog.contains(&frame.item_id) {
                warnings.push(MrpWarning::info(
                    frame.item_id.clone(),
                    "物料未登錄，以無庫存、批量 1、提前期 0 計算".to_string(),
                ));
            }

            let item = catalog.get(&frame.item_id);
            let net = NettingCalculator::calculate(
                frame.gross_requirement,
                item.on_hand,
                item.safety_stock,
            )?;

            tracing::debug!(
                "處理物料 {}: 需求日 {}, 毛需求 {}, 現有庫存 {}, 安全庫存 {}, 淨需求 {}",
                frame.item_id,
                frame.due_day,
                net.gross_requirement,
                net.on_hand,
                net.safety_stock,
                net.net_requirement
            );

            if !net.has_shortage() {
                tracing::debug!("物料 {} 庫存足夠，不展開子件", frame.item_id);
                continue;
            }

            let lot = LotSizingCalculator::apply(net.net_requirement, item.lot_size)?;
            let offset = LeadTimeCalculator::offset(frame.due_day, item.lead_time);

            if !offset.is_feasible() {
                if self.config.rejects_lead_time_overrun() {
                    return Err(MrpError::LeadTimeOverrun {
                        item_id: frame.item_id,
                        due_day: frame.due_day,
                        lead_time: item.lead_time,
                        overrun_days: offset.overrun_days,
                    });
                }

                tracing::warn!(
                    "物料 {} 提前期 {} 天超過需求日 {}，開工日截斷為 0（超出 {} 天）",
                    frame.item_id,
                    item.lead_time,
                    frame.due_day,
                    offset.overrun_days
                );
                warnings.push(MrpWarning::warning(
                    frame.item_id.clone(),
                    format!(
                        "提前期超出需求日 {} 天，計劃無法在期間內完成",
                        offset.overrun_days
                    ),
                ));
            }

            let components = self.bom.components_of(&frame.item_id);
            let order_type = if components.is_empty() {
                PlannedOrderType::Purchase
            } else {
                PlannedOrderType::Production
            };

            tracing::debug!(
                "計劃生產 {} {} (批數 {}, 批量 {})，開工日 {}",
                frame.item_id,
                lot.quantity,
                lot.lots,
                item.lot_size,
                offset.planned_day
            );

            ledger.append(ProductionOrder {
                sequence: ledger.next_sequence(),
                planned_day: offset.planned_day,
                due_day: frame.due_day,
                item_id: frame.item_id.clone(),
                gross_requirement: net.gross_requirement,
                net_requirement: net.net_requirement,
                quantity: lot.quantity,
                lots: lot.lots,
                order_type,
                lead_time_overrun_days: offset.overrun_days,
                pegging: PeggingRecord::new(demand.id).with_path(frame.path.clone()),
            });

            catalog.increase_on_hand(&frame.item_id, lot.quantity)?;
            tracing::debug!(
                "物料 {} 更新後庫存 {}",
                frame.item_id,
                catalog.on_hand(&frame.item_id)
            );

            // 反序入堆疊，使第一個子件最先出堆疊
            for edge in components.iter().rev() {
                let quantity = lot.quantity.checked_mul(edge.quantity).ok_or_else(|| {
                    MrpError::CalculationError(format!(
                        "子件需求溢位: {} × {} ({} -> {})",
                        lot.quantity, edge.quantity, frame.item_id, edge.component_id
                    ))
                })?;
                tracing::debug!(
                    "BOM 展開: {} → {} (數量: {}, 單位用量: {}, 需求日: {})",
                    frame.item_id,
                    edge.component_id,
                    quantity,
                    edge.quantity,
                    offset.planned_day
                );

                let mut path = frame.path.clone();
                path.push(edge.component_id.clone());
                stack.push(Frame {
                    item_id: edge.component_id.clone(),
                    due_day: offset.planned_day,
                    gross_requirement: quantity,
                    path,
                });
            }
        }

        Ok(warnings)
    }

    /// 檢查展開路徑：循環與深度上限
    fn check_path(&self, frame: &Frame) -> mrp_core::Result<()> {
        let ancestors = &frame.path[..frame.path.len() - 1];
        if ancestors.contains(&frame.item_id) {
            return Err(MrpError::CyclicBom {
                path: frame.path.clone(),
            });
        }

        if let Some(max_depth) = self.config.max_depth {
            if ancestors.len() > max_depth {
                return Err(MrpError::DepthLimitExceeded {
                    max_depth,
                    path: frame.path.clone(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrp_core::{Item, LeadTimePolicy};

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn chair_catalog() -> ItemCatalog {
        ItemCatalog::from_items(vec![
            Item::new("CHAIR").with_lead_time(5),
            Item::new("FRAME")
                .with_on_hand(d(10))
                .with_safety_stock(d(5))
                .with_lot_size(d(10))
                .with_lead_time(3),
            Item::new("LEGS")
                .with_on_hand(d(40))
                .with_safety_stock(d(10))
                .with_lot_size(d(20))
                .with_lead_time(2),
            Item::new("FABRIC")
                .with_on_hand(d(50))
                .with_safety_stock(d(10))
                .with_lot_size(d(10))
                .with_lead_time(1),
            Item::new("FOAM")
                .with_on_hand(d(30))
                .with_safety_stock(d(5))
                .with_lot_size(d(5))
                .with_lead_time(1),
        ])
        .unwrap()
    }

    fn chair_bom() -> BomGraph {
        BomGraph::from_edges(vec![
            mrp_core::BomEdge::new("CHAIR", "FRAME", d(1)),
            mrp_core::BomEdge::new("CHAIR", "LEGS", d(4)),
            mrp_core::BomEdge::new("CHAIR", "FABRIC", d(3)),
            mrp_core::BomEdge::new("CHAIR", "FOAM", d(2)),
        ])
        .unwrap()
    }

    #[test]
    fn test_explode_chair_demand() {
        let bom = chair_bom();
        let config = PlanningConfig::default();
        let engine = ExplosionEngine::new(&bom, &config);
        let mut catalog = chair_catalog();
        let mut ledger = ScheduleLedger::new();

        let demand = Demand::sales_order("CHAIR", d(15), 10);
        let warnings = engine.explode(&mut catalog, &mut ledger, &demand).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(ledger.len(), 2);

        // 產生順序：先父件，後子件
        let chair = &ledger.orders()[0];
        assert_eq!(chair.item_id, "CHAIR");
        assert_eq!(chair.planned_day, 5);
        assert_eq!(chair.quantity, d(15));
        assert!(chair.is_production());

        let legs = &ledger.orders()[1];
        assert_eq!(legs.item_id, "LEGS");
        assert_eq!(legs.gross_requirement, d(60));
        assert_eq!(legs.net_requirement, d(10));
        assert_eq!(legs.quantity, d(20));
        assert_eq!(legs.lots, d(1));
        assert_eq!(legs.planned_day, 3);
        assert!(legs.is_purchase());
        assert_eq!(legs.pegging.demand_id, demand.id);
        assert_eq!(legs.pegging.path, vec!["CHAIR".to_string(), "LEGS".to_string()]);

        assert_eq!(catalog.on_hand("CHAIR"), d(15));
        assert_eq!(catalog.on_hand("LEGS"), d(60));
        assert_eq!(catalog.on_hand("FRAME"), d(10));
    }

    #[test]
    fn test_sufficient_stock_stops_cascade() {
        let mut bom = chair_bom();
        bom.add_component("FRAME", "STEEL", d(3)).unwrap();
        let config = PlanningConfig::default();
        let engine = ExplosionEngine::new(&bom, &config);
        let mut catalog = chair_catalog();
        let mut ledger = ScheduleLedger::new();

        // 直接對框架下需求：15 <= 10 + 5，無訂單，鋼材（無庫存）也不展開
        engine
            .explode(&mut catalog, &mut ledger, &Demand::sales_order("FRAME", d(15), 8))
            .unwrap();

        assert!(ledger.is_empty());
        assert_eq!(catalog.on_hand("FRAME"), d(10));
        assert!(!catalog.contains("STEEL"));
    }

    #[test]
    fn test_component_quantity_scales_with_lot_rounded_parent() {
        let mut bom = BomGraph::new();
        bom.add_component("TABLE", "TOP", d(1)).unwrap();
        let catalog_items = vec![Item::new("TABLE").with_lot_size(d(10))];
        let mut catalog = ItemCatalog::from_items(catalog_items).unwrap();
        let config = PlanningConfig::default();
        let engine = ExplosionEngine::new(&bom, &config);
        let mut ledger = ScheduleLedger::new();

        engine
            .explode(&mut catalog, &mut ledger, &Demand::sales_order("TABLE", d(3), 4))
            .unwrap();

        // 淨需求 3 → 計劃 10；桌面需求以 10 計算而非 3
        let top = ledger.orders_for("TOP").next().unwrap();
        assert_eq!(top.gross_requirement, d(10));
        assert_eq!(top.quantity, d(10));
    }

    #[test]
    fn test_siblings_see_earlier_sibling_stock() {
        // KIT = BOX-A + BOX-B，兩者都用到 SCREW
        let bom = BomGraph::from_edges(vec![
            mrp_core::BomEdge::new("KIT", "BOX-A", d(1)),
            mrp_core::BomEdge::new("KIT", "BOX-B", d(1)),
            mrp_core::BomEdge::new("BOX-A", "SCREW", d(2)),
            mrp_core::BomEdge::new("BOX-B", "SCREW", d(2)),
        ])
        .unwrap();
        let mut catalog =
            ItemCatalog::from_items(vec![Item::new("SCREW").with_lot_size(d(100))]).unwrap();
        let config = PlanningConfig::default();
        let engine = ExplosionEngine::new(&bom, &config);
        let mut ledger = ScheduleLedger::new();

        engine
            .explode(&mut catalog, &mut ledger, &Demand::sales_order("KIT", d(5), 10))
            .unwrap();

        let items: Vec<_> = ledger.iter().map(|o| o.item_id.as_str()).collect();
        // BOX-A 整棵子樹先於 BOX-B；BOX-B 的螺絲需求由 BOX-A 計劃的 100 支覆蓋
        assert_eq!(items, vec!["KIT", "BOX-A", "SCREW", "BOX-B"]);
        assert_eq!(ledger.total_quantity_for("SCREW"), d(100));
        assert_eq!(catalog.on_hand("SCREW"), d(100));
    }

    #[test]
    fn test_non_positive_demand_is_ignored() {
        let bom = chair_bom();
        let config = PlanningConfig::default();
        let engine = ExplosionEngine::new(&bom, &config);
        let mut catalog = chair_catalog();
        let mut ledger = ScheduleLedger::new();

        for quantity in [0, -15] {
            engine
                .explode(&mut catalog, &mut ledger, &Demand::sales_order("CHAIR", d(quantity), 10))
                .unwrap();
        }

        assert!(ledger.is_empty());
        assert_eq!(catalog, chair_catalog());
    }

    #[test]
    fn test_unknown_item_is_purchased_with_defaults() {
        let bom = BomGraph::new();
        let config = PlanningConfig::default();
        let engine = ExplosionEngine::new(&bom, &config);
        let mut catalog = ItemCatalog::new();
        let mut ledger = ScheduleLedger::new();

        let warnings = engine
            .explode(&mut catalog, &mut ledger, &Demand::sales_order("GLUE", d(7), 3))
            .unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].item_id, "GLUE");
        let order = &ledger.orders()[0];
        assert_eq!(order.quantity, d(7));
        assert_eq!(order.planned_day, 3);
        assert!(order.is_purchase());
        assert_eq!(catalog.on_hand("GLUE"), d(7));
    }

    #[test]
    fn test_cycle_is_detected() {
        let bom = BomGraph::from_edges(vec![
            mrp_core::BomEdge::new("A", "B", d(1)),
            mrp_core::BomEdge::new("B", "A", d(1)),
        ])
        .unwrap();
        let config = PlanningConfig::default();
        let engine = ExplosionEngine::new(&bom, &config);
        let mut catalog = ItemCatalog::new();
        let mut ledger = ScheduleLedger::new();

        let err = engine
            .explode(&mut catalog, &mut ledger, &Demand::sales_order("A", d(1), 5))
            .unwrap_err();

        assert_eq!(
            err,
            MrpError::CyclicBom {
                path: vec!["A".to_string(), "B".to_string(), "A".to_string()],
            }
        );
        // 錯誤前的訂單與庫存變更保留
        assert_eq!(ledger.len(), 2);
        assert_eq!(catalog.on_hand("A"), d(1));
        assert_eq!(catalog.on_hand("B"), d(1));
    }

    #[test]
    fn test_quantity_overflow_is_an_error() {
        let per_unit = d(1_000_000_000);
        let bom = BomGraph::from_edges(vec![
            mrp_core::BomEdge::new("A", "B", per_unit),
            mrp_core::BomEdge::new("B", "C", per_unit),
            mrp_core::BomEdge::new("C", "D", per_unit),
        ])
        .unwrap();
        let config = PlanningConfig::default();
        let engine = ExplosionEngine::new(&bom, &config);
        let mut catalog = ItemCatalog::new();
        let mut ledger = ScheduleLedger::new();

        // C 計劃 1e21，乘以 1e9 超出 Decimal 範圍
        let err = engine
            .explode(&mut catalog, &mut ledger, &Demand::sales_order("A", d(1000), 5))
            .unwrap_err();

        assert!(matches!(err, MrpError::CalculationError(_)));
        assert!(ledger.orders_for("D").next().is_none());
    }

    #[test]
    fn test_depth_limit() {
        let bom = BomGraph::from_edges(vec![
            mrp_core::BomEdge::new("L0", "L1", d(1)),
            mrp_core::BomEdge::new("L1", "L2", d(1)),
            mrp_core::BomEdge::new("L2", "L3", d(1)),
        ])
        .unwrap();
        let mut ledger = ScheduleLedger::new();

        let config = PlanningConfig::new().with_max_depth(2);
        let engine = ExplosionEngine::new(&bom, &config);
        let err = engine
            .explode(&mut ItemCatalog::new(), &mut ledger, &Demand::sales_order("L0", d(1), 5))
            .unwrap_err();
        assert!(matches!(err, MrpError::DepthLimitExceeded { max_depth: 2, .. }));

        let config = PlanningConfig::new().with_max_depth(3);
        let engine = ExplosionEngine::new(&bom, &config);
        let mut ledger = ScheduleLedger::new();
        engine
            .explode(&mut ItemCatalog::new(), &mut ledger, &Demand::sales_order("L0", d(1), 5))
            .unwrap();
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn test_lead_time_overrun_is_flagged() {
        let bom = chair_bom();
        let config = PlanningConfig::default();
        let engine = ExplosionEngine::new(&bom, &config);
        let mut catalog = chair_catalog();
        let mut ledger = ScheduleLedger::new();

        let warnings = engine
            .explode(&mut catalog, &mut ledger, &Demand::sales_order("CHAIR", d(15), 2))
            .unwrap();

        let chair = &ledger.orders()[0];
        assert_eq!(chair.planned_day, 0);
        assert_eq!(chair.lead_time_overrun_days, 3);
        assert!(!chair.is_feasible());

        // 椅腳需求日 = 0，提前期 2
        let legs = ledger.orders_for("LEGS").next().unwrap();
        assert_eq!(legs.planned_day, 0);
        assert_eq!(legs.lead_time_overrun_days, 2);

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_lead_time_overrun_is_rejected() {
        let bom = chair_bom();
        let config = PlanningConfig::new().with_lead_time_policy(LeadTimePolicy::Reject);
        let engine = ExplosionEngine::new(&bom, &config);
        let mut catalog = chair_catalog();
        let mut ledger = ScheduleLedger::new();

        let err = engine
            .explode(&mut catalog, &mut ledger, &Demand::sales_order("CHAIR", d(15), 2))
            .unwrap_err();

        assert_eq!(
            err,
            MrpError::LeadTimeOverrun {
                item_id: "CHAIR".to_string(),
                due_day: 2,
                lead_time: 5,
                overrun_days: 3,
            }
        );
        assert!(ledger.is_empty());
    }
}
