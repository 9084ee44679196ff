//! 需求追溯

use mrp_core::ProductionOrder;
use std::collections::HashMap;
use uuid::Uuid;

/// 需求追溯計算器
pub struct PeggingCalculator;

impl PeggingCalculator {
    /// 依獨立需求彙總計劃訂單（值為訂單產生順序，遞增）
    pub fn summarize(orders: &[ProductionOrder]) -> HashMap<Uuid, Vec<usize>> {
        let mut pegging: HashMap<Uuid, Vec<usize>> = HashMap::new();
        for order in orders {
            pegging
                .entry(order.pegging.demand_id)
                .or_default()
                .push(order.sequence);
        }
        for sequences in pegging.values_mut() {
            sequences.sort_unstable();
        }
        pegging
    }

    /// 追溯某筆獨立需求所觸發的所有訂單（依產生順序）
    pub fn trace(orders: &[ProductionOrder], demand_id: Uuid) -> Vec<&ProductionOrder> {
        let mut traced: Vec<_> = orders
            .iter()
            .filter(|order| order.pegging.demand_id == demand_id)
            .collect();
        traced.sort_by_key(|order| order.sequence);
        traced
    }

    /// 追溯經由某父件展開而來的訂單（直接或間接）
    pub fn descendants_of<'a>(
        orders: &'a [ProductionOrder],
        demand_id: Uuid,
        parent_id: &str,
    ) -> Vec<&'a ProductionOrder> {
        Self::trace(orders, demand_id)
            .into_iter()
            .filter(|order| {
                let path = &order.pegging.path;
                path[..path.len().saturating_sub(1)]
                    .iter()
                    .any(|node| node == parent_id)
            })
            .collect()
    }
}
