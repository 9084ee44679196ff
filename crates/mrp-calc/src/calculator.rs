//! MRP 主計算器

use mrp_core::{BomGraph, Demand, ItemCatalog, PlanningConfig, ScheduleLedger};

use crate::explosion::ExplosionEngine;
use crate::pegging::PeggingCalculator;
use crate::PlanResult;

/// MRP 計算器（計劃驅動器）
pub struct MrpCalculator {
    /// BOM 圖
    bom_graph: BomGraph,

    /// 計劃運算配置
    config: PlanningConfig,
}

impl MrpCalculator {
    /// 創建新的 MRP 計算器（預設配置）
    pub fn new(bom_graph: BomGraph) -> Self {
        Self {
            bom_graph,
            config: PlanningConfig::default(),
        }
    }

    /// 建構器模式：設置計劃運算配置
    pub fn with_config(mut self, config: PlanningConfig) -> Self {
        self.config = config;
        self
    }

    /// 主 MRP 計算入口
    ///
    /// 依序逐筆展開需求（同一物料的多筆需求各自展開，不合併），
    /// 每筆需求連同其所有子件完整展開後才處理下一筆。結果依需求順序而定。
    ///
    /// 運算在 `catalog` 的副本上進行，成功後才寫回；失敗時呼叫端的庫存保持不變。
    pub fn calculate(
        &self,
        catalog: &mut ItemCatalog,
        demands: &[Demand],
    ) -> mrp_core::Result<PlanResult> {
        tracing::info!(
            "開始 MRP 計算：需求 {} 筆，物料 {} 筆，BOM 關係 {} 筆",
            demands.len(),
            catalog.len(),
            self.bom_graph.edge_count()
        );

        let start_time = std::time::Instant::now();

        let engine = ExplosionEngine::new(&self.bom_graph, &self.config);
        let mut working_catalog = catalog.clone();
        let mut ledger = ScheduleLedger::new();
        let mut result = PlanResult::empty();

        for demand in demands {
            tracing::debug!(
                "展開需求 {}: 物料 {}, 數量 {}, 需求日 {}",
                demand.id,
                demand.item_id,
                demand.quantity,
                demand.due_day
            );

            let warnings = engine
                .explode(&mut working_catalog, &mut ledger, demand)
                .map_err(|err| {
                    tracing::error!("需求 {} 展開失敗: {}", demand.id, err);
                    err
                })?;
            for warning in warnings {
                result.add_warning(warning);
            }
        }

        ledger.finalize();
        *catalog = working_catalog;

        result.pegging = PeggingCalculator::summarize(ledger.orders());
        result.ledger = ledger;
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("MRP 計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!("計劃訂單數量: {}", result.ledger.len());

        Ok(result)
    }

    /// 獲取 BOM 圖引用
    pub fn bom_graph(&self) -> &BomGraph {
        &self.bom_graph
    }

    /// 獲取計劃運算配置
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }
}
