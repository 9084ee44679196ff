//! BOM 圖模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{MrpError, Result};

/// BOM 關係（父件 -> 子件）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomEdge {
    /// 父件ID
    pub parent_id: String,

    /// 子件ID
    pub component_id: String,

    /// 每單位父件的子件用量
    pub quantity: Decimal,
}

impl BomEdge {
    pub fn new(
        parent_id: impl Into<String>,
        component_id: impl Into<String>,
        quantity: Decimal,
    ) -> Self {
        Self {
            parent_id: parent_id.into(),
            component_id: component_id.into(),
            quantity,
        }
    }
}

/// BOM 圖
///
/// 子件按宣告順序保存；展開時兄弟子件依此順序處理，
/// 而每次展開都會修改共用庫存，所以順序會影響結果。
/// 圖必須無循環，允許共用子件（DAG）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BomEdge>", into = "Vec<BomEdge>")]
pub struct BomGraph {
    components: HashMap<String, Vec<BomEdge>>,

    /// 父件的宣告順序
    parent_order: Vec<String>,
}

impl BomGraph {
    /// 創建空的 BOM 圖
    pub fn new() -> Self {
        Self::default()
    }

    /// 由 BOM 關係清單建立
    pub fn from_edges(edges: impl IntoIterator<Item = BomEdge>) -> Result<Self> {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }

    /// 添加子件
    pub fn add_component(
        &mut self,
        parent_id: impl Into<String>,
        component_id: impl Into<String>,
        quantity: Decimal,
    ) -> Result<()> {
        self.add_edge(BomEdge::new(parent_id, component_id, quantity))
    }

    /// 添加 BOM 關係
    pub fn add_edge(&mut self, edge: BomEdge) -> Result<()> {
        let invalid = |reason: &str| MrpError::InvalidBomEdge {
            parent_id: edge.parent_id.clone(),
            component_id: edge.component_id.clone(),
            reason: reason.to_string(),
        };

        if edge.quantity <= Decimal::ZERO {
            return Err(invalid("用量必須大於 0"));
        }
        if edge.parent_id == edge.component_id {
            return Err(invalid("物料不可作為自身的子件"));
        }

        let siblings = self.components.entry(edge.parent_id.clone()).or_default();
        if siblings.iter().any(|e| e.component_id == edge.component_id) {
            return Err(invalid("重複的子件"));
        }
        if siblings.is_empty() {
            self.parent_order.push(edge.parent_id.clone());
        }
        siblings.push(edge);

        Ok(())
    }

    /// 取得子件清單（宣告順序），無 BOM 的物料返回空切片
    pub fn components_of(&self, item_id: &str) -> &[BomEdge] {
        self.components
            .get(item_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 是否為外購件/原材料（無子件）
    pub fn is_leaf(&self, item_id: &str) -> bool {
        self.components_of(item_id).is_empty()
    }

    /// 反查使用該物料的父件
    pub fn parents(&self, component_id: &str) -> Vec<&str> {
        self.edges()
            .filter(|e| e.component_id == component_id)
            .map(|e| e.parent_id.as_str())
            .collect()
    }

    /// 所有 BOM 關係（依父件宣告順序）
    pub fn edges(&self) -> impl Iterator<Item = &BomEdge> {
        self.parent_order
            .iter()
            .flat_map(move |parent| self.components_of(parent).iter())
    }

    pub fn edge_count(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    /// 檢查整個 BOM 圖是否無循環
    ///
    /// 發現循環時返回 [`MrpError::CyclicBom`]，路徑首尾為同一物料。
    pub fn validate_acyclic(&self) -> Result<()> {
        let mut finished: HashSet<&str> = HashSet::new();

        for root in &self.parent_order {
            if finished.contains(root.as_str()) {
                continue;
            }

            // (物料, 下一個待訪問子件的索引)
            let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
            let mut on_path: HashSet<&str> = HashSet::from([root.as_str()]);

            while let Some(top) = stack.last_mut() {
                let item_id = top.0;
                let index = top.1;
                top.1 += 1;

                let Some(edge) = self.components_of(item_id).get(index) else {
                    on_path.remove(item_id);
                    finished.insert(item_id);
                    stack.pop();
                    continue;
                };

                let child = edge.component_id.as_str();
                if on_path.contains(child) {
                    let start = stack
                        .iter()
                        .position(|(id, _)| *id == child)
                        .unwrap_or(0);
                    let mut path: Vec<String> =
                        stack[start..].iter().map(|(id, _)| id.to_string()).collect();
                    path.push(child.to_string());
                    return Err(MrpError::CyclicBom { path });
                }
                if !finished.contains(child) {
                    on_path.insert(child);
                    stack.push((child, 0));
                }
            }
        }

        Ok(())
    }
}

impl TryFrom<Vec<BomEdge>> for BomGraph {
    type Error = MrpError;

    fn try_from(edges: Vec<BomEdge>) -> Result<Self> {
        Self::from_edges(edges)
    }
}

impl From<BomGraph> for Vec<BomEdge> {
    fn from(graph: BomGraph) -> Self {
        graph.edges().cloned().collect()
    }
}
