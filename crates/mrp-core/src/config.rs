//! 計劃運算配置

use serde::{Deserialize, Serialize};

/// 提前期超出需求日時的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeadTimePolicy {
    /// 計劃日截斷為第 0 天，在訂單上標記超出天數並產生警告
    #[default]
    Flag,
    /// 視為不可行計劃，中止運算
    Reject,
}

/// 計劃運算配置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// 提前期超出處理方式
    pub lead_time_policy: LeadTimePolicy,

    /// BOM 展開深度上限（None 表示僅靠循環檢測）
    pub max_depth: Option<usize>,
}

impl PlanningConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置提前期超出處理方式
    pub fn with_lead_time_policy(mut self, policy: LeadTimePolicy) -> Self {
        self.lead_time_policy = policy;
        self
    }

    /// 建構器模式：設置展開深度上限
    ///
    /// # 範例
    /// ```
    /// # use mrp_core::PlanningConfig;
    /// let config = PlanningConfig::new().with_max_depth(32);
    /// assert_eq!(config.max_depth, Some(32));
    /// ```
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// 是否拒絕提前期超出的計劃
    pub fn rejects_lead_time_overrun(&self) -> bool {
        self.lead_time_policy == LeadTimePolicy::Reject
    }
}
