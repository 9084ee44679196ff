//! 淨需求計算

use mrp_core::MrpError;
use rust_decimal::Decimal;

/// 淨需求計算結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetRequirement {
    /// 毛需求
    pub gross_requirement: Decimal,
    /// 淨算時的現有庫存
    pub on_hand: Decimal,
    /// 安全庫存
    pub safety_stock: Decimal,
    /// 淨需求
    pub net_requirement: Decimal,
}

impl NetRequirement {
    /// 是否需要產生計劃訂單
    pub fn has_shortage(&self) -> bool {
        self.net_requirement > Decimal::ZERO
    }
}

/// 淨需求計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 計算淨需求
    ///
    /// 淨需求 = max(0, 毛需求 - 現有庫存 - 安全庫存)。
    /// 零或負的毛需求自然得到 0，不視為錯誤；數值溢位返回 `CalculationError`。
    pub fn calculate(
        gross_requirement: Decimal,
        on_hand: Decimal,
        safety_stock: Decimal,
    ) -> mrp_core::Result<NetRequirement> {
        let net_requirement = gross_requirement
            .checked_sub(on_hand)
            .and_then(|rest| rest.checked_sub(safety_stock))
            .ok_or_else(|| {
                MrpError::CalculationError(format!(
                    "淨需求計算溢位: {} - {} - {}",
                    gross_requirement, on_hand, safety_stock
                ))
            })?
            .max(Decimal::ZERO);

        Ok(NetRequirement {
            gross_requirement,
            on_hand,
            safety_stock,
            net_requirement,
        })
    }
}
