//! 固定批量規則

use mrp_core::MrpError;
use rust_decimal::Decimal;

/// 批量計算結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotPlan {
    /// 批數
    pub lots: Decimal,
    /// 計劃數量 = 批數 × 批量
    pub quantity: Decimal,
}

/// 批量規則計算器
pub struct LotSizingCalculator;

impl LotSizingCalculator {
    /// 應用固定批量：取覆蓋淨需求的最小批量整數倍
    ///
    /// 例如淨需求 15、批量 10 時計劃 20（2 批）。淨需求不為正時返回 0 批。
    pub fn apply(net_requirement: Decimal, lot_size: Decimal) -> mrp_core::Result<LotPlan> {
        if lot_size <= Decimal::ZERO {
            return Err(MrpError::CalculationError(format!(
                "批量必須大於 0，實際為 {}",
                lot_size
            )));
        }

        if net_requirement <= Decimal::ZERO {
            return Ok(LotPlan {
                lots: Decimal::ZERO,
                quantity: Decimal::ZERO,
            });
        }

        let overflow = || {
            MrpError::CalculationError(format!(
                "批量計算溢位: 淨需求 {}, 批量 {}",
                net_requirement, lot_size
            ))
        };
        let lots = net_requirement
            .checked_div(lot_size)
            .ok_or_else(overflow)?
            .ceil();
        let quantity = lots.checked_mul(lot_size).ok_or_else(overflow)?;

        Ok(LotPlan { lots, quantity })
    }
}
