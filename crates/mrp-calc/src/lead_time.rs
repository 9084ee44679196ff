//! 提前期偏移

/// 提前期偏移結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadTimeOffset {
    /// 計劃開工日（截斷至第 0 天）
    pub planned_day: u32,
    /// 需提前於第 0 天開工的天數
    pub overrun_days: u32,
}

impl LeadTimeOffset {
    pub fn is_feasible(&self) -> bool {
        self.overrun_days == 0
    }
}

/// 交期計算器
pub struct LeadTimeCalculator;

impl LeadTimeCalculator {
    /// 計算計劃開工日（需求日向前推算提前期）
    pub fn offset(due_day: u32, lead_time: u32) -> LeadTimeOffset {
        LeadTimeOffset {
            planned_day: due_day.saturating_sub(lead_time),
            overrun_days: lead_time.saturating_sub(due_day),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 5, 5, 0)]
    #[case(5, 2, 3, 0)]
    #[case(5, 5, 0, 0)]
    #[case(2, 5, 0, 3)]
    #[case(0, 0, 0, 0)]
    fn test_offset(
        #[case] due_day: u32,
        #[case] lead_time: u32,
        #[case] planned_day: u32,
        #[case] overrun_days: u32,
    ) {
        let offset = LeadTimeCalculator::offset(due_day, lead_time);

        assert_eq!(offset.planned_day, planned_day);
        assert_eq!(offset.overrun_days, overrun_days);
        assert_eq!(offset.is_feasible(), overrun_days == 0);
    }

    proptest! {
        #[test]
        fn prop_offset_matches_clamped_difference(due in 0u32..10_000, lead in 0u32..10_000) {
            let offset = LeadTimeCalculator::offset(due, lead);
            let raw = due as i64 - lead as i64;

            prop_assert_eq!(offset.planned_day as i64, raw.max(0));
            prop_assert_eq!(offset.overrun_days as i64, (-raw).max(0));
        }
    }
}
