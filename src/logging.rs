//! 日誌系統初始化（tracing + tracing-subscriber）

use tracing_subscriber::{fmt, EnvFilter};

/// 未設定 RUST_LOG 時的過濾規則
const DEFAULT_FILTER: &str = "info";

/// 測試時開啟計算 crate 的逐步展開日誌
const TEST_FILTER: &str = "info,mrp_calc=debug,mrp_core=debug,mrp_planner=debug";

/// 初始化日誌系統
///
/// # 環境變數
/// - RUST_LOG: 日誌級別過濾器（預設: info）
///   - `RUST_LOG=mrp_calc=debug`：逐階展開過程（淨算、批量、開工日、子件需求）
///   - `RUST_LOG=mrp_calc::calculator=info`：只看每次計算的開始與結束
///
/// # 範例
/// ```no_run
/// use mrp_planner::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 初始化測試環境的日誌系統（可重複呼叫）
///
/// 輸出經由 test writer，只在測試失敗或 `--nocapture` 時顯示。
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(TEST_FILTER))
        .with_test_writer()
        .try_init();
}
