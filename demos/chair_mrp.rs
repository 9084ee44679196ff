//! 單人沙發 MRP 計算範例
//!
//! 執行：RUST_LOG=mrp_calc=debug cargo run --example chair_mrp

use mrp_planner::prelude::*;
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    mrp_planner::logging::init();

    println!("===== Chair MRP Calculation Example =====\n");

    // 步驟 1: 建立 BOM 結構
    let mut bom = BomGraph::new();
    bom.add_component("CHAIR", "FRAME", Decimal::from(1))?;
    bom.add_component("CHAIR", "LEGS", Decimal::from(4))?;
    bom.add_component("CHAIR", "FABRIC", Decimal::from(3))?;
    bom.add_component("CHAIR", "FOAM", Decimal::from(2))?;
    bom.validate_acyclic()?;
    println!("[1] BOM edges: {}", bom.edge_count());

    // 步驟 2: 物料主檔（庫存、安全庫存、批量、提前期）
    let mut catalog = ItemCatalog::from_items(vec![
        Item::new("CHAIR").with_lead_time(5),
        item("FRAME", 10, 5, 10, 3),
        item("LEGS", 40, 10, 20, 2),
        item("FABRIC", 50, 10, 10, 1),
        item("FOAM", 30, 5, 5, 1),
    ])?;
    println!("[2] Items: {}", catalog.len());

    // 步驟 3: 需求：第 10 天 15 張
    let demands = vec![Demand::sales_order("CHAIR", Decimal::from(15), 10).with_source_ref("SO-001")];
    println!("[3] Demands: {}\n", demands.len());

    // 步驟 4: 執行 MRP
    let result = MrpCalculator::new(bom).calculate(&mut catalog, &demands)?;
    tracing::info!("completed in {} ms", result.calculation_time_ms.unwrap_or(0));

    println!("{:>5} | {:<8} | {:>10} | {:>10}", "Day", "Item", "Gross", "Planned");
    for order in result.orders() {
        println!(
            "{:>5} | {:<8} | {:>10} | {:>10}",
            order.planned_day, order.item_id, order.gross_requirement, order.quantity
        );
    }

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  - [{}] {}", warning.item_id, warning.message);
        }
    }

    Ok(())
}

fn item(item_id: &str, on_hand: i64, safety_stock: i64, lot_size: i64, lead_time: u32) -> Item {
    Item::new(item_id)
        .with_on_hand(Decimal::from(on_hand))
        .with_safety_stock(Decimal::from(safety_stock))
        .with_lot_size(Decimal::from(lot_size))
        .with_lead_time(lead_time)
}
