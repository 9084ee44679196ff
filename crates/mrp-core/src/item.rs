//! 物料主檔模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{MrpError, Result};

fn default_lot_size() -> Decimal {
    Decimal::ONE
}

/// 物料主檔（單次計劃運算期間的庫存與計劃參數）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// 物料ID（目錄反序列化時由映射鍵填入）
    #[serde(default)]
    pub item_id: String,

    /// 現有庫存（計劃過程中唯一會被修改的欄位）
    #[serde(default)]
    pub on_hand: Decimal,

    /// 安全庫存
    #[serde(default)]
    pub safety_stock: Decimal,

    /// 固定批量（計劃數量必須是其整數倍）
    #[serde(default = "default_lot_size")]
    pub lot_size: Decimal,

    /// 提前期（天）
    #[serde(default)]
    pub lead_time: u32,
}

impl Item {
    /// 創建新的物料主檔（無庫存、批量 1、提前期 0）
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            on_hand: Decimal::ZERO,
            safety_stock: Decimal::ZERO,
            lot_size: Decimal::ONE,
            lead_time: 0,
        }
    }

    /// 建構器模式：設置現有庫存
    pub fn with_on_hand(mut self, on_hand: Decimal) -> Self {
        self.on_hand = on_hand;
        self
    }

    /// 建構器模式：設置安全庫存
    pub fn with_safety_stock(mut self, safety_stock: Decimal) -> Self {
        self.safety_stock = safety_stock;
        self
    }

    /// 建構器模式：設置固定批量
    pub fn with_lot_size(mut self, lot_size: Decimal) -> Self {
        self.lot_size = lot_size;
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.lead_time = days;
        self
    }

    /// 檢查參數是否合法
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| MrpError::InvalidItem {
            item_id: self.item_id.clone(),
            reason: reason.to_string(),
        };

        if self.item_id.is_empty() {
            return Err(invalid("物料ID不可為空"));
        }
        if self.on_hand < Decimal::ZERO {
            return Err(invalid("現有庫存不可為負"));
        }
        if self.safety_stock < Decimal::ZERO {
            return Err(invalid("安全庫存不可為負"));
        }
        if self.lot_size <= Decimal::ZERO {
            return Err(invalid("批量必須大於 0"));
        }

        Ok(())
    }
}

/// 物料目錄
///
/// 未登錄的物料一律視為預設主檔（無庫存、批量 1、提前期 0），
/// 也就是可即時取得、不需分批的外購件，而不是錯誤。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "HashMap<String, Item>",
    into = "HashMap<String, Item>"
)]
pub struct ItemCatalog {
    items: HashMap<String, Item>,
}

impl ItemCatalog {
    /// 創建空目錄
    pub fn new() -> Self {
        Self::default()
    }

    /// 由物料清單建立目錄
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item)?;
        }
        Ok(catalog)
    }

    /// 登錄（或覆蓋）物料主檔
    pub fn insert(&mut self, item: Item) -> Result<()> {
        item.validate()?;
        self.items.insert(item.item_id.clone(), item);
        Ok(())
    }

    /// 取得物料主檔，未登錄時返回預設主檔
    pub fn get(&self, item_id: &str) -> Item {
        self.items
            .get(item_id)
            .cloned()
            .unwrap_or_else(|| Item::new(item_id))
    }

    /// 取得現有庫存（未登錄為 0）
    pub fn on_hand(&self, item_id: &str) -> Decimal {
        self.items
            .get(item_id)
            .map(|item| item.on_hand)
            .unwrap_or(Decimal::ZERO)
    }

    /// 增加現有庫存，未登錄時以預設主檔建立
    ///
    /// 溢位時返回 `CalculationError`，庫存保持不變。
    pub fn increase_on_hand(&mut self, item_id: &str, amount: Decimal) -> Result<()> {
        let on_hand = self.on_hand(item_id).checked_add(amount).ok_or_else(|| {
            MrpError::CalculationError(format!("物料 {} 庫存累計溢位", item_id))
        })?;

        self.items
            .entry(item_id.to_string())
            .or_insert_with(|| Item::new(item_id))
            .on_hand = on_hand;
        Ok(())
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.items.contains_key(item_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }
}

impl TryFrom<HashMap<String, Item>> for ItemCatalog {
    type Error = MrpError;

    fn try_from(map: HashMap<String, Item>) -> Result<Self> {
        let mut catalog = Self::new();
        for (item_id, mut item) in map {
            item.item_id = item_id;
            catalog.insert(item)?;
        }
        Ok(catalog)
    }
}

impl From<ItemCatalog> for HashMap<String, Item> {
    fn from(catalog: ItemCatalog) -> Self {
        catalog.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_create_item() {
        let item = Item::new("CHAIR")
            .with_on_hand(Decimal::from(10))
            .with_safety_stock(Decimal::from(5))
            .with_lot_size(Decimal::from(10))
            .with_lead_time(3);

        assert_eq!(item.item_id, "CHAIR");
        assert_eq!(item.lead_time, 3);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn test_unknown_item_returns_defaults() {
        let catalog = ItemCatalog::new();
        let item = catalog.get("SCREW");

        assert_eq!(item.item_id, "SCREW");
        assert_eq!(item.on_hand, Decimal::ZERO);
        assert_eq!(item.safety_stock, Decimal::ZERO);
        assert_eq!(item.lot_size, Decimal::ONE);
        assert_eq!(item.lead_time, 0);
        assert!(!catalog.contains("SCREW"));
    }

    #[test]
    fn test_increase_on_hand() {
        let mut catalog = ItemCatalog::from_items(vec![
            Item::new("LEGS").with_on_hand(Decimal::from(40)).with_lot_size(Decimal::from(20)),
        ])
        .unwrap();

        catalog.increase_on_hand("LEGS", Decimal::from(20)).unwrap();
        assert_eq!(catalog.on_hand("LEGS"), Decimal::from(60));
        // 其他參數保持不變
        assert_eq!(catalog.get("LEGS").lot_size, Decimal::from(20));

        // 未登錄物料：以預設主檔建立
        catalog.increase_on_hand("GLUE", Decimal::from(7)).unwrap();
        assert!(catalog.contains("GLUE"));
        assert_eq!(catalog.on_hand("GLUE"), Decimal::from(7));
        assert_eq!(catalog.get("GLUE").lot_size, Decimal::ONE);
    }

    #[test]
    fn test_increase_on_hand_overflow_keeps_stock() {
        let mut catalog =
            ItemCatalog::from_items(vec![Item::new("BOLT").with_on_hand(Decimal::MAX)]).unwrap();

        let err = catalog.increase_on_hand("BOLT", Decimal::ONE).unwrap_err();

        assert!(matches!(err, MrpError::CalculationError(_)));
        assert_eq!(catalog.on_hand("BOLT"), Decimal::MAX);
    }

    #[rstest]
    #[case(Item::new("X").with_on_hand(Decimal::from(-1)))]
    #[case(Item::new("X").with_safety_stock(Decimal::from(-5)))]
    #[case(Item::new("X").with_lot_size(Decimal::ZERO))]
    #[case(Item::new("X").with_lot_size(Decimal::from(-10)))]
    #[case(Item::new(""))]
    fn test_invalid_items_are_rejected(#[case] item: Item) {
        let mut catalog = ItemCatalog::new();

        let err = catalog.insert(item).unwrap_err();
        assert!(matches!(err, MrpError::InvalidItem { .. }));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_deserialize_catalog_with_defaults() {
        let json = r#"{
            "FRAME": { "on_hand": 10, "safety_stock": 5, "lot_size": 10, "lead_time": 3 },
            "CHAIR": { "lead_time": 5 }
        }"#;

        let catalog: ItemCatalog = serde_json::from_str(json).unwrap();

        assert_eq!(catalog.len(), 2);
        let frame = catalog.get("FRAME");
        assert_eq!(frame.item_id, "FRAME");
        assert_eq!(frame.lot_size, Decimal::from(10));

        let chair = catalog.get("CHAIR");
        assert_eq!(chair.item_id, "CHAIR");
        assert_eq!(chair.on_hand, Decimal::ZERO);
        assert_eq!(chair.lot_size, Decimal::ONE);
        assert_eq!(chair.lead_time, 5);
    }

    #[test]
    fn test_deserialize_rejects_invalid_lot_size() {
        let json = r#"{ "FOAM": { "lot_size": 0 } }"#;

        assert!(serde_json::from_str::<ItemCatalog>(json).is_err());
    }
}
