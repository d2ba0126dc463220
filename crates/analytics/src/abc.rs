//! ABC classification by cumulative share of total sales.

use crate::model::{AbcClass, ItemAnalytics};

/// Cumulative share (percent, inclusive) up to which items are class A.
pub const CLASS_A_LIMIT: f64 = 80.0;

/// Cumulative share (percent, inclusive) up to which items are class B.
pub const CLASS_B_LIMIT: f64 = 95.0;

/// Order in which items are walked when accumulating the sales share.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AbcOrder {
    /// Walk items in the order the result list was enumerated (sales-aggregate
    /// insertion order). This is how existing reports were produced.
    #[default]
    AsEnumerated,
    /// Walk items by sales amount, largest first (textbook Pareto ordering).
    SalesDescending,
}

/// Tier for a cumulative share in percent.
pub fn class_for_share(share: f64) -> AbcClass {
    if share <= CLASS_A_LIMIT {
        AbcClass::A
    } else if share <= CLASS_B_LIMIT {
        AbcClass::B
    } else {
        AbcClass::C
    }
}

/// Assign ABC labels walking `items` in their current order.
///
/// The running cumulative sum depends on the walk order, so the caller
/// decides the order. When total sales are not positive, nothing is labelled.
pub fn classify(items: &mut [ItemAnalytics]) {
    let total: f64 = items.iter().map(|i| i.sales).sum();
    if total <= 0.0 {
        return;
    }

    let mut cumulative = 0.0;
    for item in items.iter_mut() {
        cumulative += item.sales;
        item.abc = Some(class_for_share(cumulative / total * 100.0));
    }
}

/// Assign ABC labels walking items in `order`, leaving `items` in its original order.
pub fn classify_in_order(items: &mut [ItemAnalytics], order: AbcOrder) {
    match order {
        AbcOrder::AsEnumerated => classify(items),
        AbcOrder::SalesDescending => {
            let mut ranked: Vec<usize> = (0..items.len()).collect();
            ranked.sort_by(|&a, &b| items[b].sales.total_cmp(&items[a].sales));

            let total: f64 = items.iter().map(|i| i.sales).sum();
            if total <= 0.0 {
                return;
            }
            let mut cumulative = 0.0;
            for idx in ranked {
                cumulative += items[idx].sales;
                items[idx].abc = Some(class_for_share(cumulative / total * 100.0));
            }
        }
    }
}
