//! Flat join rows and their grouping into order aggregates.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::order::{Order, OrderItem, ReconstitutedOrderParams};
use crate::domain::shared::{ItemId, Money, OrderId, Quantity};

/// One row of the orders ⟕ items join.
#[derive(Debug, Clone)]
pub struct OrderRow {
    /// Order identifier.
    pub order_id: OrderId,
    /// Client name.
    pub client: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Item columns; `None` for an order without items.
    pub item: Option<ItemRow>,
}

/// Item columns of a join row.
#[derive(Debug, Clone)]
pub struct ItemRow {
    /// Item identifier.
    pub id: ItemId,
    /// Product name.
    pub product: String,
    /// Quantity.
    pub quantity: Quantity,
    /// Unit price.
    pub unit_price: Money,
}

/// Fold join rows into order aggregates.
///
/// Orders appear in the order their first row was seen; every row of an
/// order contributes at most one item and never a second order header.
pub fn group_rows(rows: impl IntoIterator<Item = OrderRow>) -> Vec<Order> {
    let mut index: HashMap<OrderId, usize> = HashMap::new();
    let mut grouped: Vec<ReconstitutedOrderParams> = Vec::new();

    for row in rows {
        let slot = if let Some(&slot) = index.get(&row.order_id) {
            slot
        } else {
            grouped.push(ReconstitutedOrderParams {
                id: row.order_id,
                client: row.client,
                order_date: row.order_date,
                items: Vec::new(),
            });
            index.insert(row.order_id, grouped.len() - 1);
            grouped.len() - 1
        };

        if let Some(item) = row.item {
            grouped[slot].items.push(OrderItem::reconstitute(
                item.id,
                row.order_id,
                item.product,
                item.quantity,
                item.unit_price,
            ));
        }
    }

    grouped.into_iter().map(Order::reconstitute).collect()
}
