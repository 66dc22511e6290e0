//! Plain-text order listing.

use std::io::{self, Write};

use crate::application::dto::OrderDto;

/// Write every order followed by its items.
///
/// ```text
/// Order 1 - Client: Ana - Date: 2024-05-01
///   Product: Phone, Quantity: 1, Price: 1500.00
/// ```
pub fn write_report<W: Write>(orders: &[OrderDto], out: &mut W) -> io::Result<()> {
    if orders.is_empty() {
        writeln!(out, "No orders registered.")?;
        return Ok(());
    }
    for order in orders {
        writeln!(
            out,
            "Order {} - Client: {} - Date: {}",
            order.id, order.client, order.order_date
        )?;
        for item in &order.items {
            writeln!(
                out,
                "  Product: {}, Quantity: {}, Price: {:.2}",
                item.product, item.quantity, item.unit_price
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ItemDto;
    use crate::domain::shared::{ItemId, OrderId};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn lists_orders_with_items() {
        let orders = vec![
            OrderDto {
                id: OrderId::new(1),
                client: "Ana".to_string(),
                order_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                items: vec![ItemDto {
                    id: ItemId::new(1),
                    order_id: OrderId::new(1),
                    product: "Phone".to_string(),
                    quantity: 1,
                    unit_price: dec!(1500),
                }],
            },
            OrderDto {
                id: OrderId::new(2),
                client: "Bruno".to_string(),
                order_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                items: vec![],
            },
        ];

        let mut out = Vec::new();
        write_report(&orders, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Order 1 - Client: Ana - Date: 2024-05-01\n\
             \x20 Product: Phone, Quantity: 1, Price: 1500.00\n\
             Order 2 - Client: Bruno - Date: 2024-05-02\n"
        );
    }

    #[test]
    fn empty_listing() {
        let mut out = Vec::new();
        write_report(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No orders registered.\n");
    }
}
