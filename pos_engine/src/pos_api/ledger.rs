//! The order totals ledger.
//!
//! The payments platform computes every amount on an order. The ledger records those amounts when the order is
//! created, and from then on only `paid` and `tips` change, as payments are applied. An order is closed as soon as
//! `paid` reaches `due`, and stays closed.
use chrono::{DateTime, Utc};
use pos_common::Money;

use crate::{
    db_types::{Discount, Modifier, Order, OrderItem, OrderTotals},
    order_objects::{NewOrder, NewOrderItem},
    traits::{RemoteLineItem, RemoteOrderResult, RemoteOrderState, RemoteTotals},
};

/// True when the order has been paid in full.
pub fn recompute_closed_state(totals: &OrderTotals) -> bool {
    totals.paid >= totals.due
}

/// The initial ledger for a freshly created remote order. Nothing has been paid locally yet, so `paid` starts at
/// zero regardless of what the platform reports.
pub fn totals_from_remote(order_id: &str, remote: &RemoteTotals) -> OrderTotals {
    OrderTotals {
        order_id: order_id.to_string(),
        discounts: remote.discounts,
        due: remote.due,
        tax: remote.tax,
        service_charge: remote.service_charge,
        paid: Money::zero(),
        tips: remote.tips,
        total: remote.total,
    }
}

/// Assembles the local record for an order that the platform has just created.
///
/// Items are kept as submitted, with the platform's line, discount and modifier amounts attached by position. If the
/// platform omits a line, its amount falls back to `unit_price * quantity`.
pub fn build_order(
    restaurant_id: i64,
    new_order: &NewOrder,
    remote: &RemoteOrderResult,
    opened_at: DateTime<Utc>,
) -> Order {
    let order_id = remote.order_id.clone();
    let items = new_order
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| build_item(&order_id, i, item, remote.line_items.get(i)))
        .collect();
    let totals = totals_from_remote(&order_id, &remote.totals);
    let is_closed = remote.state == RemoteOrderState::Completed || recompute_closed_state(&totals);
    Order {
        id: order_id,
        restaurant_id,
        table_number: new_order.table_number.clone(),
        is_closed,
        remote_state: remote.state.to_string(),
        opened_at,
        closed_at: is_closed.then_some(opened_at),
        items,
        totals,
    }
}

fn build_item(order_id: &str, position: usize, item: &NewOrderItem, remote: Option<&RemoteLineItem>) -> OrderItem {
    let amount = remote.map(|r| r.amount).unwrap_or_else(|| item.unit_price * item.quantity);
    let discounts = item
        .discounts
        .iter()
        .enumerate()
        .map(|(j, d)| Discount {
            name: d.name.clone(),
            is_percentage: d.is_percentage,
            value: d.value,
            amount: remote.and_then(|r| r.discount_amounts.get(j).copied()).unwrap_or_default(),
            ..Default::default()
        })
        .collect();
    let modifiers = item
        .modifiers
        .iter()
        .enumerate()
        .map(|(j, m)| Modifier {
            name: m.name.clone(),
            unit_price: m.unit_price,
            quantity: m.quantity,
            amount: remote
                .and_then(|r| r.modifier_amounts.get(j).copied())
                .unwrap_or_else(|| m.unit_price * m.quantity),
            ..Default::default()
        })
        .collect();
    #[allow(clippy::cast_possible_wrap)]
    let position = position as i64;
    OrderItem {
        order_id: order_id.to_string(),
        position,
        name: item.name.clone(),
        comment: item.comment.clone(),
        unit_price: item.unit_price,
        quantity: item.quantity,
        amount,
        discounts,
        modifiers,
        ..Default::default()
    }
}
