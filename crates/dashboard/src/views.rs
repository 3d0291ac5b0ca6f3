//! View adapters: labels, formatting and list-row projections.
//!
//! Everything here is pure. Times are rendered in the timezone of the `now`
//! argument so callers decide which calendar the user sees.

use std::fmt::Display;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use merchify_core::{ConversationId, DealStatus, OrderId, Price, ProductId};

use crate::models::{Conversation, Order, Product};

/// Short Spanish month names, January first.
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Visual style of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeVariant {
    Warning,
    Info,
    Success,
    Danger,
}

/// Label and style for a deal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub variant: BadgeVariant,
}

/// Badge shown next to a conversation or order.
#[must_use]
pub const fn status_badge(status: DealStatus) -> StatusBadge {
    let (label, variant) = match status {
        DealStatus::Lead => ("Lead", BadgeVariant::Warning),
        DealStatus::Negotiation => ("Negociando", BadgeVariant::Info),
        DealStatus::Confirmed => ("Confirmado", BadgeVariant::Success),
        DealStatus::Cancelled => ("Cancelado", BadgeVariant::Danger),
    };
    StatusBadge { label, variant }
}

fn month_es(month0: u32) -> &'static str {
    usize::try_from(month0)
        .ok()
        .and_then(|i| MONTHS_ES.get(i))
        .copied()
        .unwrap_or_default()
}

fn short_date<Tz: TimeZone>(local: &DateTime<Tz>) -> String {
    format!("{:02} {}", local.day(), month_es(local.month0()))
}

/// `HH:MM` in the timezone of `now`.
#[must_use]
pub fn format_time<Tz>(ts: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(&now.timezone()).format("%H:%M").to_string()
}

/// Time of day when `ts` falls on the same calendar day as `now`, otherwise
/// a short date such as `05 oct`.
#[must_use]
pub fn format_relative<Tz>(ts: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = ts.with_timezone(&now.timezone());
    if local.date_naive() == now.date_naive() {
        local.format("%H:%M").to_string()
    } else {
        short_date(&local)
    }
}

/// Order timestamp such as `05 oct, 14:05`.
#[must_use]
pub fn format_order_date<Tz>(ts: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = ts.with_timezone(&now.timezone());
    format!("{}, {}", short_date(&local), local.format("%H:%M"))
}

/// Dollar amount with exactly two decimals.
#[must_use]
pub fn format_currency(amount: Price) -> String {
    amount.to_string()
}

/// Stock count, or "Agotado" when nothing is left.
#[must_use]
pub fn stock_label(stock: u32) -> String {
    if stock == 0 {
        "Agotado".to_string()
    } else {
        stock.to_string()
    }
}

// =============================================================================
// List rows
// =============================================================================

/// One line of the conversation inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationListItem {
    pub id: ConversationId,
    pub customer_name: String,
    pub phone_number: String,
    pub last_message: String,
    pub time: String,
    pub unread: u32,
    pub badge: StatusBadge,
}

impl ConversationListItem {
    #[must_use]
    pub fn project<Tz>(conversation: &Conversation, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: conversation.id.clone(),
            customer_name: conversation.customer_name.clone(),
            phone_number: conversation.phone_number.clone(),
            last_message: conversation.last_message().to_string(),
            time: format_relative(conversation.timestamp(), now),
            unread: conversation.unread,
            badge: status_badge(conversation.status),
        }
    }
}

/// One line of the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub id: OrderId,
    pub customer_name: String,
    pub phone_number: String,
    /// Product names joined with commas.
    pub products: String,
    pub total: String,
    pub date: String,
    pub badge: StatusBadge,
}

impl OrderRow {
    #[must_use]
    pub fn project<Tz>(order: &Order, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: order.id.clone(),
            customer_name: order.customer_name.clone(),
            phone_number: order.phone_number.clone(),
            products: order
                .items
                .iter()
                .map(|item| item.product_name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            total: format_currency(order.total_amount),
            date: format_order_date(order.created_at, now),
            badge: status_badge(order.status),
        }
    }
}

/// One card of the product grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub active: bool,
    pub out_of_stock: bool,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: format_currency(product.price),
            stock: stock_label(product.stock),
            active: product.active,
            out_of_stock: product.is_out_of_stock(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::seed;

    #[test]
    fn test_status_badge_labels() {
        let labels: Vec<&str> = DealStatus::ALL
            .iter()
            .map(|s| status_badge(*s).label)
            .collect();
        assert_eq!(labels, vec!["Lead", "Negociando", "Confirmado", "Cancelado"]);
        assert_eq!(
            status_badge(DealStatus::Confirmed).variant,
            BadgeVariant::Success
        );
    }

    #[test]
    fn test_format_time_uses_callers_offset() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 5, 19, 5, 0).unwrap();
        let lima = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = lima.with_ymd_and_hms(2026, 10, 5, 20, 0, 0).unwrap();
        assert_eq!(format_time(ts, &now), "14:05");
        assert_eq!(format_time(ts, &Utc::now()), "19:05");
    }

    #[test]
    fn test_format_relative_same_day_and_earlier() {
        let now = Utc.with_ymd_and_hms(2026, 10, 6, 12, 0, 0).unwrap();
        let this_morning = Utc.with_ymd_and_hms(2026, 10, 6, 8, 30, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2026, 10, 5, 23, 59, 0).unwrap();
        let september = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();

        assert_eq!(format_relative(this_morning, &now), "08:30");
        assert_eq!(format_relative(yesterday, &now), "05 oct");
        assert_eq!(format_relative(september, &now), "01 sept");
    }

    #[test]
    fn test_format_order_date() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 5, 14, 5, 0).unwrap();
        assert_eq!(format_order_date(ts, &Utc::now()), "05 ene, 14:05");
    }

    #[test]
    fn test_format_currency_two_decimals() {
        assert_eq!(format_currency(Price::from_cents(14997)), "$149.97");
        assert_eq!(format_currency(Price::from_cents(5000)), "$50.00");
        assert_eq!(format_currency(Price::ZERO), "$0.00");
    }

    #[test]
    fn test_stock_label() {
        assert_eq!(stock_label(0), "Agotado");
        assert_eq!(stock_label(45), "45");
    }

    #[test]
    fn test_row_projections_from_seed() {
        let now = Utc::now();
        let store = seed::store(now);

        let first = store.list_conversations("").first().copied().unwrap();
        let item = ConversationListItem::project(first, &now);
        assert_eq!(item.customer_name, "María García");
        assert_eq!(item.unread, 2);
        assert_eq!(item.badge.label, "Negociando");

        let order = store.list_orders("ORD-001", Default::default())[0];
        let row = OrderRow::project(order, &now);
        assert_eq!(row.products, "Camiseta Premium, Zapatillas Running Pro");
        assert_eq!(row.total, "$149.97");
        assert_eq!(row.badge.label, "Confirmado");

        let mochila = store.list_products("mochila")[0];
        let row = ProductRow::from(mochila);
        assert_eq!(row.stock, "Agotado");
        assert!(row.out_of_stock);
        assert!(!row.active);
    }
}
