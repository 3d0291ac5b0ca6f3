//! Order list operations and statistics.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use merchify_core::{DealStatus, OrderId, Price};

use super::{DashboardStore, StoreError};
use crate::models::Order;

/// Status filter for the order list.
///
/// Deserializes from `"all"` or any [`DealStatus`] name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(DealStatus),
}

impl StatusFilter {
    /// Whether an order with `status` passes the filter.
    #[must_use]
    pub fn accepts(self, status: DealStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.is_empty() || s == "all" {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => "all".to_string(),
            StatusFilter::Only(status) => status.as_str().to_string(),
        }
    }
}

/// Order pipeline statistics, derived from the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    /// Orders created on the current calendar day.
    pub total_today: usize,
    /// Orders still open (lead or negotiation).
    pub active_leads: usize,
    /// Orders in negotiation.
    pub pending_orders: usize,
    /// Orders confirmed.
    pub confirmed_orders: usize,
    /// Sum of confirmed order totals.
    pub revenue: Price,
}

impl OrderStats {
    /// Compute statistics; "today" is the calendar day of `now` in its own
    /// timezone.
    #[must_use]
    pub fn compute<Tz: TimeZone>(orders: &[Order], now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        let tz = now.timezone();
        let count = |status: DealStatus| orders.iter().filter(|o| o.status == status).count();

        Self {
            total_today: orders
                .iter()
                .filter(|o| o.created_at.with_timezone(&tz).date_naive() == today)
                .count(),
            active_leads: orders.iter().filter(|o| o.status.is_active()).count(),
            pending_orders: count(DealStatus::Negotiation),
            confirmed_orders: count(DealStatus::Confirmed),
            revenue: orders
                .iter()
                .filter(|o| o.status == DealStatus::Confirmed)
                .map(|o| o.total_amount)
                .sum(),
        }
    }
}

impl DashboardStore {
    /// Orders whose customer name or ID contains `term` (ignoring case) and
    /// whose status passes `filter`, in stored order.
    #[must_use]
    pub fn list_orders(&self, term: &str, filter: StatusFilter) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.matches(term) && filter.accepts(o.status))
            .collect()
    }

    /// Look up one order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no order has this ID.
    pub fn get_order(&self, id: &OrderId) -> Result<&Order, StoreError> {
        self.orders
            .iter()
            .find(|o| &o.id == id)
            .ok_or_else(|| StoreError::not_found("order", id))
    }

    /// Statistics over every stored order.
    #[must_use]
    pub fn order_stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> OrderStats {
        OrderStats::compute(&self.orders, now)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;

    use chrono::{Duration, FixedOffset, Utc};

    use super::*;
    use crate::models::LineItem;
    use crate::seed;

    fn order(id: &str, status: DealStatus, cents: u32, created: DateTime<Utc>) -> Order {
        Order::new(
            id,
            "+51 900 000 000",
            "Cliente",
            vec![LineItem::new(
                "Producto",
                NonZeroU32::new(1).unwrap(),
                Price::from_cents(cents),
            )],
            status,
            created,
        )
    }

    #[test]
    fn test_stats_example() {
        let now = Utc::now();
        let orders = vec![
            order("A", DealStatus::Confirmed, 3000, now),
            order("B", DealStatus::Confirmed, 2000, now),
            order("C", DealStatus::Lead, 1000, now),
            order("D", DealStatus::Cancelled, 1000, now),
        ];
        let stats = OrderStats::compute(&orders, &now);

        assert_eq!(stats.confirmed_orders, 2);
        assert_eq!(stats.revenue, Price::from_cents(5000));
        assert_eq!(stats.revenue.to_string(), "$50.00");
        assert_eq!(stats.active_leads, 1);
        assert_eq!(stats.pending_orders, 0);
        assert_eq!(stats.total_today, 4);
    }

    #[test]
    fn test_stats_empty() {
        let stats = OrderStats::compute(&[], &Utc::now());
        assert_eq!(stats.total_today, 0);
        assert_eq!(stats.revenue, Price::ZERO);
    }

    #[test]
    fn test_today_uses_callers_timezone() {
        // 2026-03-10 03:00 UTC is still 2026-03-09 in Lima (UTC-5).
        let created = Utc.with_ymd_and_hms(2026, 3, 10, 3, 0, 0).unwrap();
        let orders = vec![order("A", DealStatus::Lead, 100, created)];

        let lima = FixedOffset::west_opt(5 * 3600).unwrap();
        let evening_in_lima = lima.with_ymd_and_hms(2026, 3, 9, 23, 0, 0).unwrap();
        let noon_utc = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

        assert_eq!(OrderStats::compute(&orders, &evening_in_lima).total_today, 1);
        assert_eq!(OrderStats::compute(&orders, &noon_utc).total_today, 1);
        assert_eq!(
            OrderStats::compute(&orders, &(noon_utc + Duration::days(1))).total_today,
            0
        );
    }

    #[test]
    fn test_filter_by_status_and_search() {
        let store = seed::store(Utc::now());

        assert_eq!(store.list_orders("", StatusFilter::All).len(), 4);

        let confirmed = store.list_orders("", StatusFilter::Only(DealStatus::Confirmed));
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id.as_str(), "ORD-001");

        let by_id = store.list_orders("ord-003", StatusFilter::All);
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].customer_name, "Ana Martínez");

        assert!(
            store
                .list_orders("ana", StatusFilter::Only(DealStatus::Confirmed))
                .is_empty()
        );
    }

    #[test]
    fn test_seed_stats() {
        let now = Utc::now();
        let stats = seed::store(now).order_stats(&now);
        assert_eq!(stats.active_leads, 2);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.confirmed_orders, 1);
        assert_eq!(stats.revenue, Price::from_cents(14997));
    }

    #[test]
    fn test_status_filter_parsing() {
        let all: StatusFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(all, StatusFilter::All);
        let lead: StatusFilter = serde_json::from_str("\"lead\"").unwrap();
        assert_eq!(lead, StatusFilter::Only(DealStatus::Lead));
        assert!(serde_json::from_str::<StatusFilter>("\"shipped\"").is_err());
    }

    #[test]
    fn test_get_order_not_found() {
        let store = seed::store(Utc::now());
        assert!(store.get_order(&OrderId::new("ORD-001")).is_ok());
        assert!(matches!(
            store.get_order(&OrderId::new("ORD-999")),
            Err(StoreError::NotFound { entity: "order", .. })
        ));
    }
}
