//! Mock data the dashboard starts with.
//!
//! Timestamps are relative to `now` so the inbox always looks recent.

use std::num::NonZeroU32;

use chrono::{DateTime, Duration, Utc};

use merchify_core::{DealStatus, MessageSender, Price, ProductId};

use crate::models::{Conversation, LineItem, Message, Order, Product, StoreSettings};
use crate::store::DashboardStore;

/// A store populated with every seed collection and default settings.
#[must_use]
pub fn store(now: DateTime<Utc>) -> DashboardStore {
    DashboardStore::new(
        conversations(now),
        orders(now),
        products(),
        StoreSettings::default(),
    )
}

fn minutes_ago(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    now - Duration::minutes(minutes)
}

/// The three seed conversations.
#[must_use]
pub fn conversations(now: DateTime<Utc>) -> Vec<Conversation> {
    use MessageSender::{Assistant, Customer};
    let msg = |id: &str, content: &str, sender, minutes| {
        Message::with_id(id, content, sender, minutes_ago(now, minutes))
    };

    vec![
        Conversation::new(
            "1",
            "+51 999 888 777",
            "María García",
            DealStatus::Negotiation,
            minutes_ago(now, 30),
        )
        .with_unread(2)
        .with_messages([
            msg("m1", "Hola, buenos días! 👋", Customer, 30),
            msg(
                "m2",
                "¡Hola María! 😊 Bienvenida a nuestra tienda. Soy MIA, tu asesora virtual. ¿En qué puedo ayudarte hoy?",
                Assistant,
                28,
            ),
            msg("m3", "Estoy buscando un regalo para mi mamá", Customer, 25),
            msg(
                "m4",
                "¡Qué lindo detalle! 💝 Tenemos varias opciones perfectas para regalo. ¿Me podrías contar un poco más sobre sus gustos? Por ejemplo, ¿prefiere algo práctico o más decorativo?",
                Assistant,
                23,
            ),
            msg("m5", "¿Tienen disponible el producto X en color azul?", Customer, 5),
        ]),
        Conversation::new(
            "2",
            "+51 999 777 666",
            "Carlos López",
            DealStatus::Confirmed,
            minutes_ago(now, 60),
        )
        .with_messages([
            msg("m1", "Quiero comprar 3 unidades del producto Y", Customer, 60),
            msg(
                "m2",
                "¡Excelente elección, Carlos! 🎉 El producto Y es uno de nuestros más vendidos. Para 3 unidades el total sería $75. ¿Te gustaría proceder con el pedido?",
                Assistant,
                58,
            ),
            msg("m3", "Perfecto, procedo con el pago", Customer, 15),
        ]),
        Conversation::new(
            "3",
            "+51 999 666 555",
            "Ana Martínez",
            DealStatus::Lead,
            minutes_ago(now, 150),
        )
        .with_messages([
            msg("m1", "¿Cuáles son sus horarios de atención?", Customer, 150),
            msg(
                "m2",
                "¡Hola Ana! 👋 Nuestro horario de atención es de lunes a viernes de 9:00 AM a 6:00 PM, y sábados de 9:00 AM a 1:00 PM. ¿Hay algo específico en lo que pueda ayudarte?",
                Assistant,
                138,
            ),
            msg("m3", "Gracias por la información", Customer, 120),
        ]),
    ]
}

fn item(name: &str, quantity: u32, cents: u32) -> LineItem {
    LineItem::new(
        name,
        NonZeroU32::new(quantity).unwrap_or(NonZeroU32::MIN),
        Price::from_cents(cents),
    )
}

/// The four seed orders.
#[must_use]
pub fn orders(now: DateTime<Utc>) -> Vec<Order> {
    let hours_ago = |h: i64| now - Duration::hours(h);
    vec![
        Order::new(
            "ORD-001",
            "+51 999 888 777",
            "María García",
            vec![
                item("Camiseta Premium", 2, 2999),
                item("Zapatillas Running Pro", 1, 8999),
            ],
            DealStatus::Confirmed,
            hours_ago(2),
        ),
        Order::new(
            "ORD-002",
            "+51 999 777 666",
            "Carlos López",
            vec![item("Reloj Smart Watch", 1, 19999)],
            DealStatus::Negotiation,
            hours_ago(5),
        ),
        Order::new(
            "ORD-003",
            "+51 999 666 555",
            "Ana Martínez",
            vec![item("Mochila Urban", 1, 4999)],
            DealStatus::Lead,
            hours_ago(24),
        ),
        Order::new(
            "ORD-004",
            "+51 999 555 444",
            "Pedro Sánchez",
            vec![item("Camiseta Premium", 3, 2999)],
            DealStatus::Cancelled,
            hours_ago(48),
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    category: &str,
    cents: u32,
    stock: u32,
    description: &str,
    tags: [&str; 3],
    active: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Price::from_cents(cents),
        stock,
        description: description.to_string(),
        images: Vec::new(),
        tags: tags.iter().map(ToString::to_string).collect(),
        active,
    }
}

/// The four seed products.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Camiseta Premium",
            "Ropa",
            2999,
            150,
            "Camiseta de algodón premium, disponible en varios colores.",
            ["ropa", "casual", "verano"],
            true,
        ),
        product(
            "2",
            "Zapatillas Running Pro",
            "Calzado",
            8999,
            45,
            "Zapatillas de running con tecnología de amortiguación avanzada.",
            ["deportivo", "running", "calzado"],
            true,
        ),
        product(
            "3",
            "Reloj Smart Watch",
            "Electrónica",
            19999,
            30,
            "Reloj inteligente con monitor de salud y GPS integrado.",
            ["tecnología", "smartwatch", "salud"],
            true,
        ),
        product(
            "4",
            "Mochila Urban",
            "Accesorios",
            4999,
            0,
            "Mochila resistente al agua con compartimento para laptop.",
            ["accesorios", "mochila", "viaje"],
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_order_totals_match_line_items() {
        let orders = orders(Utc::now());
        assert!(orders.iter().all(Order::total_is_consistent));
        let totals: Vec<String> = orders.iter().map(|o| o.total_amount.to_string()).collect();
        assert_eq!(totals, vec!["$149.97", "$199.99", "$49.99", "$89.97"]);
    }

    #[test]
    fn test_seed_conversations_summaries() {
        let now = Utc::now();
        let convs = conversations(now);
        assert_eq!(convs.len(), 3);
        let maria = convs.first().expect("seeded");
        assert_eq!(
            maria.last_message(),
            "¿Tienen disponible el producto X en color azul?"
        );
        assert_eq!(maria.timestamp(), now - Duration::minutes(5));
        assert_eq!(maria.unread, 2);
    }
}
