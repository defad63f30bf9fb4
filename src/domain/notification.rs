//! Waiter notification: the WhatsApp message template and deep link.
//! Building the text is part of order derivation; actually opening the
//! link is left to the client, fire-and-forget.

use std::fmt::Write;

use crate::domain::checkout::OrderDraft;

/// Renders the order as the plain-text WhatsApp message. `*` marks bold
/// in the messaging app; amounts always carry two decimal places.
pub fn format_order_message(order: &OrderDraft) -> String {
    let mut message = String::from("🍽️ *NOVO PEDIDO* 🍽️\n\n");

    let _ = writeln!(message, "👤 *Cliente:* {}", order.customer_name);
    let _ = writeln!(message, "📍 *Mesa:* {}", order.table_number);
    let _ = writeln!(message, "👨‍🍳 *Garçom:* {}", order.waiter_name);
    let _ = writeln!(
        message,
        "💳 *Pagamento:* {}\n",
        order.payment_method.label()
    );

    message.push_str("📋 *Itens do Pedido:*\n");
    for (index, item) in order.items.iter().enumerate() {
        let _ = write!(
            message,
            "\n{}. {}\n   Qtd: {} x R$ {:.2} = R$ {:.2}",
            index + 1,
            item.product_name,
            item.quantity,
            item.unit_price,
            item.total_price
        );
    }

    let _ = write!(message, "\n\n💰 *TOTAL: R$ {:.2}*", order.total_amount);

    if let Some(observation) = &order.observation {
        let _ = write!(message, "\n\n📝 *Observações:*\n{observation}");
    }

    message
}

/// Destination number for the deep link: the waiter's phone with every
/// non-digit stripped, or the configured fallback when that leaves
/// nothing.
pub fn notification_target(phone: Option<&str>, fallback: &str) -> String {
    let digits = strip_non_digits(phone.unwrap_or_default());
    if digits.is_empty() {
        strip_non_digits(fallback)
    } else {
        digits
    }
}

pub fn whatsapp_link(target: &str, message: &str) -> String {
    format!("https://wa.me/{target}?text={}", urlencoding::encode(message))
}

fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::{OrderItem, OrderStatus, PaymentMethod};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn make_order() -> OrderDraft {
        OrderDraft {
            customer_name: "Ana".to_string(),
            table_number: "12".to_string(),
            waiter_id: Uuid::new_v4(),
            waiter_name: "Carlos".to_string(),
            items: vec![
                OrderItem {
                    product_id: Uuid::new_v4(),
                    product_name: "Produto A".to_string(),
                    quantity: 2,
                    unit_price: dec!(10.00),
                    total_price: dec!(20.00),
                },
                OrderItem {
                    product_id: Uuid::new_v4(),
                    product_name: "Produto B".to_string(),
                    quantity: 1,
                    unit_price: dec!(15.00),
                    total_price: dec!(15.00),
                },
            ],
            payment_method: PaymentMethod::Pix,
            observation: None,
            total_amount: dec!(35.00),
            status: OrderStatus::Pending,
        }
    }

    #[test]
    fn message_follows_the_template() {
        let message = format_order_message(&make_order());

        let expected = "🍽️ *NOVO PEDIDO* 🍽️\n\n\
                        👤 *Cliente:* Ana\n\
                        📍 *Mesa:* 12\n\
                        👨‍🍳 *Garçom:* Carlos\n\
                        💳 *Pagamento:* PIX\n\n\
                        📋 *Itens do Pedido:*\n\
                        \n1. Produto A\n   Qtd: 2 x R$ 10.00 = R$ 20.00\
                        \n2. Produto B\n   Qtd: 1 x R$ 15.00 = R$ 15.00\
                        \n\n💰 *TOTAL: R$ 35.00*";
        assert_eq!(message, expected);
    }

    #[test]
    fn observation_block_is_appended_when_present() {
        let mut order = make_order();
        order.observation = Some("Sem cebola".to_string());

        let message = format_order_message(&order);
        assert!(message.ends_with("\n\n📝 *Observações:*\nSem cebola"));
    }

    #[test]
    fn amounts_always_render_two_decimals() {
        let mut order = make_order();
        order.items[0].unit_price = dec!(10);
        order.items[0].total_price = dec!(20);
        order.total_amount = dec!(35);

        let message = format_order_message(&order);
        assert!(message.contains("R$ 10.00"));
        assert!(message.contains("*TOTAL: R$ 35.00*"));
    }

    #[test]
    fn target_strips_every_non_digit() {
        assert_eq!(
            notification_target(Some("+55 (11) 98888-7777"), "000"),
            "5511988887777"
        );
    }

    #[test]
    fn target_falls_back_when_phone_is_absent_or_empty() {
        assert_eq!(notification_target(None, "5511999999999"), "5511999999999");
        assert_eq!(
            notification_target(Some("ramal 0"), "5511999999999"),
            "0"
        );
        assert_eq!(
            notification_target(Some("sem telefone"), "5511999999999"),
            "5511999999999"
        );
    }

    #[test]
    fn deep_link_is_url_encoded() {
        let link = whatsapp_link("5511999999999", "🍽️ *NOVO PEDIDO*\nMesa 3");
        assert!(link.starts_with("https://wa.me/5511999999999?text="));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
        assert!(link.contains("%0A"));
    }
}
