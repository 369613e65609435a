//! Outbound order message for messaging-app checkout.
//!
//! There is no payment processing: checkout is a link that opens a chat with
//! the store, pre-filled with a human-readable order summary.

use std::fmt::Write as _;

use thiserror::Error;

use handset_hub_core::{CurrencyFormat, Settings};

use crate::selection::CartLines;

/// Base URL of the messaging deep link.
const CHAT_LINK_BASE: &str = "https://wa.me";

/// Errors building a checkout link.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("no messaging contact configured in settings")]
    MissingContact,
}

/// Format the order summary for `lines`.
///
/// Output is deterministic: one bullet per line in cart order, then the
/// grand total.
#[must_use]
pub fn order_message(lines: &CartLines, site_name: &str, format: &CurrencyFormat) -> String {
    let mut message = format!("Hi {site_name}! 👋 I'd like to order:\n\n");
    for line in lines.as_slice() {
        let _ = writeln!(
            message,
            "• {} x{} = {}",
            line.name,
            line.quantity,
            format.format(line.line_total().unwrap_or_default())
        );
    }
    let _ = write!(message, "\nTotal: {}\n\n", format.format(lines.total()));
    message.push_str("Please confirm availability. Thank you!");
    message
}

/// Build the checkout deep link for `lines`, addressed to the contact in
/// `settings`, with the message percent-encoded.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart and
/// `CheckoutError::MissingContact` when settings carry no messaging number.
pub fn checkout_url(lines: &CartLines, settings: &Settings) -> Result<String, CheckoutError> {
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let number = settings
        .contact
        .whatsapp_digits()
        .ok_or(CheckoutError::MissingContact)?;
    let message = order_message(lines, &settings.site_name, &settings.currency_format());
    Ok(format!(
        "{CHAT_LINK_BASE}/{number}?text={}",
        urlencoding::encode(&message)
    ))
}
