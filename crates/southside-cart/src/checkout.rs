//! Order-request construction.
//!
//! The checkout page turns the cart into an order-creation payload for the
//! storefront API and clears the cart only after the API confirms the
//! order. Nothing here performs network calls; this module only builds the
//! payload.

use crate::error::CartError;
use crate::ids::{ProductId, UserId};
use crate::item::CartItem;
use serde::{Deserialize, Serialize};

/// Payment methods the storefront API accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    DebitCard,
    Paypal,
    WechatPay,
    Alipay,
    BankTransfer,
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Paypal => "PAYPAL",
            PaymentMethod::WechatPay => "WECHAT_PAY",
            PaymentMethod::Alipay => "ALIPAY",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
            PaymentMethod::CashOnDelivery => "CASH_ON_DELIVERY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::DebitCard => "Debit Card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::WechatPay => "WeChat Pay",
            PaymentMethod::Alipay => "Alipay",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }
}

/// One cart row as the order API wants it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Shipping fields on the order payload. The API keeps them flat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub shipping_name: String,
    pub shipping_phone: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_postcode: String,
    pub shipping_country: String,
}

impl ShippingDetails {
    /// Create shipping details; an empty country falls back to the
    /// storefront's default.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        postcode: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        let country = country.into();
        Self {
            shipping_name: name.into(),
            shipping_phone: phone.into(),
            shipping_address: address.into(),
            shipping_city: city.into(),
            shipping_postcode: postcode.into(),
            shipping_country: if country.is_empty() {
                "Australia".to_string()
            } else {
                country
            },
        }
    }
}

/// The order-creation payload, serialized in the API's camelCase shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub payment_method: PaymentMethod,
    #[serde(flatten)]
    pub shipping: ShippingDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl OrderRequest {
    /// Build an order request from cart rows.
    ///
    /// Fails on an empty cart or a row whose quantity is not positive; the
    /// checkout page refuses both before calling the API.
    pub fn from_items(
        user_id: UserId,
        items: &[CartItem],
        payment_method: PaymentMethod,
        shipping: ShippingDetails,
        notes: Option<String>,
    ) -> Result<Self, CartError> {
        if items.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let items = items
            .iter()
            .map(|item| {
                if item.quantity <= 0 {
                    return Err(CartError::InvalidQuantity(item.quantity));
                }
                Ok(OrderItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    notes: item.notes.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            user_id,
            items,
            payment_method,
            shipping,
            notes,
        })
    }
}
