//! PayPal REST API wire types.
//!
//! Only the fields the checkout pipeline reads are modelled; everything else
//! in the provider's responses is ignored.

use serde::Deserialize;

use crate::domain::checkout::{
    Capture, CaptureResult, Money, OrderCreation, OrderLink, PurchaseUnit,
};

/// `POST /v1/oauth2/token` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalTokenResponse {
    #[serde(default)]
    pub access_token: String,
}

/// `GET /v1/identity/openidconnect/userinfo` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalUserInfo {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayPalLink {
    pub href: String,
    pub rel: String,
    #[serde(default)]
    pub method: Option<String>,
}

/// `POST /v2/checkout/orders` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalOrder {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub links: Vec<PayPalLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayPalAmount {
    pub currency_code: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayPalCapture {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub amount: Option<PayPalAmount>,
    #[serde(default)]
    pub final_capture: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayPalPayments {
    #[serde(default)]
    pub captures: Vec<PayPalCapture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayPalPurchaseUnit {
    #[serde(default)]
    pub payments: PayPalPayments,
}

/// `POST /v2/checkout/orders/{id}/capture` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalCaptureResponse {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub purchase_units: Vec<PayPalPurchaseUnit>,
}

impl From<PayPalLink> for OrderLink {
    fn from(link: PayPalLink) -> Self {
        OrderLink {
            href: link.href,
            rel: link.rel,
            method: link.method,
        }
    }
}

impl From<PayPalOrder> for OrderCreation {
    fn from(order: PayPalOrder) -> Self {
        OrderCreation {
            id: order.id,
            status: order.status,
            links: order.links.into_iter().map(OrderLink::from).collect(),
        }
    }
}

impl From<PayPalCapture> for Capture {
    fn from(capture: PayPalCapture) -> Self {
        Capture {
            id: capture.id,
            status: capture.status,
            amount: capture.amount.map(|a| Money {
                currency_code: a.currency_code,
                value: a.value,
            }),
            final_capture: capture.final_capture,
        }
    }
}

impl From<PayPalCaptureResponse> for CaptureResult {
    fn from(response: PayPalCaptureResponse) -> Self {
        CaptureResult {
            id: response.id,
            status: response.status,
            purchase_units: response
                .purchase_units
                .into_iter()
                .map(|unit| PurchaseUnit {
                    captures: unit.payments.captures.into_iter().map(Capture::from).collect(),
                })
                .collect(),
        }
    }
}
