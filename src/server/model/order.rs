use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::server::model::dish::{DishId, DishRef, Price, WireDish};

pub(crate) type OrderId = i64;
pub(crate) type TableId = i16;

/// Order status as the backend names it.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum OrderStatus {
    #[display("INCART")]
    InCart,
    #[display("ORDERED")]
    Ordered,
}

/// One dish/quantity pairing awaiting checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CartLine {
    pub order_id: OrderId,
    pub dish: DishRef,
    pub quantity: i32,
}

impl CartLine {
    pub fn subtotal(&self) -> Price {
        Price::from(self.quantity).saturating_mul(self.dish.unit_price)
    }
}

/// Already-submitted lines sharing one creation timestamp, i.e. one receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct OrderHistoryRecord {
    pub id: String,
    pub lines: Vec<CartLine>,
    pub total: Price,
    /// epoch millis
    pub created_at: i64,
    pub note: Option<String>,
}

/// Order row returned by the backend.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct OrderRow {
    pub id: OrderId,
    pub dish: WireDish,
    pub order_qty: i32,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRow> for CartLine {
    fn from(row: OrderRow) -> Self {
        Self {
            order_id: row.id,
            dish: row.dish.into(),
            quantity: row.order_qty,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateOrderRequest {
    pub table_id: TableId,
    pub dish_id: DishId,
    pub order_qty: i32,
    pub order_status: OrderStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateOrderResponse {
    pub id: OrderId,
}

#[derive(Debug, Serialize)]
pub(crate) struct BulkQuantityRequest {
    pub orders: Vec<QuantityUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct QuantityUpdate {
    pub id: OrderId,
    pub order_qty: i32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostCartItemRequest {
    pub dish_id: DishId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub(crate) struct PatchCartItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetCartResponse {
    pub table_id: TableId,
    pub lines: Vec<CartLine>,
    pub total: Price,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetOrdersResponse {
    pub table_id: TableId,
    pub orders: Vec<OrderHistoryRecord>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CheckoutResponse {
    pub order: Option<OrderHistoryRecord>,
}
