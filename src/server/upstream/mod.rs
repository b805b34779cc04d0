//! calls to the restaurant backend, which owns menus, order rows and templates

pub(crate) mod http;

use derive_more::{Display, Error};
use crate::server::model::dish::{DishId, WireCategory};
use crate::server::model::order::{CreateOrderResponse, OrderRow, OrderStatus, QuantityUpdate, TableId};

#[cfg(test)]
pub(crate) use mock::MockBackend;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub(crate) enum UpstreamError {
    #[display("backend unreachable: {reason}")]
    Transport { reason: String },
    #[display("backend timed out")]
    Timeout,
    #[display("backend responded with status {status}")]
    Status { status: u16 },
    #[display("unexpected backend payload: {reason}")]
    Decode { reason: String },
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::Decode { reason: e.to_string() }
        } else if let Some(status) = e.status() {
            UpstreamError::Status { status: status.as_u16() }
        } else {
            UpstreamError::Transport { reason: e.to_string() }
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(e: serde_json::Error) -> Self {
        UpstreamError::Decode { reason: e.to_string() }
    }
}

/// The restaurant backend as seen by the ordering service.
pub(crate) trait Backend {
    async fn fetch_categories(&self) -> Result<Vec<WireCategory>, UpstreamError>;

    async fn fetch_orders(&self, table_id: TableId, status: OrderStatus) -> Result<Vec<OrderRow>, UpstreamError>;

    /// create an INCART order row, returning its server-assigned identity
    async fn create_cart_order(
        &self,
        table_id: TableId,
        dish_id: DishId,
        quantity: i32,
    ) -> Result<CreateOrderResponse, UpstreamError>;

    async fn update_quantities(&self, updates: Vec<QuantityUpdate>) -> Result<(), UpstreamError>;

    /// move every INCART row of the table to ORDERED
    async fn checkout(&self, table_id: TableId) -> Result<(), UpstreamError>;

    /// raw receipt template, `None` when nothing was saved yet
    async fn fetch_receipt_template(&self) -> Result<Option<String>, UpstreamError>;

    async fn save_receipt_template(&self, content: String) -> Result<(), UpstreamError>;
}

/// for test
#[cfg(test)]
mod mock {
    use std::cell::{Cell, RefCell};
    use std::time::Duration;
    use super::*;

    /// In-memory backend recording the calls it receives.
    #[derive(Default)]
    pub(crate) struct MockBackend {
        pub categories: Vec<WireCategory>,
        pub in_cart: Vec<OrderRow>,
        pub ordered: RefCell<Vec<OrderRow>>,
        pub template: RefCell<Option<String>>,
        pub next_order_id: Cell<i64>,
        pub fail_update: Cell<bool>,
        pub fail_checkout: Cell<bool>,
        /// every quantity pushed through `update_quantities`
        pub pushed: RefCell<Vec<QuantityUpdate>>,
        /// slows `fetch_orders` down, to observe what else runs meanwhile
        pub fetch_delay: Cell<Option<Duration>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self {
                next_order_id: Cell::new(100),
                ..Default::default()
            }
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Backend for MockBackend {
        async fn fetch_categories(&self) -> Result<Vec<WireCategory>, UpstreamError> {
            self.record("fetch_categories");
            Ok(self.categories.clone())
        }

        async fn fetch_orders(&self, table_id: TableId, status: OrderStatus) -> Result<Vec<OrderRow>, UpstreamError> {
            self.record(format!("fetch_orders {table_id} {status}"));
            if let Some(delay) = self.fetch_delay.get() {
                tokio::time::sleep(delay).await;
            }
            Ok(match status {
                OrderStatus::InCart => self.in_cart.clone(),
                OrderStatus::Ordered => self.ordered.borrow().clone(),
            })
        }

        async fn create_cart_order(
            &self,
            table_id: TableId,
            dish_id: DishId,
            quantity: i32,
        ) -> Result<CreateOrderResponse, UpstreamError> {
            self.record(format!("create_cart_order {table_id} {dish_id} {quantity}"));
            let id = self.next_order_id.get();
            self.next_order_id.set(id + 1);
            Ok(CreateOrderResponse { id })
        }

        async fn update_quantities(&self, updates: Vec<QuantityUpdate>) -> Result<(), UpstreamError> {
            self.record(format!("update_quantities {}", updates.len()));
            if self.fail_update.get() {
                return Err(UpstreamError::Status { status: 422 });
            }
            self.pushed.borrow_mut().extend(updates);
            Ok(())
        }

        async fn checkout(&self, table_id: TableId) -> Result<(), UpstreamError> {
            self.record(format!("checkout {table_id}"));
            if self.fail_checkout.get() {
                return Err(UpstreamError::Transport { reason: "connection reset".to_string() });
            }
            Ok(())
        }

        async fn fetch_receipt_template(&self) -> Result<Option<String>, UpstreamError> {
            self.record("fetch_receipt_template");
            Ok(self.template.borrow().clone())
        }

        async fn save_receipt_template(&self, content: String) -> Result<(), UpstreamError> {
            self.record("save_receipt_template");
            *self.template.borrow_mut() = Some(content);
            Ok(())
        }
    }
}
