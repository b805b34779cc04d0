//! per-table ordering session: cart and receipts kept in step with the backend

use log::{info, warn};
use crate::server::domain::cart::Cart;
use crate::server::domain::history::group_by_created_at;
use crate::server::model::dish::DishRef;
use crate::server::model::order::{CartLine, OrderHistoryRecord, OrderStatus, TableId};
use crate::server::upstream::{Backend, UpstreamError};
use crate::server::util::time;

#[derive(Debug)]
pub(crate) struct OrderingSession {
    table_id: TableId,
    cart: Cart,
    history: Vec<OrderHistoryRecord>,
}

impl OrderingSession {
    pub fn new(table_id: TableId) -> Self {
        Self {
            table_id,
            cart: Cart::new(),
            history: vec![],
        }
    }

    /// Seed a session from the backend's INCART and ORDERED rows.
    pub async fn load<B: Backend>(table_id: TableId, backend: &B) -> Result<Self, UpstreamError> {
        let mut session = Self::new(table_id);
        session.refresh_cart(backend).await?;
        session.refresh_history(backend).await?;
        info!("session loaded for table={}, cart lines={}, receipts={}",
            table_id, session.cart.lines().len(), session.history.len());
        Ok(session)
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn history(&self) -> &[OrderHistoryRecord] {
        &self.history
    }

    pub async fn refresh_cart<B: Backend>(&mut self, backend: &B) -> Result<(), UpstreamError> {
        let rows = backend.fetch_orders(self.table_id, OrderStatus::InCart).await?;
        self.cart.replace_lines(rows.into_iter().map(CartLine::from).collect());
        Ok(())
    }

    /// Regroup ORDERED rows into receipts, replacing what was shown before.
    pub async fn refresh_history<B: Backend>(&mut self, backend: &B) -> Result<(), UpstreamError> {
        let rows = backend.fetch_orders(self.table_id, OrderStatus::Ordered).await?;
        self.history = group_by_created_at(rows);
        Ok(())
    }

    /// Add `quantity` of `dish`. Only a dish not yet in the cart gets a new backend order row.
    pub async fn add_dish<B: Backend>(&mut self, backend: &B, dish: DishRef, quantity: i32) -> Result<(), UpstreamError> {
        let order_id = match self.cart.lines().iter().find(|l| l.dish.id == dish.id) {
            Some(line) => line.order_id,
            None => backend.create_cart_order(self.table_id, dish.id, quantity).await?.id,
        };
        self.cart.add(order_id, dish, quantity);
        Ok(())
    }

    pub fn set_quantity(&mut self, dish_id: i64, quantity: i32) {
        self.cart.set_quantity(dish_id, quantity);
    }

    /// Push quantities, record the receipt locally, then move the rows to ORDERED.
    ///
    /// The receipt is recorded as soon as the quantity update succeeds. A failing status
    /// transition restores the cart and drops the receipt before reporting the error.
    pub async fn checkout<B: Backend>(&mut self, backend: &B) -> Result<Option<OrderHistoryRecord>, UpstreamError> {
        if self.cart.is_empty() {
            return Ok(None);
        }
        backend.update_quantities(self.cart.quantity_updates()).await?;

        let snapshot = self.cart.clone();
        let Some(record) = self.cart.commit(time::now_millis()) else {
            return Ok(None);
        };
        self.history.insert(0, record.clone());

        if let Err(e) = backend.checkout(self.table_id).await {
            warn!("checkout status transition failed for table={}, rolling back, {}", self.table_id, e);
            self.history.remove(0);
            self.cart = snapshot;
            return Err(e);
        }
        info!("table={} checked out receipt={} total={}", self.table_id, record.id, record.total);
        Ok(Some(record))
    }
}
