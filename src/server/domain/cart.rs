use crate::server::model::dish::{DishId, DishRef, Price};
use crate::server::model::order::{CartLine, OrderHistoryRecord, OrderId, QuantityUpdate};

/// In-progress cart, at most one line per dish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Cart {
    lines: Vec<CartLine>,
    /// backend rows of lines dropped since the last sync, zeroed on the next quantity push
    removed: Vec<OrderId>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, dish_id: DishId) -> bool {
        self.lines.iter().any(|l| l.dish.id == dish_id)
    }

    /// Merge `quantity` into the line for `dish`, or append a new line.
    ///
    /// An existing line keeps its `order_id`; only the quantity moves, saturating at
    /// `i32::MAX` and floored at zero, and a line reaching zero is dropped.
    /// A new line takes `quantity` as given.
    pub fn add(&mut self, order_id: OrderId, dish: DishRef, quantity: i32) {
        match self.lines.iter().position(|l| l.dish.id == dish.id) {
            Some(idx) => {
                let merged = self.lines[idx].quantity.saturating_add(quantity).max(0);
                if merged == 0 {
                    self.remove_line(idx);
                } else {
                    self.lines[idx].quantity = merged;
                }
            }
            None => self.lines.push(CartLine { order_id, dish, quantity }),
        }
    }

    /// Overwrite the quantity of `dish_id`, floored at zero. Absent dishes are ignored.
    pub fn set_quantity(&mut self, dish_id: DishId, quantity: i32) {
        let Some(idx) = self.lines.iter().position(|l| l.dish.id == dish_id) else {
            return;
        };
        let quantity = quantity.max(0);
        if quantity == 0 {
            self.remove_line(idx);
        } else {
            self.lines[idx].quantity = quantity;
        }
    }

    fn remove_line(&mut self, idx: usize) {
        let line = self.lines.remove(idx);
        self.removed.push(line.order_id);
    }

    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).fold(0, Price::saturating_add)
    }

    pub fn count(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.quantity)).fold(0, i64::saturating_add)
    }

    /// Quantities to push upstream before checkout. Rows of removed lines go out as zero
    /// so the status transition does not order them.
    pub fn quantity_updates(&self) -> Vec<QuantityUpdate> {
        self.lines
            .iter()
            .map(|l| QuantityUpdate { id: l.order_id, order_qty: l.quantity })
            .chain(self.removed.iter().map(|&id| QuantityUpdate { id, order_qty: 0 }))
            .collect()
    }

    /// Replace every line with a fresh fetch from the backend.
    pub fn replace_lines(&mut self, lines: Vec<CartLine>) {
        self.lines = lines;
        self.removed.clear();
    }

    /// Snapshot the cart as a receipt stamped `now` (epoch millis) and empty it.
    /// Returns `None` on an empty cart.
    pub fn commit(&mut self, now: i64) -> Option<OrderHistoryRecord> {
        if self.lines.is_empty() {
            return None;
        }
        let total = self.total();
        self.removed.clear();
        Some(OrderHistoryRecord {
            id: now.to_string(),
            lines: std::mem::take(&mut self.lines),
            total,
            created_at: now,
            note: None,
        })
    }
}
