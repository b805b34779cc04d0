//! client-side bookkeeping: cart, receipts and printer line layout

pub(crate) mod cart;
pub(crate) mod history;
pub(crate) mod print_lines;
pub(crate) mod text_width;
