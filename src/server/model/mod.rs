pub(crate) mod config;
pub(crate) mod dish;
pub(crate) mod locale;
pub(crate) mod order;
pub(crate) mod receipt;
