pub mod alert;
pub mod chain;
pub mod common;
pub mod price;
pub mod swap;
