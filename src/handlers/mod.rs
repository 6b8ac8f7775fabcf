pub mod alert;
pub mod price;
pub mod swap;
