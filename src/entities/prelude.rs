pub use super::alerts::Entity as Alerts;
pub use super::prices::Entity as Prices;
