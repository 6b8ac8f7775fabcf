pub mod price_collection_sync;
pub mod threshold_alert_sync;
