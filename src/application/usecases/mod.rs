pub mod gift_catalog;
pub mod gift_purchase;
pub mod ledger;
pub mod level_settings;
pub mod progression;
pub mod streams;
