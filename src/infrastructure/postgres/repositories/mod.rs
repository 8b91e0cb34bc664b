pub mod gift_transactions;
pub mod gifts;
pub mod level_settings;
pub mod messages;
pub mod participants;
pub mod streams;
pub mod users;
