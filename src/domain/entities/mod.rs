pub mod gift_transactions;
pub mod gifts;
pub mod level_settings;
pub mod messages;
pub mod stream_participants;
pub mod streams;
pub mod users;
