pub mod gifts;
pub mod levels;
pub mod participants;
pub mod purchases;
pub mod roles;
pub mod streams;
pub mod wallet;
