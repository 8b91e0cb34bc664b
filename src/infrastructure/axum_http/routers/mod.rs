pub mod gifts;
pub mod levels;
pub mod streams;
pub mod wallet;
