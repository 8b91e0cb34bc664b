pub mod entities;
pub mod errors;
pub mod leveling;
pub mod repositories;
pub mod value_objects;
