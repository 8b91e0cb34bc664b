pub mod progression_scheduler;
