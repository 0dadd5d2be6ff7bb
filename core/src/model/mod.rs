pub mod calendar;
pub mod schedule;
pub mod shift;
pub mod stats;
