#![forbid(unsafe_code)]

pub mod model;
pub mod seed;
pub mod stats;
pub mod time;

pub use time::Clock;
