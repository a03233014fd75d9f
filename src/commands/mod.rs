pub mod environment;
pub mod invoke;
pub mod listing;
