pub mod day;
pub mod food;
pub mod month;
