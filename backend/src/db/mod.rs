pub mod days;
pub mod foods;
pub mod months;
mod pool;

pub use pool::create_pool;
