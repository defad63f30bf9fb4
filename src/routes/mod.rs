pub mod categories;
pub mod menu;
pub mod orders;
pub mod products;
pub mod waiters;
