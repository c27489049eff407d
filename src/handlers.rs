pub mod auth;
pub mod credit;
pub mod dashboard;
pub mod products;
pub mod sales;
pub mod suppliers;
pub mod users;
