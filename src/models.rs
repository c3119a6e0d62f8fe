pub mod catalog;
pub mod customer;
pub mod repair;
