// src/handlers.rs

pub mod catalog;
pub mod customers;
pub mod health;
pub mod repairs;
