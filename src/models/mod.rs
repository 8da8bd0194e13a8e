//! Database models and configuration shared across the dealership backend.

pub mod brand;
pub mod config;
pub mod customer;
pub mod employee;
pub mod transaction;
pub mod user;
pub mod vehicle;
