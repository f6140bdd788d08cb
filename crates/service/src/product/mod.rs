//! Product catalog: domain values, the store abstraction and the service
//! that enforces lookup, mutation and paging rules on top of it.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::ProductService;
