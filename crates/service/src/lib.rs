//! Service layer for the product catalog.
//! - Separates business rules from data access (`ProductRepository`).
//! - Reuses entity definitions from the `models` crate.
//! - Raises typed `ServiceError` conditions; status mapping is the caller's job.

pub mod errors;
pub mod pagination;
pub mod product;
#[cfg(test)]
pub mod test_support;
