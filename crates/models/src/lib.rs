//! Persistence models for the catalog: SeaORM entities and connection helpers.

pub mod db;
pub mod product;

#[cfg(test)]
mod tests;
