pub mod links;
pub mod migrate;
pub mod stale;
pub mod validate;
