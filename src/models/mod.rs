pub mod context;
pub mod place;
pub mod plan;
