pub mod http;
pub mod pipeline;
pub mod supplier;

pub use pipeline::{DedupSet, Pipeline};
pub use supplier::{ContentSupplier, HttpSupplier};
