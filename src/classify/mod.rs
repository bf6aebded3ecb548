pub mod geo;
pub mod recency;
pub mod salary;
pub mod tags;

pub use geo::GeoFilter;
pub use recency::RecencyClassifier;
pub use salary::SalaryNormalizer;
pub use tags::TagPartitioner;
