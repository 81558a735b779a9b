pub mod enrichment;
pub mod transport;

pub use enrichment::{enrich_in_place, Enrichment, EnrichmentClient};
pub use transport::{GenerationResult, HealthResult, TransportClient};
