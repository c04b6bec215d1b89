pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;

pub use error::AdvisorError;

// Re-export commonly used types
pub use models::{
    AnalysisResult, CategoryCode, CountryMarketProfile, EvidenceRecord, EvidenceSet, ProductQuery, ProfileSet,
    SearchDepth, SearchTopic, TariffSource,
};

pub use analyzer::{AnalysisOrchestrator, PerspectiveRole};
pub use config::AdvisorConfig;

pub use cli::CliHandler;
