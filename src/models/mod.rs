pub mod analysis;
pub mod evidence;
pub mod product;
pub mod profile;

pub use analysis::AnalysisResult;
pub use evidence::{EvidenceRecord, EvidenceSet, SearchDepth, SearchTopic};
pub use product::{CategoryCode, ProductQuery};
pub use profile::{CountryMarketProfile, ProfileSet, TariffSource};
