use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsMapping {
    pub keyword: String,
    pub code: String,
}

impl HsMapping {
    fn new(keyword: &str, code: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            code: code.to_string(),
        }
    }
}

/// Static reference data consulted alongside the live services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceTables {
    /// Keyword table, matched in order; the first hit wins.
    pub hs_codes: Vec<HsMapping>,
    pub supported_countries: Vec<String>,
    pub default_countries: Vec<String>,
    pub entry_channels: BTreeMap<String, Vec<String>>,
    pub regulations: BTreeMap<String, Vec<String>>,
    pub incentives: BTreeMap<String, BTreeMap<String, String>>,
    pub fallback_entry_channels: Vec<String>,
    pub fallback_regulations: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn programs(items: &[(&str, &str)]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|(name, description)| (name.to_string(), description.to_string()))
        .collect()
}

impl Default for ReferenceTables {
    fn default() -> Self {
        let hs_codes = vec![
            HsMapping::new("bamboo toothbrush", "960321"),
            HsMapping::new("sustainable oral care", "960321"),
            HsMapping::new("eco toothbrush", "960321"),
            HsMapping::new("organic toothpaste", "330610"),
            HsMapping::new("natural soap", "340111"),
            HsMapping::new("eco-friendly packaging", "482390"),
            HsMapping::new("sustainable clothing", "620443"),
            HsMapping::new("organic food", "070190"),
            HsMapping::new("renewable energy", "850231"),
            HsMapping::new("biodegradable products", "391100"),
        ];

        let mut entry_channels = BTreeMap::new();
        entry_channels.insert(
            "Germany".to_string(),
            strings(&[
                "Amazon.de (largest e-commerce platform)",
                "EU-based distributors (BioVital, EcoTop)",
                "Direct B2B partnerships",
                "Specialty sustainable retail chains",
            ]),
        );
        entry_channels.insert(
            "UAE".to_string(),
            strings(&[
                "Amazon.ae",
                "Local distributors (Al Maya Group)",
                "Dubai Multi Commodities Centre",
                "Specialty organic stores",
            ]),
        );
        entry_channels.insert(
            "Canada".to_string(),
            strings(&[
                "Amazon.ca",
                "Canadian distributors (SustainCo)",
                "Direct partnerships with retailers",
                "Eco-friendly specialty stores",
            ]),
        );

        let mut regulations = BTreeMap::new();
        regulations.insert(
            "Germany".to_string(),
            strings(&[
                "EU REACH compliance required",
                "CE marking for applicable products",
                "German packaging law compliance",
                "Organic certification for eco-claims",
            ]),
        );
        regulations.insert(
            "UAE".to_string(),
            strings(&[
                "Emirates Authority for Standardization and Metrology (ESMA) approval",
                "Halal certification if applicable",
                "Gulf Cooperation Council (GCC) standards",
            ]),
        );
        regulations.insert(
            "Canada".to_string(),
            strings(&[
                "Health Canada approval for health products",
                "Canadian Food Inspection Agency (CFIA) for food items",
                "Environment and Climate Change Canada regulations",
            ]),
        );

        let mut incentives = BTreeMap::new();
        incentives.insert(
            "India".to_string(),
            programs(&[
                (
                    "MSME Export Promotion",
                    "Up to 50% reimbursement on export promotion expenses",
                ),
                (
                    "Interest Equalization Scheme",
                    "3% interest subvention on export credit",
                ),
                (
                    "Market Access Initiative",
                    "Support for participation in international trade fairs",
                ),
            ]),
        );
        incentives.insert(
            "Germany".to_string(),
            programs(&[
                (
                    "Green Technology Support",
                    "Funding for sustainable product development",
                ),
                ("Export Credit Guarantees", "Hermes cover for export financing"),
                ("Digital Export Initiative", "Support for e-commerce expansion"),
            ]),
        );
        incentives.insert(
            "Canada".to_string(),
            programs(&[
                ("CanExport SMEs", "Up to $50,000 for export market development"),
                (
                    "Trade Commissioner Service",
                    "Free market intelligence and networking",
                ),
                (
                    "Green Export Initiative",
                    "Support for sustainable product exports",
                ),
            ]),
        );

        Self {
            hs_codes,
            supported_countries: strings(&[
                "Germany",
                "UAE",
                "Canada",
                "India",
                "UK",
                "Australia",
                "Netherlands",
                "Sweden",
                "Norway",
                "Denmark",
            ]),
            default_countries: strings(&["Germany", "UAE", "Canada"]),
            entry_channels,
            regulations,
            incentives,
            fallback_entry_channels: strings(&[
                "E-commerce platforms",
                "Local distributors",
                "Direct partnerships",
            ]),
            fallback_regulations: strings(&["Standard import regulations apply"]),
        }
    }
}

impl ReferenceTables {
    /// First keyword contained in `product_name`, compared case-insensitively.
    pub fn lookup_hs_code(&self, product_name: &str) -> Option<&str> {
        let name = product_name.to_lowercase();
        self.hs_codes
            .iter()
            .find(|mapping| {
                let keyword = mapping.keyword.trim().to_lowercase();
                !keyword.is_empty() && name.contains(&keyword)
            })
            .map(|mapping| mapping.code.as_str())
    }

    pub fn entry_channels_for(&self, country: &str) -> Vec<String> {
        self.entry_channels
            .get(country)
            .cloned()
            .unwrap_or_else(|| self.fallback_entry_channels.clone())
    }

    pub fn regulations_for(&self, country: &str) -> Vec<String> {
        self.regulations
            .get(country)
            .cloned()
            .unwrap_or_else(|| self.fallback_regulations.clone())
    }

    pub fn incentives_for(&self, country: &str) -> BTreeMap<String, String> {
        self.incentives.get(country).cloned().unwrap_or_default()
    }

    /// Canonical spelling of a supported country, matched case-insensitively.
    pub fn canonical_country(&self, country: &str) -> Option<&str> {
        let wanted = country.trim();
        self.supported_countries
            .iter()
            .find(|c| c.eq_ignore_ascii_case(wanted))
            .map(|c| c.as_str())
    }

    /// Compact keyword table for embedding in prompts.
    pub fn hs_table_for_prompt(&self) -> String {
        self.hs_codes
            .iter()
            .map(|m| format!("- {}: {}", m.keyword, m.code))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
