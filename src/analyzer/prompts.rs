use crate::models::{CategoryCode, EvidenceSet, ProductQuery};

/// Per-record cap on evidence text embedded in prompts.
pub const MAX_EVIDENCE_CHARS: usize = 1500;

pub struct PromptTemplate;

impl PromptTemplate {
    pub fn build_system_prompt() -> String {
        r#"You are an expert Global Market Entry Analyst. Your role is to help businesses expand internationally by providing comprehensive market analysis, competitive intelligence, and strategic recommendations.

Key capabilities:
1. Product classification and HS code identification
2. Market size and growth potential analysis
3. Competitor analysis and pricing intelligence
4. Tariff and regulatory compliance assessment
5. Entry strategy recommendations
6. Government incentive identification
7. Product localization and translation

Always provide actionable, data-driven insights with specific recommendations."#
            .to_string()
    }

    pub fn build_classification_prompt(product: &ProductQuery, hs_table: &str) -> String {
        format!(
            r#"Analyze this product and determine the most appropriate HS code:
Product: {}
Description: {}

Available mappings:
{}

Return only the HS code in format: "XXXXXX"
If not found in mappings, analyze the product and suggest the most appropriate HS code."#,
            product.name(),
            product.description(),
            hs_table
        )
    }

    pub fn tariff_instruction(category: &CategoryCode, country: &str) -> String {
        format!(
            "What is the approximate tariff rate for HS code {} in {}?\n\
             Return only a number (percentage) like \"5.2\" or \"0\" for duty-free.",
            category, country
        )
    }

    pub fn market_size_instruction(product: &ProductQuery, country: &str) -> String {
        format!(
            "Provide market size information for {} in {}.\n\
             Return a brief summary of market size and growth potential.",
            product.name(),
            country
        )
    }

    pub fn competitors_instruction(product: &ProductQuery, country: &str) -> String {
        format!(
            "Identify main competitors for {} in {}.\n\
             Return a list of 3-5 main competitors with estimated price ranges.",
            product.name(),
            country
        )
    }

    pub fn partners_instruction(product_category: &str, country: &str) -> String {
        format!(
            "Create a list of potential partners for {} in {}.\n\
             Format as a structured list with:\n\
             - Company name\n\
             - Contact information (if available)\n\
             - Specialization\n\
             - Partnership potential",
            product_category, country
        )
    }

    pub fn build_summary_prompt(evidence: &EvidenceSet, instruction: &str) -> String {
        format!(
            "Based on this search data, answer the request below.\n\n\
             SEARCH RESULTS:\n{}\n\n\
             REQUEST:\n{}",
            Self::format_evidence(evidence, MAX_EVIDENCE_CHARS),
            instruction
        )
    }

    pub fn build_recommendation_prompt(
        product: &ProductQuery,
        market_data_json: &str,
        best_market: &str,
    ) -> String {
        format!(
            r#"Based on this market analysis for {}, generate strategic recommendations:

Market Data: {}
Best Market: {}

Provide recommendations for:
1. Primary target market and why
2. Entry strategy (timeline, channels, partnerships)
3. Pricing strategy
4. Marketing approach
5. Risk mitigation
6. Government incentives to leverage

Format as a structured recommendation report."#,
            product.name(),
            market_data_json,
            best_market
        )
    }

    pub fn build_report_prompt(analysis_json: &str) -> String {
        format!(
            r#"Create a professional, comprehensive market entry report based on this analysis:

{}

Structure the report with:
1. Executive Summary
2. Market Opportunity Analysis
3. Competitive Landscape
4. Entry Strategy
5. Risk Assessment
6. Government Incentives
7. Financial Projections
8. Implementation Timeline
9. Success Metrics
10. Next Steps

Format as a professional business report suitable for executive presentation."#,
            analysis_json
        )
    }

    pub fn build_translation_prompt(product: &ProductQuery, target_language: &str) -> String {
        format!(
            r#"Translate this product listing to {lang}:

Product Name: {}
Description: {}

Make it culturally appropriate for {lang} speakers and optimize for e-commerce platforms.
Include relevant keywords for sustainability and eco-friendly products.
Provide both the translated name and description."#,
            product.name(),
            product.description(),
            lang = target_language
        )
    }

    /// Numbered, length-capped rendering of the evidence records.
    pub fn format_evidence(evidence: &EvidenceSet, max_chars_per_record: usize) -> String {
        if evidence.is_empty() {
            return "(no search results)".to_string();
        }

        evidence
            .records
            .iter()
            .filter(|r| !r.content.trim().is_empty())
            .enumerate()
            .map(|(i, record)| {
                let content = record.content.trim();
                let total_chars = content.chars().count();
                let mut body: String = content.chars().take(max_chars_per_record).collect();
                if total_chars > max_chars_per_record {
                    body.push_str(" [...]");
                }

                let source = match (record.title.trim(), record.url.trim()) {
                    ("", "") => String::new(),
                    (title, "") => format!(" {}", title),
                    ("", url) => format!(" ({})", url),
                    (title, url) => format!(" {} ({})", title, url),
                };

                format!("[{}]{}\n{}", i + 1, source, body)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
