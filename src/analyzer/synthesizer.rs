use crate::analyzer::bounded;
use crate::analyzer::llm_client::LlmProvider;
use crate::analyzer::prompts::PromptTemplate;
use crate::error::AdvisorError;
use crate::models::{AnalysisResult, EvidenceSet, ProductQuery, ProfileSet};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub fn recommendation_fallback(product: &ProductQuery, best_market: &str) -> String {
    format!(
        "Recommended primary market for {}: {}. The strategic narrative is unavailable \
         because the language model could not be reached; the choice reflects tariff \
         levels and market bonuses only.",
        product.name(),
        best_market
    )
}

pub fn translation_fallback(product: &ProductQuery, language: &str) -> String {
    let mut listing = format!("Product Name: {}", product.name());
    if product.has_description() {
        let _ = write!(listing, "\nDescription: {}", product.description());
    }
    let _ = write!(listing, "\n\n(Translation to {} unavailable; listing shown untranslated.)", language);
    listing
}

pub fn partner_list_fallback(country: &str) -> String {
    format!("Partner research needed for {} market", country)
}

/// Single-shot generative outputs built from already-gathered data.
pub struct RecommendationSynthesizer {
    llm: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl RecommendationSynthesizer {
    pub fn new(llm: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    async fn complete(&self, operation: &str, prompt: &str) -> Result<String, AdvisorError> {
        let text = bounded(operation, self.timeout, self.llm.generate(prompt)).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AdvisorError::LlmClientError(format!("{} returned no text", operation)));
        }
        Ok(text.to_string())
    }

    /// Strategic narrative over every profile; a fixed notice naming the best market on failure.
    pub async fn synthesize(&self, profiles: &ProfileSet, best_market: &str, product: &ProductQuery) -> String {
        let result = async {
            let market_data = serde_json::to_string_pretty(profiles)?;
            let prompt = PromptTemplate::build_recommendation_prompt(product, &market_data, best_market);
            self.complete("recommendation", &prompt).await
        }
        .await;

        match result {
            Ok(text) => {
                info!(best_market, "recommendation synthesized");
                text
            }
            Err(e) => {
                warn!(best_market, "recommendation unavailable: {}", e);
                recommendation_fallback(product, best_market)
            }
        }
    }

    /// Ten-section executive report; falls back to a locally rendered outline.
    pub async fn report(&self, analysis: &AnalysisResult, scores: &[(String, f64)]) -> String {
        let result = async {
            let analysis_json = serde_json::to_string_pretty(analysis)?;
            let prompt = PromptTemplate::build_report_prompt(&analysis_json);
            self.complete("report", &prompt).await
        }
        .await;

        result.unwrap_or_else(|e| {
            warn!("report generation failed, rendering outline: {}", e);
            render_report_outline(analysis, scores)
        })
    }

    pub async fn translate(&self, product: &ProductQuery, language: &str) -> String {
        let prompt = PromptTemplate::build_translation_prompt(product, language);
        self.complete("translation", &prompt).await.unwrap_or_else(|e| {
            warn!(language, "translation failed: {}", e);
            translation_fallback(product, language)
        })
    }

    pub async fn partner_list(&self, evidence: &EvidenceSet, product_category: &str, country: &str) -> String {
        if evidence.is_empty() {
            warn!(country, "no partner evidence found");
            return partner_list_fallback(country);
        }

        let instruction = PromptTemplate::partners_instruction(product_category, country);
        let prompt = PromptTemplate::build_summary_prompt(evidence, &instruction);
        self.complete("partner list", &prompt).await.unwrap_or_else(|e| {
            warn!(country, "partner list failed: {}", e);
            partner_list_fallback(country)
        })
    }
}

/// Plain-text report built without the language model.
pub fn render_report_outline(analysis: &AnalysisResult, scores: &[(String, f64)]) -> String {
    let mut out = String::new();
    let product = analysis.product.name();

    let _ = writeln!(out, "MARKET ENTRY REPORT: {}", product);
    let _ = writeln!(out, "Generated: {}", analysis.generated_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out, "HS code: {}", analysis.category);
    let _ = writeln!(out);

    let _ = writeln!(out, "1. Executive Summary");
    let _ = writeln!(
        out,
        "   {} markets analyzed; recommended primary market: {}.",
        analysis.profiles.len(),
        analysis.best_market
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "2. Market Opportunity Analysis");
    for profile in analysis.profiles.iter() {
        let _ = writeln!(out, "   {}: {}", profile.country, profile.market_size);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "3. Competitive Landscape");
    for profile in analysis.profiles.iter() {
        let _ = writeln!(out, "   {}: {}", profile.country, profile.competitors);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "4. Entry Strategy");
    for profile in analysis.profiles.iter() {
        let _ = writeln!(out, "   {}: {}", profile.country, profile.entry_channels.join("; "));
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "5. Risk Assessment");
    for profile in analysis.profiles.iter() {
        let _ = writeln!(
            out,
            "   {}: tariff {:.1}%{}; {}",
            profile.country,
            profile.tariff_rate,
            if profile.tariff_is_default() { " (default estimate)" } else { "" },
            profile.regulations.join("; ")
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "6. Government Incentives");
    for profile in analysis.profiles.iter() {
        if profile.incentives.is_empty() {
            let _ = writeln!(out, "   {}: none identified", profile.country);
            continue;
        }
        for (program, description) in &profile.incentives {
            let _ = writeln!(out, "   {}: {} - {}", profile.country, program, description);
        }
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "7. Financial Projections");
    for (country, score) in scores {
        let _ = writeln!(out, "   {}: attractiveness score {:.1}", country, score);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "8. Implementation Timeline");
    let _ = writeln!(out, "   Phase 1 (0-3 months): compliance and channel setup in {}", analysis.best_market);
    let _ = writeln!(out, "   Phase 2 (3-9 months): launch and partner onboarding");
    let _ = writeln!(out, "   Phase 3 (9-18 months): expansion to secondary markets");
    let _ = writeln!(out);

    let _ = writeln!(out, "9. Success Metrics");
    let _ = writeln!(out, "   Sales volume, channel reach and customer acquisition cost per market");
    let _ = writeln!(out);

    let _ = writeln!(out, "10. Next Steps");
    let _ = writeln!(out, "   Recommendation:");
    for line in analysis.recommendation.lines() {
        let _ = writeln!(out, "   {}", line);
    }

    out
}
