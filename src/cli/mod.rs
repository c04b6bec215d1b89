pub mod args;
pub mod reporter;

pub use args::{Cli, OutputFormat};
pub use reporter::ReportFormatter;

use crate::analyzer::AnalysisOrchestrator;
use crate::error::AdvisorError;
use crate::models::AnalysisResult;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct CountryScore<'a> {
    country: &'a str,
    score: f64,
}

/// JSON document printed for `--format json`: the analysis plus any extras requested.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    analysis: &'a AnalysisResult,
    scores: Vec<CountryScore<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    translation: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    partners: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PerspectiveOutput<'a> {
    perspective: &'a str,
    product: &'a str,
    output: &'a str,
}

pub struct CliHandler {
    cli: Cli,
}

impl CliHandler {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub async fn run(&self) -> Result<i32, AdvisorError> {
        let config = self.cli.load_config()?;
        if self.cli.is_verbose() {
            info!(
                model = %config.llm.model_name,
                timeout = config.timeout_seconds,
                depth = config.search.depth.as_str(),
                "configuration loaded"
            );
        }

        let orchestrator = AnalysisOrchestrator::from_config(config)?;
        info!("{}", orchestrator.get_model_info());

        let output = self.render(&orchestrator).await?;
        println!("{}", output);
        Ok(0)
    }

    /// Everything `run` prints to stdout.
    pub async fn render(&self, orchestrator: &AnalysisOrchestrator) -> Result<String, AdvisorError> {
        let product = self.cli.product_query()?;

        if let Some(role) = self.cli.perspective {
            let text = orchestrator.perspective(role, &product, self.cli.countries.as_slice()).await;
            return match self.cli.format {
                OutputFormat::Json => Ok(serde_json::to_string_pretty(&PerspectiveOutput {
                    perspective: role.as_str(),
                    product: product.name(),
                    output: &text,
                })?),
                OutputFormat::Text => {
                    let formatter = ReportFormatter::for_cli(&self.cli);
                    Ok(formatter.format_section(role.title(), &text))
                }
            };
        }

        let analysis = orchestrator.analyze_query(&product, self.cli.countries.as_slice()).await?;
        let scores = orchestrator.scores(&analysis);

        let report = if self.cli.report {
            Some(orchestrator.synthesize_report(&analysis).await)
        } else {
            None
        };

        let translation = match &self.cli.translate {
            Some(language) => Some(orchestrator.translate_listing(&product, language).await),
            None => None,
        };

        let partners = match &self.cli.partners {
            Some(country) => Some(orchestrator.partner_list(country, analysis.category.as_str()).await),
            None => None,
        };

        match self.cli.format {
            OutputFormat::Json => {
                let document = JsonOutput {
                    analysis: &analysis,
                    scores: scores
                        .iter()
                        .map(|(country, score)| CountryScore {
                            country,
                            score: *score,
                        })
                        .collect(),
                    report: report.as_deref(),
                    translation: translation.as_deref(),
                    partners: partners.as_deref(),
                };
                Ok(serde_json::to_string_pretty(&document)?)
            }
            OutputFormat::Text => {
                let formatter = ReportFormatter::for_cli(&self.cli);
                let mut output = formatter.format_analysis(&analysis, &scores);

                if let Some(report) = &report {
                    output.push_str("\n\n");
                    output.push_str(&formatter.format_section("Market Entry Report", report));
                }
                if let (Some(language), Some(translation)) = (&self.cli.translate, &translation) {
                    output.push_str("\n\n");
                    output.push_str(&formatter.format_section(
                        &format!("Product Listing ({})", language.trim()),
                        translation,
                    ));
                }
                if let (Some(country), Some(partners)) = (&self.cli.partners, &partners) {
                    output.push_str("\n\n");
                    output.push_str(&formatter.format_section(
                        &format!("Potential Partners ({})", country.trim()),
                        partners,
                    ));
                }

                Ok(output)
            }
        }
    }
}
