use crate::cli::args::Cli;
use crate::error::AdvisorError;
use crate::models::{AnalysisResult, CountryMarketProfile};

pub struct ReportFormatter {
    use_colors: bool,
    verbose: bool,
}

impl ReportFormatter {
    pub fn new(use_colors: bool, verbose: bool) -> Self {
        Self { use_colors, verbose }
    }

    pub fn for_cli(cli: &Cli) -> Self {
        Self::new(cli.should_use_color(), cli.is_verbose())
    }

    pub fn format_analysis(&self, analysis: &AnalysisResult, scores: &[(String, f64)]) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header(analysis));
        output.push_str("\n\n");

        for profile in analysis.profiles.iter() {
            let score = scores
                .iter()
                .find(|(country, _)| country == &profile.country)
                .map(|(_, score)| *score);
            output.push_str(&self.format_profile(profile, score));
            output.push_str("\n\n");
        }

        output.push_str(&self.format_best_market(analysis));
        output.push_str("\n\n");

        output.push_str(&self.format_section("Strategic Recommendations", &analysis.recommendation));

        output
    }

    fn format_header(&self, analysis: &AnalysisResult) -> String {
        let title = format!("MARKET ENTRY ANALYSIS: {}", analysis.product.name());
        let mut details = format!("HS code: {}", analysis.category);
        if analysis.product.has_description() {
            details = format!("{}\nDescription: {}", details, analysis.product.description());
        }
        if self.verbose {
            details = format!(
                "{}\nGenerated: {}",
                details,
                analysis.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }

        if self.use_colors {
            format!("\x1b[1m\x1b[36m═══ {} ═══\x1b[0m\n{}", title, details)
        } else {
            format!("=== {} ===\n{}", title, details)
        }
    }

    fn format_profile(&self, profile: &CountryMarketProfile, score: Option<f64>) -> String {
        let mut body = format!(
            "Tariff rate: {:.1}%{}",
            profile.tariff_rate,
            if profile.tariff_is_default() { " (default estimate)" } else { "" }
        );
        if let Some(score) = score {
            body.push_str(&format!("\nScore: {:.1}", score));
        }
        body.push_str(&format!("\n\nMarket size:\n{}", profile.market_size));
        body.push_str(&format!("\n\nCompetitors:\n{}", profile.competitors));
        body.push_str(&format!("\n\nEntry channels:\n{}", bullet_list(&profile.entry_channels)));
        body.push_str(&format!("\n\nRegulations:\n{}", bullet_list(&profile.regulations)));

        if !profile.incentives.is_empty() {
            let incentives = profile
                .incentives
                .iter()
                .map(|(program, description)| format!("- {}: {}", program, description))
                .collect::<Vec<_>>()
                .join("\n");
            body.push_str(&format!("\n\nGovernment incentives:\n{}", incentives));
        }

        self.format_section(&profile.country, &body)
    }

    fn format_best_market(&self, analysis: &AnalysisResult) -> String {
        let (color_code, reset) = if self.use_colors {
            ("\x1b[1m\x1b[32m", "\x1b[0m")
        } else {
            ("", "")
        };

        let detail = analysis
            .best_profile()
            .map(|profile| format!(" (tariff {:.1}%)", profile.tariff_rate))
            .unwrap_or_default();

        format!(
            "{}Recommended market: {}{}{}",
            color_code, analysis.best_market, detail, reset
        )
    }

    pub fn format_section(&self, title: &str, content: &str) -> String {
        if self.use_colors {
            format!("\x1b[1m\x1b[37m{}\x1b[0m\n{}", title, content)
        } else {
            format!("{}\n{}\n{}", title, "─".repeat(title.chars().count()), content)
        }
    }

    pub fn format_error(&self, error: &AdvisorError) -> String {
        let (color_code, reset) = if self.use_colors {
            ("\x1b[1m\x1b[31m", "\x1b[0m")
        } else {
            ("", "")
        };

        format!("{}Error:{} {}", color_code, reset, error)
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
