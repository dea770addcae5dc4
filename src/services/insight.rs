//! Insight service
//!
//! Builds prompts from analysis results and asks a completion provider for
//! reports and answers.

use tracing::info;

use crate::ai::prompts::{
    build_metrics_prompt, build_personal_finance_prompt, build_portfolio_prompt,
    build_question_prompt, summarize_analysis,
};
use crate::ai::{CompletionProvider, CompletionRequest};
use crate::config::Settings;
use crate::error::{FinsightError, FinsightResult};
use crate::services::Analysis;

/// Service for AI-generated financial insights
pub struct InsightService<'a, P: CompletionProvider> {
    provider: &'a P,
    settings: &'a Settings,
}

impl<'a, P: CompletionProvider> InsightService<'a, P> {
    pub fn new(provider: &'a P, settings: &'a Settings) -> Self {
        Self { provider, settings }
    }

    /// Generate the advisory report that fits the analysis
    pub fn report(&self, analysis: &Analysis) -> FinsightResult<String> {
        let symbol = &self.settings.currency_symbol;
        let prompt = match analysis {
            Analysis::ProfitLoss { metrics, .. } => build_metrics_prompt(metrics),
            Analysis::PersonalFinance(pf) => build_personal_finance_prompt(pf, symbol),
            Analysis::InvestmentPortfolio(pa) => build_portfolio_prompt(pa, symbol),
        };
        info!(analysis = %analysis.analysis_type(), "Generating insight report");
        self.complete(prompt)
    }

    /// Answer a free-form question about the analyzed data
    pub fn answer_question(&self, analysis: &Analysis, question: &str) -> FinsightResult<String> {
        if question.trim().is_empty() {
            return Err(FinsightError::Validation("Question cannot be empty".into()));
        }
        let summary = summarize_analysis(analysis, &self.settings.currency_symbol);
        let prompt = build_question_prompt(analysis.analysis_type(), question, &summary);
        info!(analysis = %analysis.analysis_type(), "Answering question");
        self.complete(prompt)
    }

    fn complete(&self, prompt: String) -> FinsightResult<String> {
        let request = CompletionRequest::from_settings(&self.settings.ai, prompt);
        self.provider.complete(&request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiErrorKind;
    use crate::models::{Money, PnlLineItem};
    use crate::services::CleanedData;
    use std::cell::RefCell;

    struct RecordingProvider {
        reply: String,
        fail_with: Option<AiErrorKind>,
        seen: RefCell<Vec<CompletionRequest>>,
    }

    impl RecordingProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: text.to_string(),
                fail_with: None,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl CompletionProvider for RecordingProvider {
        fn complete(&self, request: &CompletionRequest) -> FinsightResult<String> {
            self.seen.borrow_mut().push(request.clone());
            match self.fail_with {
                Some(kind) => Err(FinsightError::ai(kind, "provider failure")),
                None => Ok(self.reply.clone()),
            }
        }
    }

    fn pnl_analysis() -> Analysis {
        Analysis::run(&CleanedData::ProfitLoss(vec![
            PnlLineItem::new("Total Revenue", Money::from_cents(100_000)),
            PnlLineItem::new("Gross Profit", Money::from_cents(25_000)),
        ]))
    }

    #[test]
    fn test_report_uses_settings_and_metrics_prompt() {
        let provider = RecordingProvider::replying("Looks fine.");
        let settings = Settings::default();
        let service = InsightService::new(&provider, &settings);

        let report = service.report(&pnl_analysis()).unwrap();
        assert_eq!(report, "Looks fine.");

        let seen = provider.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "gpt-4");
        assert_eq!(seen[0].max_tokens, 1000);
        assert!(seen[0].prompt.contains("Gross Profit Margin: 25.00"));
    }

    #[test]
    fn test_question_includes_data_summary() {
        let provider = RecordingProvider::replying("Raise prices.");
        let settings = Settings::default();
        let service = InsightService::new(&provider, &settings);

        service
            .answer_question(&pnl_analysis(), "How do I grow margin?")
            .unwrap();

        let seen = provider.seen.borrow();
        assert!(seen[0]
            .prompt
            .starts_with("Based on the Profit & Loss Statement data provided"));
        assert!(seen[0].prompt.contains("Total Revenue: $1,000.00"));
    }

    #[test]
    fn test_empty_question_is_rejected_before_request() {
        let provider = RecordingProvider::replying("unused");
        let settings = Settings::default();
        let service = InsightService::new(&provider, &settings);

        let err = service.answer_question(&pnl_analysis(), "   ").unwrap_err();
        assert!(err.is_validation());
        assert!(provider.seen.borrow().is_empty());
    }

    #[test]
    fn test_provider_errors_propagate() {
        let provider = RecordingProvider {
            fail_with: Some(AiErrorKind::QuotaExceeded),
            ..RecordingProvider::replying("unused")
        };
        let settings = Settings::default();
        let service = InsightService::new(&provider, &settings);

        let err = service.report(&pnl_analysis()).unwrap_err();
        assert!(matches!(
            err,
            FinsightError::Ai {
                kind: AiErrorKind::QuotaExceeded,
                ..
            }
        ));
    }
}
