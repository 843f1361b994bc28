//! Campaign analysis pipeline.
//!
//! A batch of campaign totals flows through five stages: KPI enrichment,
//! prompt construction, chat completion, verdict extraction with repair, and
//! a final merge pairing each campaign with its verdict. Model-side failures
//! degrade to deterministic fallback verdicts instead of surfacing errors,
//! so callers always receive exactly one [`AnalyzedCampaign`] per input
//! campaign.

pub mod enrich;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod prompt;
pub mod types;
pub mod verdict;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::openai::OpenAiConfig;
use crate::llm::{ChatApi, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LlmError};

pub use enrich::{enrich_campaign, enrich_campaigns, total_spend};
pub use error::AnalysisError;
pub use extract::Extraction;
pub use types::{AiVerdict, AnalyzedCampaign, CampaignTotals, EnrichedCampaign};
pub use verdict::Verdict;

/// Analysis text attached when the pipeline itself fails.
pub const ERROR_ANALYSIS: &str = "Analysis failed - please retry";
/// Recommendations text attached when the pipeline itself fails.
pub const ERROR_RECOMMENDATIONS: &str = "Check logs and retry";

/// Pause before the single opt-in retry of a failed chat completion.
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Runs the analysis pipeline against a chat completion backend.
///
/// Constructed without a client it still works, producing fallback verdicts,
/// which keeps the `analyze` CLI and the HTTP route usable when no API key
/// is configured.
#[derive(Clone)]
pub struct CampaignAnalyzer {
    config: OpenAiConfig,
    log_prompts: bool,
    client: Option<Arc<dyn ChatApi>>,
}

impl CampaignAnalyzer {
    pub fn new(config: OpenAiConfig, client: Option<Arc<dyn ChatApi>>) -> Self {
        Self {
            config,
            log_prompts: false,
            client,
        }
    }

    /// Log full prompts at debug level. Off by default since prompts embed
    /// campaign names and spend figures.
    pub fn with_prompt_logging(mut self, log_prompts: bool) -> Self {
        self.log_prompts = log_prompts;
        self
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Analyze a batch of campaigns, returning one record per input in the
    /// same order. An empty batch short-circuits without touching the model.
    pub async fn analyze(
        &self,
        campaigns: &[CampaignTotals],
        total_account_spend: f64,
    ) -> Vec<AnalyzedCampaign> {
        if campaigns.is_empty() {
            debug!("Empty campaign batch, skipping analysis");
            return Vec::new();
        }

        let enriched = enrich::enrich_campaigns(campaigns, total_account_spend);
        match self.verdicts_for(&enriched).await {
            Ok(verdicts) => merge_verdicts(enriched, verdicts),
            Err(err) => {
                error!(error = %err, "Analysis pipeline failed");
                metrics::counter!("interestminer_analysis_total", "outcome" => "error")
                    .increment(1);
                enriched
                    .into_iter()
                    .map(|campaign| AnalyzedCampaign {
                        campaign,
                        ai_verdict: Verdict::Error,
                        ai_analysis: ERROR_ANALYSIS.to_string(),
                        ai_recommendations: ERROR_RECOMMENDATIONS.to_string(),
                    })
                    .collect()
            }
        }
    }

    /// Obtain verdicts for an enriched batch, falling back on any model-side
    /// failure. Only prompt serialization can error out.
    async fn verdicts_for(
        &self,
        campaigns: &[EnrichedCampaign],
    ) -> Result<Vec<AiVerdict>, AnalysisError> {
        let Some(client) = &self.client else {
            warn!("No chat client configured, using fallback verdicts");
            metrics::counter!("interestminer_analysis_total", "outcome" => "fallback")
                .increment(1);
            return Ok(fallback::fallback_verdicts(campaigns.len()));
        };

        let prompt = prompt::build_prompt(campaigns)?;
        if self.log_prompts {
            debug!(prompt = %prompt, "Analysis prompt");
        }

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(prompt::SYSTEM_PROMPT),
                ChatMessage::user(&prompt),
            ],
            temperature: Some(self.config.temperature),
            max_tokens: Some(self.config.max_output_tokens),
        };

        info!(
            campaigns = campaigns.len(),
            model = %self.config.model,
            "Requesting AI analysis"
        );

        let response = match self.complete_with_retry(client.as_ref(), request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "Chat completion failed, using fallback verdicts");
                metrics::counter!("interestminer_analysis_total", "outcome" => "fallback")
                    .increment(1);
                return Ok(fallback::fallback_verdicts(campaigns.len()));
            }
        };

        record_token_usage(&response);

        let text = response.message_text().unwrap_or_default();
        match parse_verdicts(text, campaigns.len()) {
            Some(verdicts) => {
                metrics::counter!("interestminer_analysis_total", "outcome" => "ai")
                    .increment(1);
                Ok(verdicts)
            }
            None => {
                metrics::counter!("interestminer_analysis_total", "outcome" => "fallback")
                    .increment(1);
                Ok(fallback::fallback_verdicts(campaigns.len()))
            }
        }
    }

    async fn complete_with_retry(
        &self,
        client: &dyn ChatApi,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        match client.chat_completion(request.clone()).await {
            Ok(response) => Ok(response),
            Err(first) if self.config.retry_on_failure => {
                warn!(
                    error = %first,
                    delay_ms = RETRY_DELAY.as_millis() as u64,
                    "Chat completion failed, retrying once"
                );
                tokio::time::sleep(RETRY_DELAY).await;
                client.chat_completion(request).await
            }
            Err(first) => Err(first),
        }
    }
}

fn record_token_usage(response: &ChatCompletionResponse) {
    if let Some(usage) = &response.usage {
        metrics::counter!("interestminer_llm_tokens_total", "type" => "prompt")
            .increment(usage.prompt_tokens as u64);
        metrics::counter!("interestminer_llm_tokens_total", "type" => "completion")
            .increment(usage.completion_tokens as u64);
        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "Token usage"
        );
    }
}

/// Parse model output into verdicts. All-or-nothing on the batch: a count
/// mismatch discards the whole response rather than guessing alignment.
fn parse_verdicts(text: &str, expected: usize) -> Option<Vec<AiVerdict>> {
    match extract::extract_array(text) {
        Extraction::Parsed(entries) if entries.len() == expected => Some(
            entries
                .iter()
                .enumerate()
                .map(|(position, entry)| repair_entry(entry, position))
                .collect(),
        ),
        Extraction::Parsed(entries) => {
            warn!(
                expected,
                received = entries.len(),
                "Verdict count mismatch, discarding model output"
            );
            None
        }
        Extraction::Unrecognized => {
            warn!("Model output did not contain a JSON array");
            None
        }
    }
}

/// Repair a single verdict entry: missing index falls back to array
/// position, the verdict is normalized onto the label set, and both text
/// fields are cleaned and truncated.
fn repair_entry(entry: &Value, position: usize) -> AiVerdict {
    let index = entry
        .get("index")
        .and_then(Value::as_u64)
        .map(|index| index as usize)
        .unwrap_or(position);
    let raw_verdict = entry.get("verdict").and_then(Value::as_str).unwrap_or("");
    let raw_analysis = entry.get("analysis").and_then(Value::as_str).unwrap_or("");
    let raw_recommendations = entry
        .get("recommendations")
        .and_then(Value::as_str)
        .unwrap_or("");

    AiVerdict {
        index,
        verdict: verdict::normalize_verdict(raw_verdict),
        analysis: verdict::clean_analysis(raw_analysis),
        recommendations: verdict::clean_recommendations(raw_recommendations),
    }
}

/// Pair campaigns with verdicts by index. Duplicate indices keep the first
/// claim; campaigns nothing claimed get a fallback verdict, so cardinality
/// and order always match the input.
fn merge_verdicts(
    campaigns: Vec<EnrichedCampaign>,
    verdicts: Vec<AiVerdict>,
) -> Vec<AnalyzedCampaign> {
    let mut by_index: HashMap<usize, AiVerdict> = HashMap::with_capacity(verdicts.len());
    for verdict in verdicts {
        by_index.entry(verdict.index).or_insert(verdict);
    }

    campaigns
        .into_iter()
        .enumerate()
        .map(|(position, campaign)| {
            let verdict = by_index
                .remove(&position)
                .unwrap_or_else(|| fallback::fallback_verdict(position));
            AnalyzedCampaign {
                campaign,
                ai_verdict: verdict.verdict,
                ai_analysis: verdict.analysis,
                ai_recommendations: verdict.recommendations,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::llm::{Choice, Usage};

    fn stub_response(content: &str) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: "chatcmpl-test".to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: "gpt-4o-mini".to_string(),
            choices: vec![Choice {
                index: 0,
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: content.to_string(),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: Some(Usage {
                prompt_tokens: 120,
                completion_tokens: 40,
                total_tokens: 160,
            }),
        }
    }

    struct StubChat {
        content: String,
    }

    #[async_trait]
    impl ChatApi for StubChat {
        async fn chat_completion(
            &self,
            _request: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, LlmError> {
            Ok(stub_response(&self.content))
        }
    }

    struct FailingChat;

    #[async_trait]
    impl ChatApi for FailingChat {
        async fn chat_completion(
            &self,
            _request: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, LlmError> {
            Err(LlmError::Network("connection refused".to_string()))
        }
    }

    struct CountingChat {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl ChatApi for CountingChat {
        async fn chat_completion(
            &self,
            _request: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(LlmError::Network("connection reset".to_string()))
            } else {
                Ok(stub_response("[]"))
            }
        }
    }

    fn analyzer_with(content: &str) -> CampaignAnalyzer {
        CampaignAnalyzer::new(
            OpenAiConfig::default(),
            Some(Arc::new(StubChat {
                content: content.to_string(),
            })),
        )
    }

    fn campaign(name: &str, spend: f64, revenue: f64) -> CampaignTotals {
        CampaignTotals {
            id: format!("c-{name}"),
            name: name.to_string(),
            objective: "OUTCOME_SALES".to_string(),
            spend,
            revenue,
            clicks: 50.0,
            impressions: 10_000.0,
            purchases: 5.0,
            add_to_cart: 80.0,
            initiate_checkout: 20.0,
            ..Default::default()
        }
    }

    fn two_campaigns() -> Vec<CampaignTotals> {
        vec![campaign("alpha", 100.0, 250.0), campaign("beta", 300.0, 900.0)]
    }

    #[tokio::test]
    async fn test_no_client_uses_fallback_verdicts() {
        let analyzer = CampaignAnalyzer::new(OpenAiConfig::default(), None);
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        assert_eq!(result.len(), 2);
        for analyzed in &result {
            assert_eq!(analyzed.ai_verdict, Verdict::NeedsImprovement);
            assert_eq!(analyzed.ai_analysis, fallback::FALLBACK_ANALYSIS);
        }
        // Enrichment still ran: 100 / 50 clicks.
        assert_eq!(result[0].campaign.cpc, 2.0);
    }

    #[tokio::test]
    async fn test_ai_verdicts_merged_in_order() {
        let analyzer = analyzer_with(
            r#"[
                {"index": 0, "verdict": "Excellent Performance", "analysis": "Strong ROAS.", "recommendations": "Scale 20%."},
                {"index": 1, "verdict": "Poor Performance", "analysis": "CPA above target.", "recommendations": "Pause and rework creative."}
            ]"#,
        );
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].ai_verdict, Verdict::Excellent);
        assert_eq!(result[0].ai_analysis, "Strong ROAS.");
        assert_eq!(result[1].ai_verdict, Verdict::Poor);
        assert_eq!(result[1].ai_recommendations, "Pause and rework creative.");
    }

    #[tokio::test]
    async fn test_fenced_output_still_parses() {
        let analyzer = analyzer_with(
            "```json\n[{\"index\": 0, \"verdict\": \"Good Performance\", \"analysis\": \"ok\", \"recommendations\": \"ok\"},\n{\"index\": 1, \"verdict\": \"Good Performance\", \"analysis\": \"ok\", \"recommendations\": \"ok\"}]\n```",
        );
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;
        assert_eq!(result[0].ai_verdict, Verdict::Good);
        assert_eq!(result[1].ai_verdict, Verdict::Good);
    }

    #[tokio::test]
    async fn test_count_mismatch_discards_whole_batch() {
        let analyzer = analyzer_with(
            r#"[{"index": 0, "verdict": "Good Performance", "analysis": "ok", "recommendations": "ok"}]"#,
        );
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        // One entry for two campaigns: both fall back, including index 0.
        assert_eq!(result[0].ai_verdict, Verdict::NeedsImprovement);
        assert_eq!(result[1].ai_verdict, Verdict::NeedsImprovement);
    }

    #[tokio::test]
    async fn test_garbage_output_falls_back() {
        let analyzer = analyzer_with("The campaigns are performing adequately overall.");
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;
        assert!(result
            .iter()
            .all(|a| a.ai_verdict == Verdict::NeedsImprovement));
    }

    #[tokio::test]
    async fn test_failing_client_falls_back() {
        let analyzer =
            CampaignAnalyzer::new(OpenAiConfig::default(), Some(Arc::new(FailingChat)));
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        assert_eq!(result.len(), 2);
        assert!(result
            .iter()
            .all(|a| a.ai_verdict == Verdict::NeedsImprovement));
    }

    #[tokio::test]
    async fn test_out_of_range_index_leaves_fallback_gap() {
        let analyzer = analyzer_with(
            r#"[
                {"index": 0, "verdict": "Good Performance", "analysis": "ok", "recommendations": "ok"},
                {"index": 7, "verdict": "Poor Performance", "analysis": "ok", "recommendations": "ok"}
            ]"#,
        );
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        assert_eq!(result[0].ai_verdict, Verdict::Good);
        // Index 7 matches nothing; position 1 gets a fallback instead.
        assert_eq!(result[1].ai_verdict, Verdict::NeedsImprovement);
    }

    #[tokio::test]
    async fn test_duplicate_index_first_claim_wins() {
        let analyzer = analyzer_with(
            r#"[
                {"index": 0, "verdict": "Good Performance", "analysis": "first", "recommendations": "ok"},
                {"index": 0, "verdict": "Poor Performance", "analysis": "second", "recommendations": "ok"}
            ]"#,
        );
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        assert_eq!(result[0].ai_verdict, Verdict::Good);
        assert_eq!(result[0].ai_analysis, "first");
        assert_eq!(result[1].ai_verdict, Verdict::NeedsImprovement);
    }

    #[tokio::test]
    async fn test_missing_entry_fields_are_repaired() {
        let analyzer = analyzer_with(r#"[{}, {"verdict": "Poor Performance"}]"#);
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        // Missing index falls back to array position.
        assert_eq!(result[0].ai_verdict, Verdict::Average);
        assert_eq!(
            result[0].ai_analysis,
            "No analysis was provided for this campaign."
        );
        assert_eq!(result[1].ai_verdict, Verdict::Poor);
    }

    #[tokio::test]
    async fn test_oversized_analysis_is_truncated() {
        let long = "word ".repeat(200);
        let analyzer = analyzer_with(&format!(
            r#"[
                {{"index": 0, "verdict": "Good Performance", "analysis": "{long}", "recommendations": "ok"}},
                {{"index": 1, "verdict": "Good Performance", "analysis": "ok", "recommendations": "ok"}}
            ]"#
        ));
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        assert_eq!(result[0].ai_analysis.chars().count(), 400);
        assert!(result[0].ai_analysis.ends_with("..."));
    }

    #[tokio::test]
    async fn test_empty_batch_never_calls_model() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = CampaignAnalyzer::new(
            OpenAiConfig::default(),
            Some(Arc::new(CountingChat {
                calls: calls.clone(),
                fail: false,
            })),
        );

        let result = analyzer.analyze(&[], 0.0).await;

        assert!(result.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_retry_disabled_makes_one_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = CampaignAnalyzer::new(
            OpenAiConfig::default(),
            Some(Arc::new(CountingChat {
                calls: calls.clone(),
                fail: true,
            })),
        );

        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result[0].ai_verdict, Verdict::NeedsImprovement);
    }

    #[tokio::test]
    async fn test_retry_enabled_makes_two_calls() {
        let calls = Arc::new(AtomicUsize::new(0));
        let config = OpenAiConfig {
            retry_on_failure: true,
            ..Default::default()
        };
        let analyzer = CampaignAnalyzer::new(
            config,
            Some(Arc::new(CountingChat {
                calls: calls.clone(),
                fail: true,
            })),
        );

        let result = analyzer.analyze(&two_campaigns(), 400.0).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(result[0].ai_verdict, Verdict::NeedsImprovement);
    }

    #[tokio::test]
    async fn test_prompt_logging_builder() {
        let analyzer =
            CampaignAnalyzer::new(OpenAiConfig::default(), None).with_prompt_logging(true);
        assert!(!analyzer.has_client());
        // Prompt logging with no client never reaches the prompt stage.
        let result = analyzer.analyze(&two_campaigns(), 400.0).await;
        assert_eq!(result.len(), 2);
    }
}
