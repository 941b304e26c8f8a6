use async_trait::async_trait;
use tracing::{debug, warn};

use crate::extraction::prompts::{EXTRACT_PROMPT_TEMPLATE, EXTRACT_SYSTEM};
use crate::extraction::{JobRequirements, RequirementExtractor};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_GUESSING_INSTRUCTION};
use crate::llm_client::LlmClient;

/// Long postings are cut to keep the request bounded.
const MAX_DESCRIPTION_CHARS: usize = 12_000;

/// Claude-backed extractor. With no client configured every call yields `None`.
pub struct LlmRequirementExtractor {
    llm: Option<LlmClient>,
}

impl LlmRequirementExtractor {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl RequirementExtractor for LlmRequirementExtractor {
    async fn extract(
        &self,
        title: &str,
        company: &str,
        description: &str,
    ) -> Option<JobRequirements> {
        let Some(llm) = &self.llm else {
            debug!("no LLM configured, skipping extraction");
            return None;
        };

        let prompt = build_prompt(title, company, description);
        let system = format!("{EXTRACT_SYSTEM} {JSON_ONLY_SYSTEM} {NO_GUESSING_INSTRUCTION}");

        match llm.complete_json::<JobRequirements>(&prompt, &system).await {
            Ok(reqs) => Some(reqs),
            Err(e) => {
                warn!(error = %e, title, company, "requirement extraction failed");
                None
            }
        }
    }
}

fn build_prompt(title: &str, company: &str, description: &str) -> String {
    let description: String = description.chars().take(MAX_DESCRIPTION_CHARS).collect();
    EXTRACT_PROMPT_TEMPLATE
        .replace("{title}", title.trim())
        .replace("{company}", company.trim())
        .replace("{description}", description.trim())
}
