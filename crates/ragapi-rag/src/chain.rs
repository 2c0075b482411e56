//! The question-answering chain: retrieve, format, render, generate

use std::sync::Arc;

use ragapi_core::{format_docs, LLMProvider, PromptTemplate, Result, Retriever};

/// Runs the four stages of a request in order
///
/// Every stage depends on the previous one's output, so there is no fan-out;
/// the first error aborts the chain and no partial answer is produced.
pub struct RagChain {
    retriever: Arc<dyn Retriever>,
    llm: Arc<dyn LLMProvider>,
    template: PromptTemplate,
}

impl RagChain {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        llm: Arc<dyn LLMProvider>,
        template: PromptTemplate,
    ) -> Self {
        Self {
            retriever,
            llm,
            template,
        }
    }

    /// Build the prompt for `question` without calling the model
    pub async fn prompt_for(&self, question: &str) -> Result<String> {
        let documents = self.retriever.retrieve(question).await?;
        let context = format_docs(&documents);
        Ok(self.template.render(question, &context))
    }

    /// Answer `question`
    pub async fn invoke(&self, question: &str) -> Result<String> {
        let prompt = self.prompt_for(question).await?;
        let result = self.llm.generate(&prompt).await?;

        tracing::debug!(
            model = %result.model_id,
            tokens = ?result.tokens_used,
            answer_len = result.text.len(),
            "generated answer"
        );
        Ok(result.text)
    }
}
