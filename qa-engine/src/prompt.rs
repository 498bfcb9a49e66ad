//! Prompt builder: fixed system message + context assembly.

use rag_store::SearchResult;
use tracing::debug;

/// System instruction for the generation backend.
///
/// Keep this short: it consistently improves steering without wasting tokens.
pub const SYSTEM_PROMPT: &str =
    "You are an assistant for university students. Answer briefly and to the point.";

/// Sentinel context used when retrieval produced nothing.
pub const EMPTY_CONTEXT: &str = "No information was found in the knowledge base.";

/// How many top-ranked results are assembled into the context.
pub const CONTEXT_TOP_N: usize = 3;

/// Visible separator between context entries.
const CONTEXT_SEPARATOR: &str = "\n---\n";

/// Assembles the generation context from ranked search results.
///
/// Takes the top [`CONTEXT_TOP_N`] results in ranked order, prefixes each
/// with its similarity score, and joins them with a visible separator. An
/// empty result set yields the [`EMPTY_CONTEXT`] sentinel.
pub fn prepare_context(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return EMPTY_CONTEXT.to_string();
    }

    let parts: Vec<String> = results
        .iter()
        .take(CONTEXT_TOP_N)
        .map(|r| format!("Relevance: {:.3}:\n{}\n", r.similarity_score, r.content))
        .collect();

    let context = parts.join(CONTEXT_SEPARATOR);
    debug!(
        sources = parts.len(),
        context_len = context.chars().count(),
        "context prepared"
    );
    context
}

/// Builds the user turn combining context and question.
pub fn build_user_prompt(question: &str, context: &str) -> String {
    format!(
        "Context from the knowledge base:\n{context}\n\n\
         Student question: {question}\n\n\
         Answer the question using only the information from the provided context.\n\
         If the information is insufficient, say that you do not have it and that \
         the student should contact a university representative directly.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f32, content: &str) -> SearchResult {
        SearchResult {
            id: "doc.txt_0".into(),
            content: content.into(),
            similarity_score: score,
        }
    }

    #[test]
    fn empty_results_yield_the_sentinel() {
        assert_eq!(prepare_context(&[]), EMPTY_CONTEXT);
    }

    #[test]
    fn entries_carry_score_prefix_and_separator() {
        let results = vec![
            result(0.9, "Session starts January 9."),
            result(0.5, "Exams are in building B."),
        ];
        let context = prepare_context(&results);
        assert_eq!(
            context,
            "Relevance: 0.900:\nSession starts January 9.\n\
             \n---\n\
             Relevance: 0.500:\nExams are in building B.\n"
        );
    }

    #[test]
    fn only_top_three_results_are_included() {
        let results: Vec<SearchResult> = (0..5)
            .map(|i| result(0.9 - 0.1 * i as f32, &format!("chunk {i}")))
            .collect();
        let context = prepare_context(&results);
        assert!(context.contains("chunk 0"));
        assert!(context.contains("chunk 2"));
        assert!(!context.contains("chunk 3"));
        assert_eq!(context.matches("---").count(), 2);
    }

    #[test]
    fn user_prompt_embeds_question_and_context() {
        let prompt = build_user_prompt("When does the session start?", "ctx");
        assert!(prompt.contains("Student question: When does the session start?"));
        assert!(prompt.contains("Context from the knowledge base:\nctx"));
        assert!(prompt.contains("using only the information"));
    }
}
