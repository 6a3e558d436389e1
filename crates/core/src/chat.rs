use crate::embeddings::Embedder;
use crate::error::ChatError;
use crate::generation::TextGenerator;
use crate::traits::VectorIndex;
use tracing::debug;

/// Matches the similarity-search default of the upstream vector-store client.
pub const DEFAULT_TOP_K: usize = 4;

/// What to do when the similarity search over the named collection comes back
/// empty. The original service shipped both behaviors in parallel controller
/// variants; the policy makes the choice explicit per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyContextPolicy {
    /// Answer from general knowledge, without revealing the missing grounding.
    #[default]
    GeneralKnowledge,
    /// Report that no relevant content exists (surfaced as 404).
    NotFound,
}

/// Retrieval-augmented answer flow: embed the query, search the collection,
/// assemble a context block, ask the generative model.
pub struct AnswerCoordinator<E, V, G>
where
    E: Embedder,
    V: VectorIndex,
    G: TextGenerator,
{
    embedder: E,
    vector: V,
    generator: G,
    policy: EmptyContextPolicy,
    top_k: usize,
}

impl<E, V, G> AnswerCoordinator<E, V, G>
where
    E: Embedder,
    V: VectorIndex,
    G: TextGenerator,
{
    pub fn new(embedder: E, vector: V, generator: G) -> Self {
        Self {
            embedder,
            vector,
            generator,
            policy: EmptyContextPolicy::default(),
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_policy(mut self, policy: EmptyContextPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub async fn answer(&self, query: &str, collection: &str) -> Result<String, ChatError> {
        let query_vector = self.embedder.embed(query).await?;
        let hits = self
            .vector
            .similar_chunks(collection, &query_vector, self.top_k)
            .await?;

        debug!(collection, hits = hits.len(), "similarity search done");

        let system_prompt = if hits.is_empty() {
            if self.policy == EmptyContextPolicy::NotFound {
                return Err(ChatError::NoRelevantContent);
            }
            general_knowledge_prompt().to_string()
        } else {
            let context = hits
                .iter()
                .map(|hit| hit.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");
            grounded_prompt(&context, self.policy)
        };

        let response = self.generator.generate(&system_prompt, query).await?;
        Ok(response)
    }
}

fn grounded_prompt(context: &str, policy: EmptyContextPolicy) -> String {
    match policy {
        EmptyContextPolicy::GeneralKnowledge => format!(
            "You are a helpful assistant that can answer questions from the provided context. \
             If the context does not contain the information needed, answer from your general \
             knowledge without mentioning the context.\nContext:\n{context}"
        ),
        EmptyContextPolicy::NotFound => format!(
            "You are a helpful assistant that can answer questions from the provided context.\n\
             Context:\n{context}"
        ),
    }
}

fn general_knowledge_prompt() -> &'static str {
    "You are a helpful medical assistant. Answer the question using your general knowledge."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EmbedError, GenerateError, SearchError};
    use crate::models::{DocumentChunk, ScoredChunk};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeEmbedder;

    #[async_trait]
    impl Embedder for FakeEmbedder {
        fn dimensions(&self) -> usize {
            4
        }

        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
            Ok(vec![0.1; 4])
        }
    }

    #[derive(Default)]
    struct FixedVectorIndex {
        hits: Vec<ScoredChunk>,
    }

    #[async_trait]
    impl VectorIndex for FixedVectorIndex {
        async fn collection_exists(&self, _collection: &str) -> Result<bool, SearchError> {
            Ok(false)
        }

        async fn create_collection(
            &self,
            _collection: &str,
            _vector_size: usize,
        ) -> Result<(), SearchError> {
            Ok(())
        }

        async fn delete_collection(&self, _collection: &str) -> Result<(), SearchError> {
            Ok(())
        }

        async fn upsert_chunks(
            &self,
            _collection: &str,
            _chunks: &[DocumentChunk],
            _embeddings: &[Vec<f32>],
        ) -> Result<(), SearchError> {
            Ok(())
        }

        async fn similar_chunks(
            &self,
            _collection: &str,
            _query_vector: &[f32],
            _top_k: usize,
        ) -> Result<Vec<ScoredChunk>, SearchError> {
            Ok(self.hits.clone())
        }
    }

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(
            &self,
            system_prompt: &str,
            _query: &str,
        ) -> Result<String, GenerateError> {
            self.prompts.lock().unwrap().push(system_prompt.to_string());
            Ok("generated answer".to_string())
        }
    }

    fn hit(text: &str) -> ScoredChunk {
        ScoredChunk {
            text: text.to_string(),
            score: 0.9,
            file_name: "report.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn retrieved_chunks_end_up_in_the_context() {
        let vector = FixedVectorIndex {
            hits: vec![hit("Chunk one."), hit("HbA1c was 8.2 percent."), hit("Chunk three.")],
        };
        let coordinator = AnswerCoordinator::new(FakeEmbedder, vector, RecordingGenerator::default());

        let answer = coordinator
            .answer("What was the HbA1c?", "medical-reports-abc")
            .await
            .expect("answer should succeed");

        assert_eq!(answer, "generated answer");
        let prompts = coordinator.generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("HbA1c was 8.2 percent."));
        assert!(prompts[0].contains("Chunk one.\n\nHbA1c was 8.2 percent."));
    }

    #[tokio::test]
    async fn empty_results_fall_back_to_general_knowledge() {
        let coordinator = AnswerCoordinator::new(
            FakeEmbedder,
            FixedVectorIndex::default(),
            RecordingGenerator::default(),
        );

        let answer = coordinator
            .answer("What is diabetes?", "medical-reports-missing")
            .await
            .expect("fallback path should still answer");

        assert_eq!(answer, "generated answer");
        let prompts = coordinator.generator.prompts.lock().unwrap();
        assert!(!prompts[0].contains("Context:"));
        assert!(prompts[0].contains("general knowledge"));
    }

    #[tokio::test]
    async fn not_found_policy_rejects_empty_results() {
        let coordinator = AnswerCoordinator::new(
            FakeEmbedder,
            FixedVectorIndex::default(),
            RecordingGenerator::default(),
        )
        .with_policy(EmptyContextPolicy::NotFound);

        let result = coordinator
            .answer("What is diabetes?", "medical-reports-missing")
            .await;

        assert!(matches!(result, Err(ChatError::NoRelevantContent)));
    }

    #[tokio::test]
    async fn strict_policy_keeps_the_context_only_prompt() {
        let vector = FixedVectorIndex {
            hits: vec![hit("Chest X-ray clear.")],
        };
        let coordinator =
            AnswerCoordinator::new(FakeEmbedder, vector, RecordingGenerator::default())
                .with_policy(EmptyContextPolicy::NotFound);

        coordinator
            .answer("Any findings?", "medical-reports-abc")
            .await
            .expect("answer should succeed");

        let prompts = coordinator.generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("Chest X-ray clear."));
        assert!(!prompts[0].contains("general knowledge"));
    }
}
