pub mod filter;
pub mod keywords;
mod postgres;

pub use postgres::PostgresGraph;

use crate::models::{EntityMatch, SubQuery, SubQueryResult};
use crate::traits::EntityStore;
use filter::{dedup_by_entity_id, filter_by_category};
use keywords::extract_keywords;
use tracing::warn;

pub const ENTITY_MATCH_LIMIT: i64 = 5;
pub const RELATIONSHIP_LIMIT: i64 = 10;

/// Keyword-driven lookup over the entity and relationship tables. A batch of
/// sub-queries always produces one result entry per sub-query; failures
/// degrade to empty entity lists instead of aborting the batch.
pub struct KnowledgeGraphNavigator<S>
where
    S: EntityStore,
{
    store: S,
}

impl<S> KnowledgeGraphNavigator<S>
where
    S: EntityStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn navigate(&self, sub_queries: &[SubQuery]) -> Vec<SubQueryResult> {
        let mut results = Vec::with_capacity(sub_queries.len());
        for sub_query in sub_queries {
            let entities = self
                .search(&sub_query.query, sub_query.category.as_deref())
                .await;
            results.push(SubQueryResult {
                sub_query: sub_query.query.clone(),
                category: sub_query.category.clone(),
                entities,
            });
        }
        results
    }

    async fn search(&self, query: &str, category: Option<&str>) -> Vec<EntityMatch> {
        let mut found = Vec::new();

        for keyword in extract_keywords(query) {
            let entities = match self
                .store
                .entities_matching(&keyword, ENTITY_MATCH_LIMIT)
                .await
            {
                Ok(entities) => entities,
                Err(error) => {
                    warn!(%keyword, %error, "entity search failed, skipping keyword");
                    continue;
                }
            };

            for entity in entities {
                let relationships = match self
                    .store
                    .relationships_for(entity.id, RELATIONSHIP_LIMIT)
                    .await
                {
                    Ok(relationships) => relationships,
                    Err(error) => {
                        warn!(entity_id = entity.id, %error, "relationship fetch failed");
                        Vec::new()
                    }
                };

                found.push(EntityMatch {
                    entity,
                    relationships,
                });
            }
        }

        filter_by_category(dedup_by_entity_id(found), category)
    }
}
