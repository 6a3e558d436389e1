use crate::error::KgError;
use crate::models::{KgEntity, KgRelationship};
use crate::traits::EntityStore;
use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// Read-only access to the externally owned entity and relationship tables.
#[derive(Clone)]
pub struct PostgresGraph {
    pool: PgPool,
}

impl PostgresGraph {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PostgresGraph {
    async fn entities_matching(
        &self,
        keyword: &str,
        limit: i64,
    ) -> Result<Vec<KgEntity>, KgError> {
        let pattern = format!("%{keyword}%");

        let rows = sqlx::query(
            "SELECT id, name, description, entity_type \
             FROM knowledge_graph_entities \
             WHERE name ILIKE $1 OR description ILIKE $1 \
             LIMIT $2",
        )
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(entity_from_row).collect()
    }

    async fn relationships_for(
        &self,
        entity_id: i64,
        limit: i64,
    ) -> Result<Vec<KgRelationship>, KgError> {
        let rows = sqlx::query(
            "SELECT r.id, r.from_entity_id, r.to_entity_id, r.relationship_type, \
                    f.id AS from_id, f.name AS from_name, \
                    f.description AS from_description, f.entity_type AS from_entity_type, \
                    t.id AS to_id, t.name AS to_name, \
                    t.description AS to_description, t.entity_type AS to_entity_type \
             FROM knowledge_graph_relationships r \
             JOIN knowledge_graph_entities f ON f.id = r.from_entity_id \
             JOIN knowledge_graph_entities t ON t.id = r.to_entity_id \
             WHERE r.from_entity_id = $1 OR r.to_entity_id = $1 \
             LIMIT $2",
        )
        .bind(entity_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(relationship_from_row).collect()
    }
}

fn entity_from_row(row: &PgRow) -> Result<KgEntity, KgError> {
    Ok(KgEntity {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        entity_type: row.try_get("entity_type")?,
    })
}

fn relationship_from_row(row: &PgRow) -> Result<KgRelationship, KgError> {
    Ok(KgRelationship {
        id: row.try_get("id")?,
        from_entity_id: row.try_get("from_entity_id")?,
        to_entity_id: row.try_get("to_entity_id")?,
        relationship_type: row.try_get("relationship_type")?,
        from_entity: KgEntity {
            id: row.try_get("from_id")?,
            name: row.try_get("from_name")?,
            description: row.try_get("from_description")?,
            entity_type: row.try_get("from_entity_type")?,
        },
        to_entity: KgEntity {
            id: row.try_get("to_id")?,
            name: row.try_get("to_name")?,
            description: row.try_get("to_description")?,
            entity_type: row.try_get("to_entity_type")?,
        },
    })
}
