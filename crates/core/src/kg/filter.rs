use crate::models::EntityMatch;
use std::collections::HashSet;

const FILTERED_CAP: usize = 10;
const UNFILTERED_CAP: usize = 10;
const FALLBACK_CAP: usize = 5;

/// Category label to allowed entity/relationship type tokens. Entity types
/// must match a token exactly; relationship types only need to contain one.
fn allowed_types(category: &str) -> &'static [&'static str] {
    match category {
        "symptoms" => &["symptom", "sign"],
        "causes" => &["cause", "risk_factor"],
        "treatment" => &["treatment", "drug", "therapy"],
        "prevention" => &["prevention", "lifestyle"],
        "diagnosis" => &["diagnosis", "test"],
        _ => &[],
    }
}

/// Drops repeated entities, keeping the first occurrence in search order.
pub fn dedup_by_entity_id(matches: Vec<EntityMatch>) -> Vec<EntityMatch> {
    let mut seen = HashSet::new();
    matches
        .into_iter()
        .filter(|item| seen.insert(item.entity.id))
        .collect()
}

/// Ordered fallback chain, deliberately favoring "always return something
/// plausible" over strict precision:
/// 1. no category, or a general/definition one: first 10 unfiltered;
/// 2. entities passing the category's type filter: first 10 of those;
/// 3. nothing passed the filter: first 5 unfiltered.
pub fn filter_by_category(matches: Vec<EntityMatch>, category: Option<&str>) -> Vec<EntityMatch> {
    let category = match category {
        None | Some("") | Some("general") | Some("definition") => {
            return matches.into_iter().take(UNFILTERED_CAP).collect();
        }
        Some(category) => category,
    };

    let allowed = allowed_types(category);

    let filtered: Vec<EntityMatch> = matches
        .iter()
        .filter(|item| matches_category(item, allowed))
        .cloned()
        .collect();

    if !filtered.is_empty() {
        return filtered.into_iter().take(FILTERED_CAP).collect();
    }

    matches.into_iter().take(FALLBACK_CAP).collect()
}

fn matches_category(item: &EntityMatch, allowed: &[&str]) -> bool {
    let entity_type_allowed = item
        .entity
        .entity_type
        .as_deref()
        .is_some_and(|entity_type| allowed.contains(&entity_type));

    entity_type_allowed
        || item.relationships.iter().any(|relationship| {
            relationship
                .relationship_type
                .as_deref()
                .is_some_and(|rel_type| allowed.iter().any(|token| rel_type.contains(token)))
        })
}
