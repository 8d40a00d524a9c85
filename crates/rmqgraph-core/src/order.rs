//! Presentation ordering.
//!
//! Unranked entities have `sort_order == 0`. Names listed in "render first"
//! get negative ranks, names listed in "render last" positive ones. Ranks
//! only change the sequence in which nodes reach the renderer, never which
//! edges exist.

use std::collections::HashMap;

use crate::entity::{Entity, EntityId, Exchange, Queue};

/// Render-first/last overrides, keyed by entity name across all vhosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderOverrides {
    first: HashMap<String, i32>,
    last: HashMap<String, i32>,
}

impl OrderOverrides {
    /// Build overrides from ordered name lists.
    ///
    /// `first = [a, b, c]` ranks `a = -3, b = -2, c = -1`, so earlier names
    /// render earlier. `last = [x, y]` ranks `x = 1, y = 2`. A name repeated
    /// within one list keeps its first position.
    pub fn new<F, L>(first: F, last: L) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let first = dedup(first);
        let last = dedup(last);
        let count = first.len() as i32;

        Self {
            first: first
                .into_iter()
                .enumerate()
                .map(|(i, name)| (name, i as i32 - count))
                .collect(),
            last: last
                .into_iter()
                .enumerate()
                .map(|(i, name)| (name, i as i32 + 1))
                .collect(),
        }
    }

    /// Build overrides from comma-separated name lists, as given on the
    /// command line. Names are trimmed; empty names are skipped.
    pub fn from_csv(first: Option<&str>, last: Option<&str>) -> Self {
        Self::new(split_csv(first), split_csv(last))
    }

    /// The rank for `name`; a "first" rank wins over a "last" rank.
    pub fn rank(&self, name: &str) -> i32 {
        self.first
            .get(name)
            .or_else(|| self.last.get(name))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.last.is_empty()
    }
}

fn split_csv(list: Option<&str>) -> Vec<String> {
    list.map(|csv| {
        csv.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn dedup<I>(names: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Overwrite every entity's `sort_order` from the overrides.
pub fn apply_overrides(
    queues: &mut [Queue],
    exchanges: &mut [Exchange],
    overrides: &OrderOverrides,
) {
    for q in queues.iter_mut() {
        q.sort_order = overrides.rank(&q.name);
    }
    for x in exchanges.iter_mut() {
        x.sort_order = overrides.rank(&x.name);
    }
}

/// All entities sorted by `(vhost, sort_order, kind, name)`.
///
/// Entities sharing the whole key keep their input order.
pub fn presentation_order(queues: &[Queue], exchanges: &[Exchange]) -> Vec<EntityId> {
    let mut ids: Vec<EntityId> = (0..exchanges.len())
        .map(EntityId::Exchange)
        .chain((0..queues.len()).map(EntityId::Queue))
        .collect();

    let entity = move |id: &EntityId| match *id {
        EntityId::Queue(i) => Entity::Queue(&queues[i]),
        EntityId::Exchange(i) => Entity::Exchange(&exchanges[i]),
    };
    ids.sort_by(|a, b| entity(a).order_key().cmp(&entity(b).order_key()));
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::Definitions;
    use crate::entity::resolve_entities;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_list_keeps_priority() {
        let overrides = OrderOverrides::from_csv(Some("a,b"), None);
        assert_eq!(overrides.rank("a"), -2);
        assert_eq!(overrides.rank("b"), -1);
        assert_eq!(overrides.rank("c"), 0);
    }

    #[test]
    fn test_last_list_ascends_from_one() {
        let overrides = OrderOverrides::from_csv(None, Some("x, y ,,z"));
        assert_eq!(overrides.rank("x"), 1);
        assert_eq!(overrides.rank("y"), 2);
        assert_eq!(overrides.rank("z"), 3);
    }

    #[test]
    fn test_first_wins_over_last_and_duplicates() {
        let overrides = OrderOverrides::new(["a", "b", "a"], ["a", "c"]);
        assert_eq!(overrides.rank("a"), -2);
        assert_eq!(overrides.rank("b"), -1);
        assert_eq!(overrides.rank("c"), 2);
        assert!(!overrides.is_empty());
        assert!(OrderOverrides::default().is_empty());
    }

    #[test]
    fn test_presentation_order() {
        let defs: Definitions = r#"{
            "queues": [
                {"name": "z"}, {"name": "b"}, {"name": "a"},
                {"name": "early", "vhost": "tenant"}, {"name": "late"}
            ],
            "exchanges": [{"name": "m", "type": "direct"}, {"name": "a", "type": "direct"}]
        }"#
        .parse()
        .unwrap();
        let (mut queues, mut exchanges) = resolve_entities(&defs.queues, &defs.exchanges);
        apply_overrides(
            &mut queues,
            &mut exchanges,
            &OrderOverrides::new(["b"], ["late"]),
        );

        let names: Vec<(&str, &str)> = presentation_order(&queues, &exchanges)
            .into_iter()
            .map(|id| match id {
                EntityId::Queue(i) => ("q", queues[i].name.as_str()),
                EntityId::Exchange(i) => ("x", exchanges[i].name.as_str()),
            })
            .collect();

        assert_eq!(
            names,
            vec![
                ("q", "b"),
                ("x", "a"),
                ("x", "m"),
                ("q", "a"),
                ("q", "z"),
                ("q", "late"),
                ("q", "early"),
            ]
        );
    }
}
