//! State snapshots
//!
//! Keys are either global (`session.tutorialScore`, `variables.x`) or
//! activity-scoped (`<activityId>|stage.<part>.<prop>`). A localized snapshot
//! gives an activity the global keys plus its own scoped keys in qualified
//! form. Scoped `stage.*` keys also appear with the `<activityId>|` prefix
//! stripped; `session.*` and `variables.*` stay global, so a scoped copy
//! never shadows them.

use crate::scripting::{Environment, ScopeId};
use adaptivity_core::{FlattenedState, PartLayout, Value};
use serde::{Deserialize, Serialize};

/// Separator between an activity id and the key it scopes
pub const ACTIVITY_SEPARATOR: char = '|';

/// Split `"<activityId>|<key>"` into its parts; global keys return `None`
pub fn split_scoped_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(ACTIVITY_SEPARATOR)
}

/// Join an activity id and a key into the scoped wire form
pub fn scoped_key(activity_id: &str, key: &str) -> String {
    format!("{}{}{}", activity_id, ACTIVITY_SEPARATOR, key)
}

/// Every variable visible from `scope`, bindings resolved
pub fn get_env_state(env: &Environment, scope: ScopeId) -> FlattenedState {
    env.visible_variables(scope)
        .into_keys()
        .map(|key| (key.to_string(), env.get(scope, key)))
        .collect()
}

/// Slice of the environment visible to the given activities
///
/// Contains every global key, the qualified keys of the listed activities,
/// and their `stage.*` keys with the activity prefix stripped. When several
/// activities expose the same stripped key, the one listed last wins.
pub fn get_localized_state_snapshot<S: AsRef<str>>(
    activity_ids: &[S],
    env: &Environment,
    scope: ScopeId,
) -> FlattenedState {
    localize(&get_env_state(env, scope), activity_ids, |_, _| true)
}

/// One activity in a layered (nested) activity tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLayer {
    pub id: String,
    #[serde(default)]
    pub parts_layout: Vec<PartLayout>,
}

impl ActivityLayer {
    pub fn new(id: impl Into<String>, parts_layout: Vec<PartLayout>) -> Self {
        Self {
            id: id.into(),
            parts_layout,
        }
    }

    pub fn owns_part(&self, part_id: &str) -> bool {
        self.parts_layout.iter().any(|part| part.id == part_id)
    }
}

/// Localized snapshot for a layer tree, honoring part ownership
///
/// A `<activityId>|stage.<partId>.*` key is taken only from the layer whose
/// `partsLayout` declares `partId`; other layers' copies of that key are
/// left out entirely. Parts no layer declares are shared normally.
pub fn get_layered_state_snapshot(
    layers: &[ActivityLayer],
    env: &Environment,
    scope: ScopeId,
) -> FlattenedState {
    let ids: Vec<&str> = layers.iter().map(|layer| layer.id.as_str()).collect();

    localize(&get_env_state(env, scope), &ids, |activity_id, key| {
        let part_id = match stage_part(key) {
            Some(part_id) => part_id,
            None => return true,
        };
        match layers.iter().find(|layer| layer.owns_part(part_id)) {
            Some(owner) if owner.id != activity_id => {
                tracing::debug!(
                    "Dropping {}|{}: part '{}' is owned by '{}'",
                    activity_id,
                    key,
                    part_id,
                    owner.id
                );
                false
            }
            _ => true,
        }
    })
}

/// `stage.<partId>.<prop>` -> `partId`
fn stage_part(key: &str) -> Option<&str> {
    let rest = key.strip_prefix("stage.")?;
    rest.split('.').next().filter(|part| !part.is_empty())
}

fn localize<S, F>(state: &FlattenedState, activity_ids: &[S], include: F) -> FlattenedState
where
    S: AsRef<str>,
    F: Fn(&str, &str) -> bool,
{
    let mut snapshot = FlattenedState::new();
    let mut stripped: Vec<(String, Value)> = Vec::new();

    for (key, value) in state {
        match split_scoped_key(key) {
            None => {
                snapshot.insert(key.clone(), value.clone());
            }
            Some((activity_id, local_key)) => {
                let listed = activity_ids.iter().any(|id| id.as_ref() == activity_id);
                if listed && include(activity_id, local_key) {
                    snapshot.insert(key.clone(), value.clone());
                }
            }
        }
    }

    for id in activity_ids {
        let id = id.as_ref();
        for (key, value) in state {
            if let Some((activity_id, local_key)) = split_scoped_key(key) {
                if activity_id == id
                    && local_key.starts_with("stage.")
                    && include(activity_id, local_key)
                {
                    stripped.push((local_key.to_string(), value.clone()));
                }
            }
        }
    }

    snapshot.extend(stripped);
    snapshot
}
