//! State snapshot service
//!
//! Flattening of the dotted key space and the per-activity views handed to
//! rendering components.

mod flatten;
mod snapshot;

pub use flatten::{flatten, unflatten};
pub use snapshot::{
    get_env_state, get_layered_state_snapshot, get_localized_state_snapshot, scoped_key,
    split_scoped_key, ActivityLayer, ACTIVITY_SEPARATOR,
};
