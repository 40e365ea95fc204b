//! Site content: record types, the local JSON store, and track builders.

mod defaults;
mod model;
mod store;
mod tracks;

pub use model::*;
pub use store::{ContentChange, ContentKey, ContentStore, Record, StoreError};
pub use tracks::*;
