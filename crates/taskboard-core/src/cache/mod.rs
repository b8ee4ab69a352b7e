//! Cache Layer
//!
//! Local mirrors of server-side collections.

mod category;
mod entity_cache;
mod task;

pub use category::CategoryCache;
pub use entity_cache::EntityCache;
pub use task::TaskCache;
