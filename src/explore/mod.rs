//! Map/list exploration: persisted bounds flow through a debounce, get
//! parsed, drive the listings query, and the last good result is kept on
//! screen while a refetch is outstanding.

pub mod bounds;
pub mod debounce;
pub mod last_known;
pub mod map_view;
pub mod query;
pub mod session;

pub use bounds::{parse_bounds_or_fallback, FALLBACK_BOUNDS};
pub use session::{ExploreSessions, PanelPlan};
