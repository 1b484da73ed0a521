//! Calendar core: the day-bucketed store, the demo generator, read-side
//! projections and the interaction session that drives mutations.

pub mod store;
pub mod generator;
pub mod projector;
pub mod interaction;

pub use interaction::{Action, DetailView, Feedback, Outcome, Session};
pub use projector::{project, Snapshot, SummaryCounts, Tab};
pub use store::{EventStore, ItemDefaults, NewItem};
