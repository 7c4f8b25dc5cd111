//! Read cache of the book collection
//!
//! [`BookCache`] holds every book in memory for lock-free reads.
//! [`CacheSync`] keeps it current from the store's change events and falls
//! back to a full [`reconcile`] whenever an event cannot be applied safely.
//!
//! # Listener States
//!
//! | State | Description |
//! |-------|-------------|
//! | Unarmed | Constructed, no subscription yet |
//! | Bootstrapping | Initial full load |
//! | Armed | Applying events |
//! | Stopped | Cancelled or event stream closed |

pub mod listener;
pub mod materialized;
pub mod reconcile;
pub mod state;
pub mod target;

pub use listener::{CacheSync, EventOutcome, SyncHandle};
pub use materialized::BookCache;
pub use reconcile::reconcile;
pub use state::{ListenerState, StatusHandle, SyncStatus};
pub use target::EventTarget;
