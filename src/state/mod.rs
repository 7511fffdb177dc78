//! Observable grid state.
//!
//! - `observable`: value cells with change-suppressing `set` and subscribers
//! - `scheduler`: next-tick queue for deferred recomputation
//! - `store`: the per-grid store tying inputs to derived windows

mod observable;
mod scheduler;
mod store;

pub use observable::{Observable, SubscriptionId};
pub use scheduler::TickQueue;
pub use store::{GridState, GridStateOptions, BASE_Z_INDEX, FROZEN_Z_INDEX};
