//! Local search operators and the time-budgeted improvement driver.
//!
//! - [`two_opt_improve`] — Intra-route 2-opt edge reversal
//! - [`or_opt_improve`] — Intra-route segment relocation
//! - [`relocate_improve`] — Inter-route customer relocation
//! - [`improve`] — Driver alternating all operators until a local optimum
//!   or the wall-clock budget expires
//!
//! Every operator accepts only strictly improving, capacity-preserving
//! moves, so any intermediate solution is feasible and the final objective
//! is never worse than the input's.

mod deadline;
mod or_opt;
mod relocate;
mod search;
mod two_opt;

pub use deadline::Deadline;
pub use or_opt::or_opt_improve;
pub use relocate::relocate_improve;
pub use search::{improve, improve_with_cancel, SearchConfig, SearchStats};
pub use two_opt::{route_distance, two_opt_improve};
