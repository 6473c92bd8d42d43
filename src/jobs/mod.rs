//! Background jobs.

mod invite_sweep;

pub use invite_sweep::{run_invite_sweep, sweep_once};
