// Interview flow: session model, per-step validation, assistant copy and the
// state machine that ties them together.

pub mod controller;
pub mod messages;
pub mod models;
pub mod validation;

pub use controller::{Action, Interview, Outcome};
