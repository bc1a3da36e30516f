//! ocean-core — Questionnaire model, scoring, and session state machine.
//!
//! This crate holds everything about an assessment that does not touch the
//! network: the statement catalog, response tracking, the completion gate,
//! trait scoring, report formatting, and the per-session state machine.

pub mod error;
pub mod model;
pub mod render;
pub mod report;
pub mod responses;
pub mod scoring;
pub mod session;
pub mod traits;

pub use error::{DispatchError, RangeError, TransitionError};
pub use model::{Age, Rating, RespondentProfile, Statement, Trait, STATEMENTS, STATEMENT_COUNT};
pub use responses::ResponseSet;
pub use scoring::{score, TraitScores};
pub use session::{transition, Event, Session, SessionState};
