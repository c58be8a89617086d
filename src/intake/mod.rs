//! Intake — the scripted four-question profile collection.
//!
//! Each accepted answer fills exactly one field of the [`IntakeRecord`] and
//! moves the [`IntakeStep`] forward. Once complete, the record is the body of
//! the recommendation request.

pub mod model;
pub mod state;

pub use model::IntakeRecord;
pub use state::IntakeStep;
