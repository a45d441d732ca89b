//! Client-side state of the school map: filters, the paint expressions they
//! produce, and the view state machine that drives the map widget.

pub mod filters;
pub mod state;
pub mod style;

pub use filters::{EstablishmentStatus, PhaseFilter, PhaseOfEducation, StatusFilter};
pub use state::{LeftPane, LngLat, MapEffect, MapEvent, MapView};
pub use style::{MapCamera, StyleExpression};
