//! The Mapbox GL widget: raw bindings and the wrapper the map page drives.

pub mod mapbox;
pub mod widget;
