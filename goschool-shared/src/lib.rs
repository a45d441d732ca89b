#![cfg_attr(not(test), forbid(unsafe_code))]

//! Platform-neutral building blocks for the goSchool.uk web client.
//!
//! Everything here compiles for the host target so it can be unit tested
//! without a browser; the `goschool-web` crate layers Yew components, HTTP
//! and the Mapbox widget on top.

pub mod api;
pub mod listing;
pub mod map;
pub mod models;
pub mod notice;
pub mod sequence;
pub mod session;
pub mod upload;
