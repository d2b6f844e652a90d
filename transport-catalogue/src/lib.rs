//! Transport catalogue and journey router.
//!
//! Stores bus stops and bus routes, answers statistics about routes and
//! stops, and finds the fastest journey between two stops given a fixed
//! boarding wait and a constant bus speed.

pub mod cache;
pub mod catalogue;
pub mod domain;
pub mod requests;
pub mod router;
pub mod snapshot;
pub mod web;
