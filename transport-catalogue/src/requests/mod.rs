//! JSON request processing.
//!
//! A request document carries base requests that populate the catalogue,
//! optional routing settings, and stat requests answered once the catalogue
//! is complete.

mod dto;
mod error;
mod handler;

pub use dto::*;
pub use error::RequestError;
pub use handler::{RequestHandler, load_catalogue, process, read_document, write_responses};
