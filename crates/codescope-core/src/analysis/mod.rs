//! Analysis request/response records exchanged with the analysis service.

pub mod model;
pub mod severity;
