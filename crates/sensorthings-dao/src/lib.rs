//! # SensorThings DAO
//!
//! Resource addressing and response decoding for SensorThings services.
//!
//! ## Addressing Rules
//!
//! - **Entity sets**: `<root>/Things`, or parent-relative `<root>/Things(1)/Datastreams`
//! - **Entities**: `<root>/Things(1)`, string ids quoted as `Things('a')`
//!
//! No requests are made here; the DAOs build URLs and decode bodies.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dao;
pub mod encoding;

pub use dao::{Dao, DaoError, EntityDaoExt};
pub use encoding::{decode_id, encode_id, entity_path, parse_entity_path, EncodingError};
