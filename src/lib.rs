//! Vocabulary deck pipeline.
//!
//! Two independently invocable stages share a durable on-disk store:
//! acquisition fetches raw entries per identifier and persists them as
//! divider-joined records, encoding transforms those records into validated
//! field rows and hands a deck to the package writer.

pub mod acquire;
pub mod cli;
pub mod encode;
pub mod index;
pub mod markup;
pub mod package;
pub mod source;
pub mod store;
pub mod tasks;
pub mod template;
pub mod transform;
