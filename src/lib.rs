//! Reasoning core for small-claims dispute adjudication.
//!
//! The crate runs a multi-stage analytical pipeline over two competing
//! narratives and can compare the outcome across several simulated
//! decision-maker archetypes. Transport, storage backends, and corpus
//! ingestion are external collaborators reached through traits.

pub mod comparison;
pub mod engine;
pub mod gateway;
pub mod model;
pub mod rules;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;
