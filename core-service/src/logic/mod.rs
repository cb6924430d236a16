//! Logic Module - Severity Engine
//!
//! Data flow:
//! `generator` (sampler -> `risk` labels) -> `dataset` (CSV) ->
//! `features` (shared builder) -> `training` -> `model` artifact ->
//! `model::PredictionService`.

pub mod risk;
pub mod features;
pub mod generator;
pub mod dataset;
pub mod model;
pub mod training;
