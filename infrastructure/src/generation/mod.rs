//! Generation backend adapters

pub mod anthropic;
