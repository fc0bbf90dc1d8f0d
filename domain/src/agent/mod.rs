//! Agent personas and the roster they belong to

pub mod persona;
pub mod roster;
