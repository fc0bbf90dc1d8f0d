//! Bounded prompt context built from the discussion log

pub mod window;
