//! Numerical building blocks shared by curves and surfaces.

pub mod interpolators;
