//! # Bit-string challenges
//!
//! Ready-made [`Challenge`](crate::evolution::Challenge) implementations for
//! bit-string genotypes. Route scoring lives in [`crate::tsp`].

pub mod analytic;
pub mod bit_count;

pub use analytic::{AnalyticChallenge, FixedPointDecoder, Rastrigin, Rosenbrock, Sphere, TestFunction};
pub use bit_count::BitCount;
