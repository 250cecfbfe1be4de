pub mod curve;

pub use curve::{Bezier, Circle, Curve, CurveDomain, Lemniscate};
