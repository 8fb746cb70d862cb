//! Data types used for signal processing

use num_complex;

pub type RealSample = f32;

pub type ComplexSample = num_complex::Complex<RealSample>;
