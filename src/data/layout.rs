use hdf5::H5Type;
use num_complex::Complex64;

// ---------------------------------------------------------------------------
// On-disk complex layout
// ---------------------------------------------------------------------------
//
// h5py stores NumPy complex arrays as a compound with two float members named
// `r` and `i`. The member names must match for HDF5 to map file fields onto
// these structs.

/// `complex64` element.
#[derive(H5Type, Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct ComplexPair32 {
    pub r: f32,
    pub i: f32,
}

/// `complex128` element.
#[derive(H5Type, Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct ComplexPair64 {
    pub r: f64,
    pub i: f64,
}

impl From<ComplexPair32> for Complex64 {
    fn from(c: ComplexPair32) -> Self {
        Complex64::new(f64::from(c.r), f64::from(c.i))
    }
}

impl From<ComplexPair64> for Complex64 {
    fn from(c: ComplexPair64) -> Self {
        Complex64::new(c.r, c.i)
    }
}

impl From<Complex64> for ComplexPair32 {
    fn from(c: Complex64) -> Self {
        ComplexPair32 {
            r: c.re as f32,
            i: c.im as f32,
        }
    }
}

impl From<Complex64> for ComplexPair64 {
    fn from(c: Complex64) -> Self {
        ComplexPair64 { r: c.re, i: c.im }
    }
}
