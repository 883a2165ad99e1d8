//! Load RadChar radar IQ datasets from HDF5 and lay single waveforms out for
//! plotting.

pub mod config;
pub mod data;
