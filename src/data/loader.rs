use std::path::Path;

use hdf5::types::{FloatSize, IntSize, TypeDescriptor};
use hdf5_sys::h5d::H5Dread;
use hdf5_sys::h5p::H5P_DEFAULT;
use hdf5_sys::h5s::H5S_ALL;
use num_complex::Complex64;

use super::error::LoadError;
use super::layout::{ComplexPair32, ComplexPair64};
use super::model::{format_shape, IqMatrix, LabelArray, Precision, RadarDataset};
use super::sync::with_hdf5;

/// Name of the complex waveform matrix inside the container.
pub const IQ_ARRAY: &str = "iq";
/// Name of the per-waveform annotation array.
pub const LABELS_ARRAY: &str = "labels";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the `iq` and `labels` arrays of a RadChar container.
///
/// The file is opened read-only and every HDF5 handle is a local of
/// [`read_container`], so the container is closed again on every return path
/// before the session lock is released and the caller gets the dataset back.
pub fn load_file(path: &Path) -> Result<RadarDataset, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    with_hdf5(|| read_container(path))
}

fn read_container(path: &Path) -> Result<RadarDataset, LoadError> {
    let file = hdf5::File::open(path)?;
    let names = file.member_names()?;
    log::debug!("{}: members {names:?}", path.display());

    for required in [IQ_ARRAY, LABELS_ARRAY] {
        if !names.iter().any(|n| n == required) {
            return Err(LoadError::MissingArray {
                name: required.to_string(),
                available: names,
            });
        }
    }

    let iq = read_iq(&file.dataset(IQ_ARRAY)?)?;
    let labels = read_labels(&file.dataset(LABELS_ARRAY)?)?;

    if iq.rows() != labels.len() {
        log::warn!(
            "{}: {} waveforms but {} labels",
            path.display(),
            iq.rows(),
            labels.len()
        );
    }

    log::info!(
        "Loaded {} arrays from {}: iq {} {}, labels {} {}",
        names.len(),
        path.display(),
        format_shape(&iq.shape()),
        iq.precision(),
        format_shape(labels.shape()),
        labels.element_type()
    );

    Ok(RadarDataset { names, iq, labels })
}

// ---------------------------------------------------------------------------
// iq
// ---------------------------------------------------------------------------

fn read_iq(ds: &hdf5::Dataset) -> Result<IqMatrix, LoadError> {
    let ndim = ds.ndim();
    if ndim != 2 {
        return Err(LoadError::UnexpectedRank {
            name: IQ_ARRAY.to_string(),
            expected: 2,
            found: ndim,
        });
    }

    let descriptor = ds.dtype()?.to_descriptor()?;
    let precision = complex_precision(&descriptor).ok_or_else(|| LoadError::UnsupportedType {
        name: IQ_ARRAY.to_string(),
        detail: describe(&descriptor),
    })?;

    let samples = match precision {
        Precision::Single => ds.read_2d::<ComplexPair32>()?.mapv(Complex64::from),
        Precision::Double => ds.read_2d::<ComplexPair64>()?.mapv(Complex64::from),
    };
    log::debug!("read {IQ_ARRAY}: {:?} {precision}", samples.dim());

    Ok(IqMatrix::new(samples, precision))
}

/// Recognise h5py's complex layout: compound `{ r: float, i: float }`.
pub fn complex_precision(descriptor: &TypeDescriptor) -> Option<Precision> {
    let TypeDescriptor::Compound(compound) = descriptor else {
        return None;
    };
    let [re, im] = compound.fields.as_slice() else {
        return None;
    };
    if re.name != "r" || im.name != "i" {
        return None;
    }
    match (&re.ty, &im.ty) {
        (TypeDescriptor::Float(FloatSize::U4), TypeDescriptor::Float(FloatSize::U4)) => {
            Some(Precision::Single)
        }
        (TypeDescriptor::Float(FloatSize::U8), TypeDescriptor::Float(FloatSize::U8)) => {
            Some(Precision::Double)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// labels
// ---------------------------------------------------------------------------

fn read_labels(ds: &hdf5::Dataset) -> Result<LabelArray, LoadError> {
    let dtype = ds.dtype()?;
    let descriptor = dtype.to_descriptor()?;
    if !is_fixed_size(&descriptor) {
        return Err(LoadError::UnsupportedType {
            name: LABELS_ARRAY.to_string(),
            detail: describe(&descriptor),
        });
    }

    let element_size = dtype.size();
    let mut bytes = vec![0u8; element_size * ds.size()];
    if !bytes.is_empty() {
        // SAFETY: the memory type is the dataset's own fixed-size type, so the
        // library copies `ds.size()` elements of `element_size` bytes each,
        // which is exactly the length of `bytes`. Only reachable from
        // `load_file`, which holds the HDF5 session lock.
        let status = unsafe {
            H5Dread(
                ds.id(),
                dtype.id(),
                H5S_ALL,
                H5S_ALL,
                H5P_DEFAULT,
                bytes.as_mut_ptr().cast(),
            )
        };
        if status < 0 {
            return Err(LoadError::Read {
                name: LABELS_ARRAY.to_string(),
            });
        }
    }
    log::debug!("read {LABELS_ARRAY}: {} bytes", bytes.len());

    Ok(LabelArray::new(
        ds.shape(),
        describe(&descriptor),
        element_size,
        bytes,
    ))
}

/// Whether every byte of an element is inline data rather than a pointer.
fn is_fixed_size(descriptor: &TypeDescriptor) -> bool {
    match descriptor {
        TypeDescriptor::VarLenArray(_)
        | TypeDescriptor::VarLenAscii
        | TypeDescriptor::VarLenUnicode => false,
        TypeDescriptor::FixedArray(inner, _) => is_fixed_size(inner),
        TypeDescriptor::Compound(compound) => compound.fields.iter().all(|f| is_fixed_size(&f.ty)),
        _ => true,
    }
}

// ---------------------------------------------------------------------------
// Type descriptions for diagnostics
// ---------------------------------------------------------------------------

/// NumPy-flavoured name for an HDF5 element type.
pub fn describe(descriptor: &TypeDescriptor) -> String {
    match descriptor {
        TypeDescriptor::Integer(size) => format!("int{}", int_bits(*size)),
        TypeDescriptor::Unsigned(size) => format!("uint{}", int_bits(*size)),
        TypeDescriptor::Float(FloatSize::U4) => "float32".to_string(),
        TypeDescriptor::Float(FloatSize::U8) => "float64".to_string(),
        TypeDescriptor::Boolean => "bool".to_string(),
        TypeDescriptor::Compound(compound) => {
            let fields: Vec<String> = compound
                .fields
                .iter()
                .map(|f| format!("{}: {}", f.name, describe(&f.ty)))
                .collect();
            format!("compound {{ {} }}", fields.join(", "))
        }
        TypeDescriptor::FixedArray(inner, len) => format!("[{}; {len}]", describe(inner)),
        TypeDescriptor::FixedAscii(len) => format!("ascii[{len}]"),
        TypeDescriptor::FixedUnicode(len) => format!("utf8[{len}]"),
        TypeDescriptor::VarLenArray(inner) => format!("vlen[{}]", describe(inner)),
        TypeDescriptor::VarLenAscii => "vlen ascii".to_string(),
        TypeDescriptor::VarLenUnicode => "vlen utf8".to_string(),
        other => format!("{other:?}"),
    }
}

fn int_bits(size: IntSize) -> u32 {
    match size {
        IntSize::U1 => 8,
        IntSize::U2 => 16,
        IntSize::U4 => 32,
        IntSize::U8 => 64,
    }
}

#[cfg(test)]
mod tests {
    use hdf5::types::{CompoundField, CompoundType};

    use super::*;

    fn compound(fields: &[(&str, TypeDescriptor)]) -> TypeDescriptor {
        let mut offset = 0;
        let fields = fields
            .iter()
            .enumerate()
            .map(|(index, (name, ty))| {
                let field = CompoundField {
                    name: name.to_string(),
                    ty: ty.clone(),
                    offset,
                    index,
                };
                offset += ty.size();
                field
            })
            .collect();
        TypeDescriptor::Compound(CompoundType { fields, size: offset })
    }

    #[test]
    fn recognises_both_complex_widths() {
        let single = compound(&[
            ("r", TypeDescriptor::Float(FloatSize::U4)),
            ("i", TypeDescriptor::Float(FloatSize::U4)),
        ]);
        let double = compound(&[
            ("r", TypeDescriptor::Float(FloatSize::U8)),
            ("i", TypeDescriptor::Float(FloatSize::U8)),
        ]);
        assert_eq!(complex_precision(&single), Some(Precision::Single));
        assert_eq!(complex_precision(&double), Some(Precision::Double));
    }

    #[test]
    fn other_layouts_are_not_complex() {
        let swapped = compound(&[
            ("i", TypeDescriptor::Float(FloatSize::U4)),
            ("r", TypeDescriptor::Float(FloatSize::U4)),
        ]);
        let mixed = compound(&[
            ("r", TypeDescriptor::Float(FloatSize::U4)),
            ("i", TypeDescriptor::Float(FloatSize::U8)),
        ]);
        assert_eq!(complex_precision(&swapped), None);
        assert_eq!(complex_precision(&mixed), None);
        assert_eq!(complex_precision(&TypeDescriptor::Float(FloatSize::U8)), None);
    }

    #[test]
    fn describes_label_compounds() {
        let label = compound(&[
            ("index", TypeDescriptor::Integer(IntSize::U8)),
            ("pulse_width", TypeDescriptor::Float(FloatSize::U8)),
        ]);
        assert_eq!(describe(&label), "compound { index: int64, pulse_width: float64 }");
        assert_eq!(describe(&TypeDescriptor::Unsigned(IntSize::U2)), "uint16");
    }

    #[test]
    fn variable_length_members_are_not_fixed_size() {
        let with_string = compound(&[
            ("index", TypeDescriptor::Integer(IntSize::U4)),
            ("name", TypeDescriptor::VarLenUnicode),
        ]);
        assert!(!is_fixed_size(&with_string));
        assert!(is_fixed_size(&TypeDescriptor::FixedArray(
            Box::new(TypeDescriptor::Float(FloatSize::U4)),
            3
        )));
    }
}
