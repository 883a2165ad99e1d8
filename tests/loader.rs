use std::path::{Path, PathBuf};
use std::thread;

use radchar_viewer::data::error::{LoadError, SelectError};
use radchar_viewer::data::loader::load_file;
use radchar_viewer::data::model::Precision;
use radchar_viewer::data::synth::{write_container, SynthOptions};
use radchar_viewer::data::sync::with_hdf5;
use radchar_viewer::data::waveform::WaveformTrace;
use tempfile::TempDir;

fn small(rows: usize, samples: usize) -> SynthOptions {
    SynthOptions {
        rows,
        samples,
        ..SynthOptions::default()
    }
}

fn write(dir: &TempDir, name: &str, opts: &SynthOptions) -> PathBuf {
    let path = dir.path().join(name);
    write_container(&path, opts).unwrap();
    path
}

#[test]
fn loads_iq_and_labels_with_matching_rows() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "tiny.h5", &small(1200, 512));

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.names, vec!["iq".to_string(), "labels".to_string()]);
    assert_eq!(ds.iq.shape(), [1200, 512]);
    assert_eq!(ds.labels.shape(), &[1200]);
    assert_eq!(ds.iq.rows(), ds.labels.len());
    assert_eq!(ds.iq.precision(), Precision::Single);
    assert!(ds.iq.samples().rows().into_iter().all(|r| r.len() == 512));

    assert_eq!(
        ds.summary().to_string(),
        "['iq', 'labels']\n(1200, 512)\n(1200,)"
    );
}

#[test]
fn labels_are_kept_as_opaque_records() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "tiny.h5", &small(10, 64));

    let ds = load_file(&path).unwrap();
    // i64 + 2 × i32 + 3 × f64
    assert_eq!(ds.labels.element_size(), 40);
    assert_eq!(ds.labels.as_bytes().len(), 400);
    assert!(ds.labels.element_type().starts_with("compound { index: int64"));

    // First field of element 3 is its own row index.
    let third = ds.labels.element(3).unwrap();
    let index = i64::from_ne_bytes(third[..8].try_into().unwrap());
    assert_eq!(index, 3);
}

#[test]
fn double_precision_iq_is_accepted() {
    let dir = TempDir::new().unwrap();
    let opts = SynthOptions {
        precision: Precision::Double,
        ..small(8, 32)
    };
    let path = write(&dir, "double.h5", &opts);

    let ds = load_file(&path).unwrap();
    assert_eq!(ds.iq.precision(), Precision::Double);
    assert_eq!(ds.iq.shape(), [8, 32]);
}

#[test]
fn loading_twice_is_bit_identical() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "tiny.h5", &small(64, 128));

    let first = load_file(&path).unwrap();
    let second = load_file(&path).unwrap();
    assert_eq!(first.labels, second.labels);
    let bits = |ds: &radchar_viewer::data::model::RadarDataset| -> Vec<(u64, u64)> {
        ds.iq
            .samples()
            .iter()
            .map(|s| (s.re.to_bits(), s.im.to_bits()))
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("RadChar-Tiny.h5");

    match load_file(&path) {
        Err(LoadError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn container_without_labels_is_rejected() {
    let dir = TempDir::new().unwrap();
    let opts = SynthOptions {
        include_labels: false,
        ..small(4, 16)
    };
    let path = write(&dir, "no-labels.h5", &opts);

    match load_file(&path) {
        Err(LoadError::MissingArray { name, available }) => {
            assert_eq!(name, "labels");
            assert_eq!(available, vec!["iq".to_string()]);
        }
        other => panic!("expected MissingArray, got {other:?}"),
    }
}

#[test]
fn missing_array_error_lists_what_the_container_has() {
    let dir = TempDir::new().unwrap();
    let opts = SynthOptions {
        include_labels: false,
        ..small(4, 16)
    };
    let path = write(&dir, "no-labels.h5", &opts);

    let message = load_file(&path).unwrap_err().to_string();
    assert_eq!(message, "container has no 'labels' array (found ['iq'])");
}

#[test]
fn container_without_iq_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("labels-only.h5");
    write_labels_only_container(&path);

    match load_file(&path) {
        Err(LoadError::MissingArray { name, available }) => {
            assert_eq!(name, "iq");
            assert_eq!(available, vec!["labels".to_string()]);
        }
        other => panic!("expected MissingArray, got {other:?}"),
    }
}

#[test]
fn concurrent_loads_agree() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "shared.h5", &small(256, 128));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let path = path.clone();
            thread::spawn(move || load_file(&path).unwrap())
        })
        .collect();
    let loaded: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for ds in &loaded[1..] {
        assert_eq!(ds, &loaded[0]);
    }
    assert_eq!(loaded[0].labels.len(), 256);
}

#[test]
fn concurrent_writes_and_loads_do_not_interfere() {
    let dir = TempDir::new().unwrap();
    let existing = write(&dir, "existing.h5", &small(64, 64));
    let expected = load_file(&existing).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let existing = existing.clone();
            let fresh = dir.path().join(format!("fresh-{i}.h5"));
            thread::spawn(move || {
                write_container(&fresh, &small(32, 64)).unwrap();
                (load_file(&existing).unwrap(), load_file(&fresh).unwrap())
            })
        })
        .collect();

    for h in handles {
        let (old, new) = h.join().unwrap();
        assert_eq!(old, expected);
        assert_eq!(new.iq.shape(), [32, 64]);
    }
}

#[test]
fn one_dimensional_iq_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("flat.h5");
    write_flat_container(&path);

    match load_file(&path) {
        Err(LoadError::UnexpectedRank { name, found, .. }) => {
            assert_eq!(name, "iq");
            assert_eq!(found, 1);
        }
        other => panic!("expected UnexpectedRank, got {other:?}"),
    }
}

#[test]
fn not_an_hdf5_file_is_an_hdf5_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.h5");
    std::fs::write(&path, b"definitely not hdf5").unwrap();

    with_hdf5(|| hdf5::silence_errors(true));
    assert!(matches!(load_file(&path), Err(LoadError::Hdf5(_))));
}

#[test]
fn selecting_past_the_last_row_fails() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "tiny.h5", &small(50, 512));
    let ds = load_file(&path).unwrap();

    let trace = WaveformTrace::select(&ds.iq, 49, 3.2e6).unwrap();
    assert_eq!(trace.len(), 512);
    assert!((trace.duration() - 1.6e-4).abs() < 1e-15);

    assert_eq!(
        WaveformTrace::select(&ds.iq, 50, 3.2e6).unwrap_err(),
        SelectError::OutOfBounds { index: 50, rows: 50 }
    );
}

fn write_flat_container(path: &Path) {
    with_hdf5(|| {
        let file = hdf5::File::create(path).unwrap();
        file.new_dataset::<f32>()
            .shape(4)
            .create("iq")
            .unwrap()
            .write_raw(&[0.0f32, 1.0, 2.0, 3.0][..])
            .unwrap();
        file.new_dataset::<i32>()
            .shape(4)
            .create("labels")
            .unwrap()
            .write_raw(&[0i32, 1, 2, 3][..])
            .unwrap();
    });
}

fn write_labels_only_container(path: &Path) {
    with_hdf5(|| {
        let file = hdf5::File::create(path).unwrap();
        file.new_dataset::<i32>()
            .shape(4)
            .create("labels")
            .unwrap()
            .write_raw(&[0i32, 1, 2, 3][..])
            .unwrap();
    });
}
