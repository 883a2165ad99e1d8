use std::sync::{Mutex, PoisonError};

/// Serialises every HDF5 session this crate opens.
///
/// The `labels` read calls libhdf5 directly, outside the `hdf5` crate's own
/// lock, so it must never overlap another HDF5 call. Loading and writing in
/// this crate go through [`with_hdf5`]; code that uses the `hdf5` crate
/// directly on a thread that may run alongside [`load_file`] should do the
/// same.
///
/// [`load_file`]: crate::data::loader::load_file
static HDF5_SESSION: Mutex<()> = Mutex::new(());

/// Run `f` while holding the process-wide HDF5 session lock.
///
/// The lock is not reentrant: `f` must not call [`with_hdf5`],
/// [`load_file`](crate::data::loader::load_file) or
/// [`write_container`](crate::data::synth::write_container).
pub fn with_hdf5<R>(f: impl FnOnce() -> R) -> R {
    // A panic while holding the lock leaves no shared Rust state behind.
    let _guard = HDF5_SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    f()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn sessions_never_overlap() {
        let inside = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let inside = Arc::clone(&inside);
                thread::spawn(move || {
                    for _ in 0..100 {
                        with_hdf5(|| {
                            assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                            thread::yield_now();
                            inside.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }

    #[test]
    fn poisoned_lock_still_admits_sessions() {
        let _ = thread::spawn(|| with_hdf5(|| panic!("boom"))).join();
        assert_eq!(with_hdf5(|| 7), 7);
    }
}
