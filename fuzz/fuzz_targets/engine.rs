#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use ndv_estimator::{Mode, NdvEstimator, WyHash64};

fuzz_target!(|data: &[u8]| {
    // Small capacity so arbitrary inputs can reach the transition.
    let mut estimator = NdvEstimator::<WyHash64, 14, 256>::new();
    let mut oracle = HashSet::new();
    let mut switched = false;

    for chunk in data.chunks_exact(8) {
        let a = i32::from_le_bytes(chunk[..4].try_into().unwrap());
        let b = i32::from_le_bytes(chunk[4..].try_into().unwrap());
        estimator.insert_tuple((a, b));
        oracle.insert((a, b));

        match estimator.mode() {
            Mode::Exact => {
                assert!(!switched, "mode reverted without reset");
                assert_eq!(estimator.estimate(), oracle.len() as f64);
            }
            Mode::Approximate => {
                switched = true;
                assert!(estimator.estimate() >= 1.0);
            }
        }
        assert!(estimator.size_of() > 0);
    }

    estimator.reset();
    assert_eq!(estimator.mode(), Mode::Exact);
    assert_eq!(estimator.estimate(), 0.0);
});
