//! Fuzz target: the create/update validation gate.
//!
//! Arbitrary bytes that parse as JSON are run through both shapes. Neither
//! may panic, and anything the full shape accepts the partial shape accepts
//! with every field present.

#![no_main]

use libfuzzer_sys::fuzz_target;
use recipebox_core::{validate_create, validate_patch};

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let full = validate_create(&value);
    let partial = validate_patch(&value);

    if let Ok(input) = full {
        let patch = partial.expect("a valid create payload must be a valid patch");
        assert_eq!(patch.name.as_deref(), Some(input.name.as_str()));
        assert_eq!(patch.description.as_deref(), Some(input.description.as_str()));
        assert_eq!(patch.ingredients.as_ref(), Some(&input.ingredients));
    }
});
