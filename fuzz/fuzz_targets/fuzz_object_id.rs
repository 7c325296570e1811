//! Fuzz target: identifier parsing.
//!
//! Any string either fails to parse or parses into an id whose display form
//! is the lowercase of the input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use recipebox_core::RecipeId;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(id) = s.parse::<RecipeId>() {
        assert_eq!(id.to_string(), s.to_ascii_lowercase());
        let json = serde_json::to_string(&id).expect("RecipeId serialization must not fail");
        let back: RecipeId = serde_json::from_str(&json).expect("RecipeId deserialization must not fail");
        assert_eq!(back, id);
    }
});
