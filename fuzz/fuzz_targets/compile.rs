#![no_main]

use libfuzzer_sys::fuzz_target;
use sqlbridge_core::ir::SelectQuery;
use sqlbridge_core::{compile_query, to_sql};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(query) = serde_json::from_str::<SelectQuery>(text) {
            // Compilation either succeeds or returns an error; it must never
            // panic, and anything it produces must render.
            if let Ok(stmt) = compile_query(&query) {
                let _ = to_sql(&stmt);
            }
        }
    }
});
