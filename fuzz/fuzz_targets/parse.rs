#![no_main]

use libfuzzer_sys::fuzz_target;
use stencil::Environment;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Compilation must never panic; rendering with empty data must not either
        if let Ok(template) = Environment::new().compile("fuzz", s) {
            let _ = template.execute_json(&serde_json::Value::Null);
        }
    }
});
