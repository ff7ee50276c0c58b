//! Layering guardrails to keep the syntax crate free of runtime and CLI dependencies.
//!
//! `stencil_syntax` only knows about tokens, the parser core and diagnostics. Values (`serde_json`)
//! and the command line (`clap`) belong to the `stencil` crate. This test scans the syntax crate's
//! `Cargo.toml` and fails if either appears in `[dependencies]`.

const FORBIDDEN: &[&str] = &["serde_json", "clap", "tracing-subscriber"];

#[test]
fn syntax_crate_has_no_runtime_dependencies() {
    let manifest = include_str!("../crates/stencil_syntax/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            if line == "[dependencies]" {
                in_dependencies = true;
                continue;
            }
            // Any new section after `[dependencies]` ends the scan window.
            if in_dependencies {
                break;
            }
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Strip inline comments for robustness.
        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        for dep in FORBIDDEN {
            let name = line_no_comment.split(['=', ' ', '.']).next().unwrap_or("");
            if name == *dep {
                panic!("`{dep}` must not appear in stencil_syntax [dependencies]");
            }
        }
    }
}
