use std::collections::HashSet;

use tracing::debug;

fn has_glob_meta(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
}

/// Expand glob patterns in a list of inputs into concrete paths.
///
/// Plain inputs pass through untouched. A pattern that matches nothing is kept as is so the
/// missing input is reported later. Matches of one pattern come back sorted; duplicates
/// across patterns are dropped, keeping the first occurrence.
pub fn expand_input_globs(inputs: &[String]) -> Result<Vec<String>, String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut results: Vec<String> = Vec::with_capacity(inputs.len());

    for input in inputs {
        if !has_glob_meta(input) {
            if seen.insert(input.clone()) {
                results.push(input.clone());
            }
            continue;
        }

        let paths = glob::glob(input)
            .map_err(|e| format!("Invalid glob pattern '{}': {}", input, e))?;
        let mut matched = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| format!("Error reading {}: {}", input, e))?;
            matched.push(path.to_string_lossy().to_string());
        }
        debug!(pattern = %input, matches = matched.len(), "expanded glob pattern");

        if matched.is_empty() {
            matched.push(input.clone());
        }
        for path in matched {
            if seen.insert(path.clone()) {
                results.push(path);
            }
        }
    }

    Ok(results)
}
