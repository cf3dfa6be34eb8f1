//! Verify command implementation.

use serde_json::json;
use stable_etag_canonical::{compute_identifier_from_value, WeakETag};

use crate::input::read_json;
use crate::output::format_json;

pub fn run(
    etag: String,
    input: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let claimed = WeakETag::parse(etag).map_err(|e| format!("Invalid etag: {}", e))?;
    let value = read_json(input)?;

    let computed = compute_identifier_from_value(&value)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;
    let matches = computed == claimed;
    tracing::info!(claimed = %claimed, computed = %computed, matches, "verified etag");

    if json_output {
        println!(
            "{}",
            format_json(&json!({
                "etag": claimed.as_str(),
                "computed": computed.as_str(),
                "matches": matches,
            }))
        );
    } else if matches {
        println!("match");
    } else {
        println!("mismatch: computed {}", computed);
    }

    if !matches {
        std::process::exit(1);
    }

    Ok(())
}
