//! Etag command implementation.

use serde_json::json;
use stable_etag_canonical::{canonical_bytes, Sha256Digest, WeakETag};

use crate::input::read_json;
use crate::output::format_json;

pub fn run(input: Option<String>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_json(input)?;

    let bytes =
        canonical_bytes(&value).map_err(|e| format!("Canonicalization failed: {}", e))?;
    let etag = WeakETag::from_digest(&Sha256Digest::of(&bytes));
    tracing::info!(etag = %etag, "computed etag");

    if json_output {
        println!(
            "{}",
            format_json(&json!({
                "etag": etag.as_str(),
                "canonical_len": bytes.len(),
            }))
        );
    } else {
        println!("{}", etag);
    }
    Ok(())
}
