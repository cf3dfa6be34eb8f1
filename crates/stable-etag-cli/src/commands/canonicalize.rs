//! Canonicalize command implementation.

use stable_etag_canonical::stable_stringify;

use crate::input::read_json;

pub fn run(input: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let value = read_json(input)?;

    let text =
        stable_stringify(&value).map_err(|e| format!("Canonicalization failed: {}", e))?;

    println!("{}", text);
    Ok(())
}
