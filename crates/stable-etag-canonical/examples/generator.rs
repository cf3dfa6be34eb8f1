use serde_json::json;
use stable_etag_canonical::{compute_identifier_from_value, stable_stringify};

fn main() {
    let payload = json!({
        "schema_version": "1.0.0",
        "type": "article",
        "id": "https://example.com/articles/hello",
        "title": "Hello World",
        "tags": ["demo"],
        "publisher": { "url": "https://example.com", "name": "Example" },
        "content": {
            "body": "Welcome.",
            "sections": [{ "heading": "Intro", "content": "Welcome." }]
        }
    });

    match stable_stringify(&payload).and_then(|text| {
        compute_identifier_from_value(&payload).map(|etag| (text, etag))
    }) {
        Ok((text, etag)) => {
            println!("{}", text);
            println!("{}", etag);
        }
        Err(err) => {
            eprintln!("canonicalization failed: {}", err);
            std::process::exit(1);
        }
    }
}
