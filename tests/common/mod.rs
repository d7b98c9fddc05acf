// Shared test helpers for confluence2markdown.

use std::fs;
use std::path::Path;

/// A storage-format input and its expected Markdown.
pub struct Fixture {
    pub storage: String,
    pub expected_md: String,
}

/// Load a test fixture's input and expected Markdown.
///
/// Fixture directories contain `index.xml` (storage format) and `index.md`.
pub fn load_fixture(name: &str) -> Fixture {
    let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("test-fixtures").join(name);
    let storage = fs::read_to_string(base.join("index.xml"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/index.xml", name));
    let expected_md = fs::read_to_string(base.join("index.md"))
        .unwrap_or_else(|_| panic!("Missing fixture: {}/index.md", name));

    Fixture { storage, expected_md }
}
