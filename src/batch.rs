// Batch conversion of exported pages.
//
// Pages come from a saved content-search response (`body.storage` expanded);
// each is converted and handed to a sink under a name derived from its space
// and title. A page that fails to write is recorded and the run goes on.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConvertError;

const UNKNOWN_SPACE: &str = "UNKNOWN_SPACE";

/// One exported page. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Page {
    pub id: String,
    pub title: String,
    pub space: Option<Space>,
    pub body: PageBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Space {
    pub key: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageBody {
    pub storage: Storage,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Storage {
    pub value: String,
}

impl Page {
    /// Space key, `UNKNOWN_SPACE` when the export has none.
    pub fn space_key(&self) -> &str {
        match &self.space {
            Some(space) if !space.key.is_empty() => &space.key,
            _ => UNKNOWN_SPACE,
        }
    }

    /// Raw storage-format markup of the page.
    pub fn storage(&self) -> &str {
        &self.body.storage.value
    }
}

/// Accepted export shapes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Export {
    Search { results: Vec<Page> },
    Pages(Vec<Page>),
    Page(Box<Page>),
}

/// Read pages from a search response, a bare array of pages, or a single page.
pub fn read_pages(reader: impl Read) -> Result<Vec<Page>, ConvertError> {
    let export: Export = serde_json::from_reader(reader)?;
    Ok(match export {
        Export::Search { results } => results,
        Export::Pages(pages) => pages,
        Export::Page(page) => vec![*page],
    })
}

/// `<space>_<title>.md`, both parts lower-cased with anything outside
/// `[a-z0-9]` replaced by `_`.
pub fn output_file_name(page: &Page) -> String {
    format!("{}_{}.md", sanitize(page.space_key()), sanitize(&page.title))
}

fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination for converted pages.
pub trait PageSink {
    fn write_page(&mut self, name: &str, markdown: &str) -> Result<(), ConvertError>;
}

/// Writes each page as a UTF-8 file in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create `dir` (and parents) if needed.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self, ConvertError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|err| ConvertError::io(&dir, err))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PageSink for DirectorySink {
    fn write_page(&mut self, name: &str, markdown: &str) -> Result<(), ConvertError> {
        let path = self.dir.join(name);
        fs::write(&path, markdown).map_err(|err| ConvertError::io(path, err))
    }
}

// ---------------------------------------------------------------------------
// Runs
// ---------------------------------------------------------------------------

/// A page that could not be written.
#[derive(Debug)]
pub struct PageFailure {
    pub id: String,
    pub title: String,
    pub space_key: String,
    pub error: ConvertError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// File names written, in input order.
    pub written: Vec<String>,
    pub failed: Vec<PageFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert and write every page. Failures are collected, never fatal.
pub fn convert_pages<S: PageSink + ?Sized>(pages: &[Page], sink: &mut S) -> BatchReport {
    let mut report = BatchReport::default();

    for page in pages {
        #[cfg(feature = "tracing")]
        tracing::info!(title = %page.title, id = %page.id, space = page.space_key(), "processing page");

        let markdown = crate::convert(page.storage());
        let name = output_file_name(page);

        match sink.write_page(&name, &markdown) {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::info!(file = %name, "converted page");
                report.written.push(name);
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::error!(title = %page.title, id = %page.id, space = page.space_key(), %error, "failed to write page");
                report.failed.push(PageFailure {
                    id: page.id.clone(),
                    title: page.title.clone(),
                    space_key: page.space_key().to_string(),
                    error,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemorySink {
        files: HashMap<String, String>,
        reject: Option<String>,
    }

    impl PageSink for MemorySink {
        fn write_page(&mut self, name: &str, markdown: &str) -> Result<(), ConvertError> {
            if self.reject.as_deref() == Some(name) {
                return Err(ConvertError::io(
                    name,
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.files.insert(name.to_string(), markdown.to_string());
            Ok(())
        }
    }

    fn page(id: &str, title: &str, space: Option<&str>, storage: &str) -> Page {
        Page {
            id: id.to_string(),
            title: title.to_string(),
            space: space.map(|key| Space { key: key.to_string() }),
            body: PageBody {
                storage: Storage {
                    value: storage.to_string(),
                },
            },
        }
    }

    #[test]
    fn file_names_are_sanitized() {
        let p = page("1", "Release Notes: v2.0!", Some("ENG"), "");
        assert_eq!(output_file_name(&p), "eng_release_notes__v2_0_.md");
        let p = page("2", "Übersicht", None, "");
        assert_eq!(output_file_name(&p), "unknown_space__bersicht.md");
    }

    #[test]
    fn reads_search_response() {
        let json = r#"{
            "results": [
                {"id": "42", "type": "page", "title": "Home",
                 "space": {"key": "DOC", "name": "Docs"},
                 "body": {"storage": {"value": "<p>Hi</p>", "representation": "storage"}}}
            ],
            "size": 1
        }"#;
        let pages = read_pages(json.as_bytes()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id, "42");
        assert_eq!(pages[0].space_key(), "DOC");
        assert_eq!(pages[0].storage(), "<p>Hi</p>");
    }

    #[test]
    fn reads_bare_arrays_and_single_pages() {
        let pages = read_pages(r#"[{"title": "A"}, {"title": "B"}]"#.as_bytes()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].space_key(), UNKNOWN_SPACE);
        assert_eq!(pages[1].storage(), "");

        let pages = read_pages(r#"{"title": "Solo", "body": {}}"#.as_bytes()).unwrap();
        assert_eq!(pages[0].title, "Solo");
    }

    #[test]
    fn rejects_invalid_json() {
        let err = read_pages("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, ConvertError::Json(_)));
    }

    #[test]
    fn failures_do_not_stop_the_run() {
        let pages = vec![
            page("1", "One", Some("S"), "<h1>One</h1>"),
            page("2", "Two", Some("S"), "<p>Two</p>"),
            page("3", "Three", Some("S"), "<p>Three</p>"),
        ];
        let mut sink = MemorySink {
            reject: Some("s_two.md".to_string()),
            ..MemorySink::default()
        };

        let report = convert_pages(&pages, &mut sink);

        assert!(!report.is_success());
        assert_eq!(report.written, vec!["s_one.md", "s_three.md"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, "2");
        assert_eq!(report.failed[0].title, "Two");
        assert_eq!(sink.files["s_one.md"], "# One\n\n");
        assert_eq!(sink.files["s_three.md"], "Three\n\n");
    }
}
