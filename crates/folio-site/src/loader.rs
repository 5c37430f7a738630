//! Article discovery and loading from a source directory.
//!
//! Loading runs in two phases. The walk finds every `.md` file and derives
//! its URL and name without reading content. The files are then read and
//! parsed in parallel. A file that fails to load is reported in
//! [`Loaded::errors`] and does not stop the others.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::LoadError;
use crate::markdown::parse_article;
use crate::site::Article;

/// Articles loaded from disk plus the per-file failures.
#[derive(Debug, Default)]
pub struct Loaded {
    /// Articles sorted by URL.
    pub articles: Vec<Article>,
    pub errors: Vec<LoadError>,
}

/// Location of an article source before it is read.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SourceRef {
    path: PathBuf,
    url: String,
    name: String,
}

/// Load every markdown article under `source_dir`.
///
/// URLs mirror the directory layout: `articles/hello.md` becomes
/// `/articles/hello` and `articles/index.md` becomes `/articles`. Hidden
/// files and directories are skipped.
///
/// # Errors
///
/// Returns [`LoadError::SourceNotFound`] if `source_dir` is not a directory.
/// Failures for individual files are collected in [`Loaded::errors`].
pub fn load_articles(source_dir: &Path) -> Result<Loaded, LoadError> {
    if !source_dir.is_dir() {
        return Err(LoadError::SourceNotFound(source_dir.to_path_buf()));
    }

    let mut refs = Vec::new();
    let mut errors = Vec::new();
    scan_directory(source_dir, "", &mut refs, &mut errors);
    refs.sort_by(|a, b| a.url.cmp(&b.url));

    tracing::debug!(dir = %source_dir.display(), files = refs.len(), "Scanned sources");

    let results: Vec<Result<Article, LoadError>> = refs.par_iter().map(load_one).collect();

    let mut articles = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(article) => articles.push(article),
            Err(e) => errors.push(e),
        }
    }

    Ok(Loaded { articles, errors })
}

fn load_one(source: &SourceRef) -> Result<Article, LoadError> {
    let markdown = fs::read_to_string(&source.path).map_err(|e| LoadError::Io {
        path: source.path.clone(),
        source: e,
    })?;
    parse_article(&markdown, source.url.clone(), source.name.clone()).map_err(|e| {
        LoadError::FrontMatter {
            path: source.path.clone(),
            source: e,
        }
    })
}

fn scan_directory(
    dir: &Path,
    url_prefix: &str,
    refs: &mut Vec<SourceRef>,
    errors: &mut Vec<LoadError>,
) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(LoadError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            let child_prefix = format!("{url_prefix}/{file_name}");
            scan_directory(&path, &child_prefix, refs, errors);
        } else if let Some(stem) = file_name.strip_suffix(".md") {
            let (url, name) = source_location(url_prefix, stem);
            refs.push(SourceRef { path, url, name });
        }
    }
}

/// URL and name for the file `stem` in the directory at `url_prefix`.
///
/// `index` collapses to its directory and takes the directory's name; the
/// root index is `/` named `index`.
fn source_location(url_prefix: &str, stem: &str) -> (String, String) {
    if stem == "index" {
        let url = if url_prefix.is_empty() {
            "/".to_owned()
        } else {
            url_prefix.to_owned()
        };
        let name = url_prefix
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("index");
        (url, name.to_owned())
    } else {
        (format!("{url_prefix}/{stem}"), stem.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn urls(loaded: &Loaded) -> Vec<&str> {
        loaded
            .articles
            .iter()
            .map(|a| a.document.url.as_str())
            .collect()
    }

    #[test]
    fn test_source_location() {
        assert_eq!(
            source_location("", "index"),
            ("/".to_owned(), "index".to_owned())
        );
        assert_eq!(
            source_location("", "about"),
            ("/about".to_owned(), "about".to_owned())
        );
        assert_eq!(
            source_location("/articles", "index"),
            ("/articles".to_owned(), "articles".to_owned())
        );
        assert_eq!(
            source_location("/articles/2025", "hello"),
            ("/articles/2025/hello".to_owned(), "hello".to_owned())
        );
    }

    #[test]
    fn test_loads_nested_articles() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "index.md", "# Home\n");
        write(temp.path(), "articles/index.md", "# Articles\n");
        write(
            temp.path(),
            "articles/hello.md",
            "---\ntitle: Hello\n---\nBody\n",
        );
        write(temp.path(), "articles/notes.txt", "ignored");

        let loaded = load_articles(temp.path()).unwrap();

        assert!(loaded.errors.is_empty());
        assert_eq!(urls(&loaded), vec!["/", "/articles", "/articles/hello"]);
        let hello = &loaded.articles[2].document;
        assert_eq!(hello.name, "hello");
        assert_eq!(hello.exports.title(), Some("Hello"));
        assert_eq!(loaded.articles[1].document.name, "articles");
    }

    #[test]
    fn test_skips_hidden_entries() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), ".drafts/secret.md", "# Secret\n");
        write(temp.path(), ".hidden.md", "# Hidden\n");
        write(temp.path(), "visible.md", "# Visible\n");

        let loaded = load_articles(temp.path()).unwrap();

        assert_eq!(urls(&loaded), vec!["/visible"]);
    }

    #[test]
    fn test_bad_front_matter_is_isolated() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "good.md", "# Good\n");
        write(temp.path(), "bad.md", "---\ntitle: [unclosed\n---\n# Bad\n");

        let loaded = load_articles(temp.path()).unwrap();

        assert_eq!(urls(&loaded), vec!["/good"]);
        assert_eq!(loaded.errors.len(), 1);
        assert!(matches!(
            &loaded.errors[0],
            LoadError::FrontMatter { path, .. } if path.ends_with("bad.md")
        ));
    }

    #[test]
    fn test_missing_source_dir() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("missing");

        let err = load_articles(&missing).unwrap_err();

        assert!(matches!(err, LoadError::SourceNotFound(p) if p == missing));
    }

    #[test]
    fn test_empty_dir() {
        let temp = tempfile::tempdir().unwrap();
        let loaded = load_articles(temp.path()).unwrap();
        assert!(loaded.articles.is_empty());
        assert!(loaded.errors.is_empty());
    }
}
