//! File system watcher for watch mode

use crate::document::{is_document_file, DEFAULT_DOCUMENT_PATTERNS};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

pub const DEBOUNCE_MS: u64 = 300;

/// Watches a file or directory for document changes
pub struct DocumentWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<notify::Event>>,
    patterns: Vec<String>,
    /// Set when a single file is watched; it is reported whatever its suffix
    target: Option<PathBuf>,
}

fn is_create_or_modify(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

impl DocumentWatcher {
    /// Start watching the given path (file or directory) for default document types
    pub fn watch(path: &Path) -> notify::Result<Self> {
        Self::watch_with_patterns(path, &DEFAULT_DOCUMENT_PATTERNS)
    }

    /// Start watching with custom document suffixes
    pub fn watch_with_patterns(path: &Path, patterns: &[&str]) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_millis(DEBOUNCE_MS)),
        )?;

        if path.is_dir() {
            watcher.watch(path, RecursiveMode::Recursive)?;
        } else if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
        } else {
            watcher.watch(Path::new("."), RecursiveMode::NonRecursive)?;
        }
        tracing::debug!(path = %path.display(), "watching for document changes");

        let target = path.is_file().then(|| path.to_path_buf());

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            target,
        })
    }

    /// Check if the path is a document with one of the default suffixes
    pub fn is_document_file(p: &Path) -> bool {
        is_document_file(p, &DEFAULT_DOCUMENT_PATTERNS)
    }

    /// Whether two paths name the same file, comparing canonical forms when both exist
    pub fn same_file(a: &Path, b: &Path) -> bool {
        match (a.canonicalize(), b.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }

    fn matches(&self, p: &Path) -> bool {
        if let Some(target) = &self.target {
            return Self::same_file(p, target);
        }
        let patterns: Vec<&str> = self.patterns.iter().map(String::as_str).collect();
        is_document_file(p, &patterns)
    }

    /// Collect document paths from an event
    fn paths_from_event(&self, event: &notify::Event) -> Vec<PathBuf> {
        if !is_create_or_modify(&event.kind) {
            return vec![];
        }
        event
            .paths
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }

    /// Wait for the next batch of changes (debounced). Blocks until at least one
    /// event arrives, then drains for DEBOUNCE_MS. Returns sorted, deduplicated paths.
    pub fn next_changes(&self) -> Vec<PathBuf> {
        self.next_changes_timeout(Duration::from_secs(3600))
    }

    /// Like `next_changes`, giving up after `timeout` with no event
    pub fn next_changes_timeout(&self, timeout: Duration) -> Vec<PathBuf> {
        let mut all = HashSet::new();

        match self.receiver.recv_timeout(timeout) {
            Ok(Ok(event)) => all.extend(self.paths_from_event(&event)),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "watch error");
                return vec![];
            }
            Err(_) => return vec![],
        }

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS));
        while let Ok(ev) = self.receiver.try_recv() {
            if let Ok(event) = ev {
                all.extend(self.paths_from_event(&event));
            }
        }

        let mut paths: Vec<PathBuf> = all.into_iter().collect();
        paths.sort();
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind};

    fn event(kind: EventKind, paths: &[&str]) -> notify::Event {
        notify::Event {
            kind,
            paths: paths.iter().map(PathBuf::from).collect(),
            attrs: Default::default(),
        }
    }

    #[test]
    fn test_is_document_file_defaults() {
        assert!(DocumentWatcher::is_document_file(Path::new("kitchens.seo.json")));
        assert!(DocumentWatcher::is_document_file(Path::new("site/index.html")));
        assert!(DocumentWatcher::is_document_file(Path::new("site/old.htm")));
        assert!(DocumentWatcher::is_document_file(Path::new("blog/post.md")));
        assert!(!DocumentWatcher::is_document_file(Path::new("package.json")));
        assert!(!DocumentWatcher::is_document_file(Path::new("style.css")));
        assert!(!DocumentWatcher::is_document_file(Path::new(
            "node_modules/pkg/README.md"
        )));
    }

    #[test]
    fn test_is_create_or_modify() {
        assert!(is_create_or_modify(&EventKind::Create(CreateKind::File)));
        assert!(is_create_or_modify(&EventKind::Modify(ModifyKind::Data(
            DataChange::Content
        ))));
        assert!(!is_create_or_modify(&EventKind::Remove(RemoveKind::File)));
    }

    #[test]
    fn test_paths_from_event_filters_documents() {
        let dir = tempfile::TempDir::new().unwrap();
        let watcher = DocumentWatcher::watch(dir.path()).unwrap();

        let create = event(
            EventKind::Create(CreateKind::File),
            &["content/kitchens.seo.json", "content/logo.png", "about.html"],
        );
        let paths = watcher.paths_from_event(&create);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("content/kitchens.seo.json"),
                PathBuf::from("about.html")
            ]
        );

        let remove = event(EventKind::Remove(RemoveKind::File), &["about.html"]);
        assert!(watcher.paths_from_event(&remove).is_empty());
    }

    #[test]
    fn test_custom_patterns() {
        let dir = tempfile::TempDir::new().unwrap();
        let watcher = DocumentWatcher::watch_with_patterns(dir.path(), &[".page.json"]).unwrap();
        let create = event(
            EventKind::Create(CreateKind::File),
            &["a.page.json", "b.seo.json"],
        );
        assert_eq!(
            watcher.paths_from_event(&create),
            vec![PathBuf::from("a.page.json")]
        );
    }

    #[test]
    fn test_watch_single_file_parent() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("kitchens.seo.json");
        std::fs::write(&file, "{}").unwrap();
        assert!(DocumentWatcher::watch(&file).is_ok());
    }

    #[test]
    fn test_single_file_matches_regardless_of_suffix() {
        let dir = tempfile::TempDir::new().unwrap();
        let page = dir.path().join("page.txt");
        let other = dir.path().join("other.md");
        std::fs::write(&page, "hello").unwrap();
        std::fs::write(&other, "hello").unwrap();
        let watcher = DocumentWatcher::watch(&page).unwrap();

        let modify = notify::Event {
            kind: EventKind::Modify(ModifyKind::Data(DataChange::Content)),
            paths: vec![page.clone(), other],
            attrs: Default::default(),
        };
        assert_eq!(watcher.paths_from_event(&modify), vec![page]);
    }

    #[test]
    fn test_same_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let page = dir.path().join("page.md");
        std::fs::write(&page, "").unwrap();
        assert!(DocumentWatcher::same_file(&page, &dir.path().join(".").join("page.md")));
        assert!(!DocumentWatcher::same_file(&page, &dir.path().join("gone.md")));
    }

    #[test]
    fn test_timeout_without_events_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let watcher = DocumentWatcher::watch(dir.path()).unwrap();
        assert!(watcher
            .next_changes_timeout(Duration::from_millis(50))
            .is_empty());
    }
}
