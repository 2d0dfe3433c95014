use regex::Regex;
use std::sync::OnceLock;

use crate::sanitize::sanitize;

/// File names the fallback parser is allowed to recover, in scan order. This
/// is a closed set: the fallback is a bounded heuristic for responses that
/// ignored the labelling format, not a general-purpose parser.
pub const FALLBACK_FILES: [&str; 5] = [
    "manifest.json",
    "popup.html",
    "background.js",
    "content.js",
    "style.css",
];

/// An insertion-ordered filename -> content mapping. Order determines the
/// archive listing; keys are unique; content is never empty.
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    entries: Vec<(String, String)>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with last-write-wins semantics: a repeated filename replaces the
    /// earlier entry and moves to the end of the listing. Models that emit a
    /// file twice usually intend the later, corrected version.
    pub fn insert(&mut self, name: String, content: String) {
        self.entries.retain(|(n, _)| n != &name);
        self.entries.push((name, content));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }
}

fn header_re() -> &'static Regex {
    // `name.ext:` followed by a newline, ext drawn from the allow-list. Not
    // line-anchored: models sometimes run a header on after prose.
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\w+\.(?:json|html|js|css|png|jpg|jpeg|svg)):[ \t]*\r?\n")
            .expect("static header regex")
    })
}

fn boundary_re() -> &'static Regex {
    // Any `word.word` at the start of a later line ends the current capture.
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\w+\.\w").expect("static boundary regex"))
}

fn fallback_labels() -> &'static [(&'static str, Regex)] {
    static LABELS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    LABELS.get_or_init(|| {
        FALLBACK_FILES
            .iter()
            .map(|name| {
                let re = Regex::new(&format!(r"(?i){}[:\s]*", regex::escape(name)))
                    .expect("static label regex");
                (*name, re)
            })
            .collect()
    })
}

/// Primary parser: scan the full model text for `filename.ext:` headers and
/// treat everything up to the next header (or end of text) as that file's raw
/// content. Blocks whose content sanitizes to empty are dropped. An empty
/// result is not an error; it is the caller's cue to try the fallback parser.
pub fn parse_primary(text: &str) -> FileSet {
    let re = header_re();
    let headers: Vec<(String, usize, usize)> = re
        .captures_iter(text)
        .map(|cap| {
            let whole = cap.get(0).expect("match group 0");
            let name = cap.get(1).expect("filename group");
            (name.as_str().to_string(), whole.start(), whole.end())
        })
        .collect();

    let mut files = FileSet::new();
    for (i, (name, _, body_start)) in headers.iter().enumerate() {
        let body_end = headers
            .get(i + 1)
            .map(|(_, next_start, _)| *next_start)
            .unwrap_or(text.len());
        let content = sanitize(&text[*body_start..body_end]);
        if !content.is_empty() {
            files.insert(name.clone(), content);
        }
    }
    files
}

/// Fallback parser for responses that ignored the labelling format. Scans the
/// same text against the five fixed extension file names, case-insensitively,
/// capturing from each label up to the next filename-like token or end of
/// text. Only names from `FALLBACK_FILES` can ever appear in the output.
pub fn parse_fallback(text: &str) -> FileSet {
    let boundary = boundary_re();

    let mut files = FileSet::new();
    for (name, label) in fallback_labels() {
        let Some(m) = label.find(text) else { continue };
        let rest = &text[m.end()..];
        let body = match boundary.find(rest) {
            Some(b) => &rest[..b.start()],
            None => rest,
        };
        let content = sanitize(body);
        if !content.is_empty() {
            files.insert(name.to_string(), content);
        }
    }
    files
}
