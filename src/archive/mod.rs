use std::io::{Cursor, Write};

use anyhow::Result;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::ForgeError;
use crate::parse::FileSet;

/// Bundle a parsed file set into an in-memory zip archive, one entry per
/// mapping key in insertion order, content written verbatim. An empty set
/// yields a valid empty archive. Backend failures are fatal for the request;
/// no partial archive is ever returned.
pub fn assemble(files: &FileSet) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, content) in files.iter() {
        writer
            .start_file(name, options)
            .map_err(|e| ForgeError::Assembly(format!("could not open entry {name}: {e}")))?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| ForgeError::Assembly(format!("could not write entry {name}: {e}")))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| ForgeError::Assembly(format!("could not finalize archive: {e}")))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_back(bytes: &[u8]) -> zip::ZipArchive<Cursor<&[u8]>> {
        zip::ZipArchive::new(Cursor::new(bytes)).expect("archive opens")
    }

    #[test]
    fn entry_count_matches_file_set() {
        let mut files = FileSet::new();
        files.insert("manifest.json".into(), "{\"manifest_version\":3}".into());
        files.insert("popup.html".into(), "<p>hi</p>".into());
        files.insert("background.js".into(), "chrome.runtime;".into());

        let bytes = assemble(&files).unwrap();
        assert_eq!(read_back(&bytes).len(), files.len());
    }

    #[test]
    fn content_round_trips_verbatim() {
        let mut files = FileSet::new();
        files.insert("content.js".into(), "document.title = \"x\";".into());

        let bytes = assemble(&files).unwrap();
        let mut archive = read_back(&bytes);
        let mut entry = archive.by_name("content.js").expect("entry present");
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        assert_eq!(text, "document.title = \"x\";");
    }

    #[test]
    fn listing_preserves_insertion_order() {
        let mut files = FileSet::new();
        files.insert("background.js".into(), "a".into());
        files.insert("manifest.json".into(), "b".into());

        let bytes = assemble(&files).unwrap();
        let mut archive = read_back(&bytes);
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["background.js", "manifest.json"]);
    }

    #[test]
    fn empty_set_yields_valid_empty_archive() {
        let bytes = assemble(&FileSet::new()).unwrap();
        assert_eq!(read_back(&bytes).len(), 0);
    }
}
