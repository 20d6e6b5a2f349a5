use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::ReportError;

/// Whether `path` names a zstd-compressed export
pub fn is_zstd(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zst"))
}

/// Load a PDBXML export as text, decompressing `.zst` files on the fly
pub fn load_pdbxml_file(path: &Path) -> Result<String, ReportError> {
    if !path.is_file() {
        return Err(ReportError::MissingInput(path.to_path_buf()));
    }

    read_text(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_text(path: &Path) -> io::Result<String> {
    let mut content = String::new();
    if is_zstd(path) {
        let mut decoder = zstd::Decoder::new(File::open(path)?)?;
        decoder.read_to_string(&mut content)?;
    } else {
        File::open(path)?.read_to_string(&mut content)?;
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const XML: &str = "<root><form name=\"A\"/></root>";

    #[test]
    fn reads_plain_and_compressed() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("survey.pdbxml");
        fs::write(&plain, XML).unwrap();
        assert_eq!(load_pdbxml_file(&plain).unwrap(), XML);

        let packed = dir.path().join("survey.pdbxml.ZST");
        fs::write(&packed, zstd::encode_all(XML.as_bytes(), 0).unwrap()).unwrap();
        assert!(is_zstd(&packed));
        assert_eq!(load_pdbxml_file(&packed).unwrap(), XML);
    }

    #[test]
    fn missing_file_is_reported_as_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_pdbxml_file(&dir.path().join("nope.xml")).unwrap_err();
        assert!(matches!(err, ReportError::MissingInput(_)));

        // directories are not inputs either
        let err = load_pdbxml_file(dir.path()).unwrap_err();
        assert!(matches!(err, ReportError::MissingInput(_)));
    }

    #[test]
    fn corrupt_archive_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.zst");
        fs::write(&path, b"not zstd at all").unwrap();

        let err = load_pdbxml_file(&path).unwrap_err();
        assert!(matches!(err, ReportError::Read { .. }));
    }
}
