//! Directory listing for batch conversion.

use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Entry names directly inside a directory, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    /// Every entry, whatever its type. Slot numbers are read from these.
    pub entries: Vec<String>,
    /// Entries that are regular files or links to one. Inputs come from these.
    pub files: Vec<String>,
}

/// List the entries directly inside `dir`. Symlinks are not followed into,
/// but a link to a regular file still counts as a file.
pub fn list_dir(dir: &Path) -> io::Result<DirListing> {
    let mut listing = DirListing::default();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type();
        if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
            listing.files.push(name.clone());
        }
        listing.entries.push(name);
    }
    listing.entries.sort();
    listing.files.sort();
    Ok(listing)
}

/// Whether a file name has a `.scl` suffix, ignoring case.
pub fn is_scl_filename(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".scl")
}

/// `.scl` inputs among `names`, in lexicographic order.
pub fn scl_inputs(names: &[String]) -> Vec<String> {
    let mut inputs: Vec<String> = names
        .iter()
        .filter(|n| is_scl_filename(n))
        .cloned()
        .collect();
    inputs.sort();
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scl_inputs_sorted_and_filtered() {
        let names = vec![
            "b.scl".to_string(),
            "A.SCL".to_string(),
            "001.SCA".to_string(),
            "readme.txt".to_string(),
            "a.scl".to_string(),
        ];
        assert_eq!(scl_inputs(&names), vec!["A.SCL", "a.scl", "b.scl"]);
    }

    #[test]
    fn test_list_dir_separates_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.scl"), "x").unwrap();
        fs::write(dir.path().join("a.scl"), "x").unwrap();
        fs::create_dir(dir.path().join("nested.scl")).unwrap();
        fs::write(dir.path().join("nested.scl").join("c.scl"), "x").unwrap();
        fs::create_dir(dir.path().join("001.SCA")).unwrap();

        let listing = list_dir(dir.path()).unwrap();
        assert_eq!(listing.files, vec!["a.scl", "b.scl"]);
        assert_eq!(listing.entries, vec!["001.SCA", "a.scl", "b.scl", "nested.scl"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_list_dir_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep.bin"), "x").unwrap();
        std::os::unix::fs::symlink("keep.bin", dir.path().join("002.SCA")).unwrap();
        std::os::unix::fs::symlink("missing.bin", dir.path().join("003.SCA")).unwrap();

        let listing = list_dir(dir.path()).unwrap();
        assert_eq!(listing.entries, vec!["002.SCA", "003.SCA", "keep.bin"]);
        assert_eq!(listing.files, vec!["002.SCA", "keep.bin"]);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_dir(&dir.path().join("missing")).is_err());
    }
}
