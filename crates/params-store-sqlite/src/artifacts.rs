//! Artifact files referenced by output rows.
//!
//! An output row stores a path prefix in its `file` column; the artifacts are
//! every regular file matching `<prefix>.*`.

use std::{
  io,
  path::{Path, PathBuf},
};

use crate::{Error, Result};

/// Regular files matching `<prefix>.*`, in glob order. Directories and
/// anything that is not a regular file are left out.
pub fn matching_files(prefix: &str) -> Result<Vec<PathBuf>> {
  let mut files = Vec::new();
  for entry in glob::glob(&format!("{prefix}.*"))? {
    let path = entry?;
    if path.is_file() {
      files.push(path);
    }
  }
  Ok(files)
}

/// Delete every artifact of `prefix` with `remove`, stopping at the first
/// failure. Files after the failing one are not attempted.
pub fn remove_files<F>(prefix: &str, mut remove: F) -> Result<Vec<PathBuf>>
where
  F: FnMut(&Path) -> io::Result<()>,
{
  let files = matching_files(prefix)?;
  for path in &files {
    tracing::info!("removing file {}", path.display());
    remove(path).map_err(|source| Error::Io {
      path: path.clone(),
      source,
    })?;
  }
  Ok(files)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use super::*;

  #[test]
  fn matches_only_regular_files_with_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("run");
    fs::write(dir.path().join("run.dat"), b"1").unwrap();
    fs::write(dir.path().join("run.log"), b"2").unwrap();
    fs::write(dir.path().join("run"), b"bare prefix").unwrap();
    fs::write(dir.path().join("run2.dat"), b"other run").unwrap();
    fs::create_dir(dir.path().join("run.d")).unwrap();

    let files = matching_files(prefix.to_str().unwrap()).unwrap();
    assert_eq!(
      files,
      vec![dir.path().join("run.dat"), dir.path().join("run.log")]
    );
  }

  #[test]
  fn remove_files_deletes_matches() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("sim");
    fs::write(dir.path().join("sim.h5"), b"").unwrap();
    fs::write(dir.path().join("keep.h5"), b"").unwrap();

    let removed = remove_files(prefix.to_str().unwrap(), |p| fs::remove_file(p)).unwrap();
    assert_eq!(removed, vec![dir.path().join("sim.h5")]);
    assert!(!dir.path().join("sim.h5").exists());
    assert!(dir.path().join("keep.h5").exists());
  }

  #[test]
  fn no_matches_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("missing");
    assert!(
      remove_files(prefix.to_str().unwrap(), |p| fs::remove_file(p))
        .unwrap()
        .is_empty()
    );
  }

  #[test]
  fn remove_files_stops_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("sim");
    fs::write(dir.path().join("sim.a"), b"").unwrap();
    fs::write(dir.path().join("sim.b"), b"").unwrap();

    let mut attempted = Vec::new();
    let err = remove_files(prefix.to_str().unwrap(), |p| {
      attempted.push(p.to_path_buf());
      Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    })
    .unwrap_err();

    assert!(matches!(err, Error::Io { ref path, .. } if *path == dir.path().join("sim.a")));
    assert_eq!(attempted, vec![dir.path().join("sim.a")]);
    assert!(dir.path().join("sim.b").exists());
  }
}
