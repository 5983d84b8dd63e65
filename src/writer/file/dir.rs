// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Directory and file primitives of the file writer.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;

#[derive(Debug)]
pub(crate) struct LogFile {
    pub(crate) path: PathBuf,
    pub(crate) created: Option<SystemTime>,
}

/// List the regular, non-hidden files of a directory, in directory listing order.
pub(crate) fn list_files(dir: &Path) -> io::Result<Vec<LogFile>> {
    let files = fs::read_dir(dir)?
        .filter_map(|entry| {
            let entry = entry.ok()?;

            // `DirEntry::metadata` does not follow symlinks
            let metadata = entry.metadata().ok()?;
            if !metadata.is_file() {
                return None;
            }
            if entry.file_name().to_string_lossy().starts_with('.') {
                return None;
            }

            // not every filesystem records birth time
            let created = metadata.created().or_else(|_| metadata.modified()).ok();
            Some(LogFile {
                path: entry.path(),
                created,
            })
        })
        .collect();
    Ok(files)
}

/// The file with the earliest creation time. The first one listed wins ties.
pub(crate) fn oldest_file(files: &[LogFile]) -> Option<&LogFile> {
    let mut oldest: Option<(&LogFile, SystemTime)> = None;
    for file in files {
        let Some(created) = file.created else {
            continue;
        };
        match oldest {
            Some((_, time)) if time <= created => {}
            _ => oldest = Some((file, created)),
        }
    }
    oldest.map(|(file, _)| file)
}

/// The file with the latest creation time. The first one listed wins ties.
pub(crate) fn newest_file(files: &[LogFile]) -> Option<&LogFile> {
    let mut newest: Option<(&LogFile, SystemTime)> = None;
    for file in files {
        let Some(created) = file.created else {
            continue;
        };
        match newest {
            Some((_, time)) if time >= created => {}
            _ => newest = Some((file, created)),
        }
    }
    newest.map(|(file, _)| file)
}

/// The size of a regular file, or `None` if it does not exist.
pub(crate) fn file_size(path: &Path) -> Option<u64> {
    let metadata = fs::metadata(path).ok()?;
    metadata.is_file().then(|| metadata.len())
}

/// `dir/stem.extension`, or `dir/stem_N.extension` with the smallest free `N`.
///
/// Fails if the existence of a candidate cannot be checked, such as when `dir` is no longer a
/// directory.
pub(crate) fn unique_filename(dir: &Path, stem: &str, extension: &str) -> io::Result<PathBuf> {
    let mut path = dir.join(format!("{stem}.{extension}"));
    let mut duplicates = 0;
    while fs::exists(&path)? {
        duplicates += 1;
        path = dir.join(format!("{stem}_{duplicates}.{extension}"));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;

    use super::*;

    fn log_file(name: &str, secs: Option<u64>) -> LogFile {
        LogFile {
            path: PathBuf::from(name),
            created: secs.map(|secs| SystemTime::UNIX_EPOCH + Duration::from_secs(secs)),
        }
    }

    #[test]
    fn test_oldest_and_newest() {
        let files = vec![
            log_file("b", Some(20)),
            log_file("a", Some(10)),
            log_file("unknown", None),
            log_file("c", Some(30)),
        ];
        assert_eq!(oldest_file(&files).unwrap().path, PathBuf::from("a"));
        assert_eq!(newest_file(&files).unwrap().path, PathBuf::from("c"));
    }

    #[test]
    fn test_first_listed_wins_ties() {
        let files = vec![
            log_file("first", Some(10)),
            log_file("second", Some(10)),
        ];
        assert_eq!(oldest_file(&files).unwrap().path, PathBuf::from("first"));
        assert_eq!(newest_file(&files).unwrap().path, PathBuf::from("first"));
    }

    #[test]
    fn test_no_candidates() {
        assert!(oldest_file(&[]).is_none());
        assert!(newest_file(&[log_file("unknown", None)]).is_none());
    }

    #[test]
    fn test_list_skips_hidden_and_directories() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path();
        fs::write(dir.join("1-log.log"), "a").unwrap();
        fs::write(dir.join(".DS_Store"), "b").unwrap();
        fs::create_dir(dir.join("archive")).unwrap();

        let files = list_files(dir).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, dir.join("1-log.log"));
        assert!(files[0].created.is_some());
    }

    #[test]
    fn test_unique_filename() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let dir = temp_dir.path();
        assert_eq!(
            unique_filename(dir, "7-log", "log").unwrap(),
            dir.join("7-log.log")
        );

        fs::write(dir.join("7-log.log"), "").unwrap();
        fs::write(dir.join("7-log_1.log"), "").unwrap();
        assert_eq!(
            unique_filename(dir, "7-log", "log").unwrap(),
            dir.join("7-log_2.log")
        );
    }

    #[test]
    fn test_unique_filename_in_non_directory() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let not_a_dir = temp_dir.path().join("logs");
        fs::write(&not_a_dir, "a regular file").unwrap();

        assert!(unique_filename(&not_a_dir, "7-log", "log").is_err());
    }

    #[test]
    fn test_file_size() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let path = temp_dir.path().join("sized.log");
        assert_eq!(file_size(&path), None);
        fs::write(&path, "0123456789").unwrap();
        assert_eq!(file_size(&path), Some(10));
        assert_eq!(file_size(temp_dir.path()), None);
    }
}
