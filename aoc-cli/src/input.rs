//! Puzzle input loading from the local filesystem

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Where puzzle inputs live on disk
///
/// Directory structure: `{root}/day_{day}/input.txt`. An explicit file
/// replaces the lookup for every day.
pub struct InputStore {
    root: PathBuf,
    file_override: Option<PathBuf>,
}

impl InputStore {
    pub fn new(root: impl Into<PathBuf>, file_override: Option<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_override,
        }
    }

    /// Path the input for a year/day is read from
    pub fn input_path(&self, _year: u16, day: u8) -> PathBuf {
        match &self.file_override {
            Some(file) => file.clone(),
            None => self.root.join(format!("day_{}", day)).join("input.txt"),
        }
    }

    /// Check if the input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the whole input for a year/day
    pub fn load(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        read_input(&path)
    }
}

fn read_input(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
        _ => InputError::Read {
            path: path.to_path_buf(),
            source,
        },
    })
}
