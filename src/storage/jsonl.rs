//! JSONL (JSON Lines) storage.
//!
//! One JSON object per line. Unparseable lines are logged and skipped on
//! read so a single bad record never hides the rest of a file, and kept
//! verbatim when a file is rewritten.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use crate::models::{
    Course, CourseId, HandicapHistory, HandicapHistoryEntry, Round, RoundId,
};

use super::{StorageConfig, StorageError};

/// Record types kept in JSONL files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    Course,
    Round,
    HandicapEntry,
}

impl RecordType {
    /// Get the filename for this record type.
    pub fn filename(&self) -> &'static str {
        match self {
            RecordType::Course => "courses.jsonl",
            RecordType::Round => "rounds.jsonl",
            RecordType::HandicapEntry => "handicap_history.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for a record type under the data directory.
    pub fn for_record(config: &StorageConfig, record: RecordType) -> Self {
        Self::new(config.data_dir.join(record.filename()))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single record to the file.
    pub fn append(&self, record: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(record)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended record to {:?}", self.path);
        Ok(())
    }

    /// Write records, replacing the entire file.
    pub fn write_all(&self, records: &[T]) -> Result<usize, StorageError> {
        self.write_preserving(records, &[])
    }

    /// Replace the file with `records`, then the raw `unparsed` lines verbatim.
    pub fn write_preserving(
        &self,
        records: &[T],
        unparsed: &[String],
    ) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);

        for record in records {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
        }
        for line in unparsed {
            writeln!(writer, "{}", line)?;
        }

        writer.flush()?;
        if !unparsed.is_empty() {
            warn!(
                "Kept {} unparsed lines in {:?}",
                unparsed.len(),
                self.path
            );
        }
        info!("Wrote {} records to {:?}", records.len(), self.path);

        Ok(records.len())
    }
}

/// Contents of a JSONL file: parsed records plus the lines that failed to parse.
#[derive(Debug)]
pub struct JsonlContents<T> {
    pub records: Vec<T>,
    pub unparsed: Vec<String>,
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for a record type under the data directory.
    pub fn for_record(config: &StorageConfig, record: RecordType) -> Self {
        Self::new(config.data_dir.join(record.filename()))
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all records. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.read_contents()?.records)
    }

    /// Read all records, keeping unparseable lines for rewrites.
    pub fn read_contents(&self) -> Result<JsonlContents<T>, StorageError> {
        if !self.path.exists() {
            return Ok(JsonlContents {
                records: Vec::new(),
                unparsed: Vec::new(),
            });
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        let mut unparsed = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        index + 1,
                        self.path,
                        e
                    );
                    unparsed.push(line);
                }
            }
        }

        debug!("Read {} records from {:?}", records.len(), self.path);
        Ok(JsonlContents { records, unparsed })
    }

    /// Read records matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

/// Read all courses.
pub fn read_courses(config: &StorageConfig) -> Result<Vec<Course>, StorageError> {
    JsonlReader::for_record(config, RecordType::Course).read_all()
}

/// Find a course by ID.
pub fn find_course(config: &StorageConfig, id: &CourseId) -> Result<Course, StorageError> {
    read_courses(config)?
        .into_iter()
        .find(|c| &c.id == id)
        .ok_or_else(|| StorageError::NotFound(format!("course {}", id)))
}

/// Insert or replace a course, keeping the file sorted by name.
///
/// Lines that do not parse are kept at the end of the file.
pub fn save_course(config: &StorageConfig, course: Course) -> Result<(), StorageError> {
    let JsonlContents {
        records: mut courses,
        unparsed,
    } = JsonlReader::for_record(config, RecordType::Course).read_contents()?;
    courses.retain(|c: &Course| c.id != course.id);
    courses.push(course);
    courses.sort_by(|a, b| a.name.cmp(&b.name));
    JsonlWriter::for_record(config, RecordType::Course).write_preserving(&courses, &unparsed)?;
    Ok(())
}

/// Read all rounds.
pub fn read_rounds(config: &StorageConfig) -> Result<Vec<Round>, StorageError> {
    JsonlReader::for_record(config, RecordType::Round).read_all()
}

/// Find a round by ID.
pub fn find_round(config: &StorageConfig, id: &RoundId) -> Result<Round, StorageError> {
    read_rounds(config)?
        .into_iter()
        .find(|r| &r.id == id)
        .ok_or_else(|| StorageError::NotFound(format!("round {}", id)))
}

/// Insert or replace a round, keeping the file sorted by date.
///
/// Lines that do not parse are kept at the end of the file.
pub fn save_round(config: &StorageConfig, round: Round) -> Result<(), StorageError> {
    let JsonlContents {
        records: mut rounds,
        unparsed,
    } = JsonlReader::for_record(config, RecordType::Round).read_contents()?;
    rounds.retain(|r: &Round| r.id != round.id);
    rounds.push(round);
    rounds.sort_by_key(|r| r.round_date);
    JsonlWriter::for_record(config, RecordType::Round).write_preserving(&rounds, &unparsed)?;
    Ok(())
}

/// Read the handicap index history.
pub fn read_handicap_history(config: &StorageConfig) -> Result<HandicapHistory, StorageError> {
    let entries = JsonlReader::for_record(config, RecordType::HandicapEntry).read_all()?;
    Ok(HandicapHistory::new(entries))
}

/// Append a history entry. Returns false if an identical entry already exists.
pub fn add_handicap_entry(
    config: &StorageConfig,
    entry: HandicapHistoryEntry,
) -> Result<bool, StorageError> {
    let history = read_handicap_history(config)?;
    if history.entries().iter().any(|e| e.id == entry.id) {
        debug!("Skipping duplicate handicap entry {}", entry.id);
        return Ok(false);
    }

    JsonlWriter::for_record(config, RecordType::HandicapEntry).append(&entry)?;
    Ok(true)
}
