//! Reading the student preference file.
//!
//! Two schema versions are supported and must be selected explicitly:
//! * `columns`: no header row; each row holds the student's name followed by the preferred course names, best first.
//!   Rows may have different lengths. Empty trailing fields are ignored.
//! * `sentinel`: header row with the columns `name` and `preferences`; the `preferences` field holds the course names,
//!   best first, separated by `COURSE_LIST_SEPARATOR`.

use crate::{Error, Student, StudentRegistry};
use encoding_rs::Encoding;
use serde::Deserialize;
use std::collections::HashSet;

/// Separator of course names in the `preferences` column of the `sentinel` schema. It is chosen such that it does not
/// collide with commas in course names.
pub const COURSE_LIST_SEPARATOR: &str = "@!@";

/// Expected column names of the `sentinel` schema
pub const SENTINEL_FIELDS: [&str; 2] = ["name", "preferences"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreferenceSchema {
    Columns,
    Sentinel,
}

impl std::str::FromStr for PreferenceSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "columns" => Ok(Self::Columns),
            "sentinel" => Ok(Self::Sentinel),
            _ => Err(format!("Unknown preference file schema '{}'", s)),
        }
    }
}

#[derive(Deserialize)]
struct SentinelRecord {
    name: String,
    preferences: String,
}

/// Read the list of students with their course preferences from a CSV file
///
/// # Errors
///
/// Fails if the text cannot be decoded, the columns do not match the selected schema, or the resulting students are
/// invalid (no preferences, duplicate preferences, duplicate names).
pub fn read<R: std::io::Read>(
    reader: R,
    schema: PreferenceSchema,
    encoding: &'static Encoding,
) -> Result<StudentRegistry, Error> {
    let text = super::read_text(reader, encoding)?;
    let students = match schema {
        PreferenceSchema::Columns => read_columns(&text)?,
        PreferenceSchema::Sentinel => read_sentinel(&text)?,
    };
    StudentRegistry::new(students)
}

fn read_columns(text: &str) -> Result<Vec<Student>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut students = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut fields = record.iter();
        let name = match fields.next() {
            Some(name) => name.to_owned(),
            None => continue,
        };
        let mut preferences: Vec<String> = fields.map(String::from).collect();
        while preferences.last().map_or(false, |p| p.is_empty()) {
            preferences.pop();
        }
        students.push(Student::new(name, preferences)?);
    }
    Ok(students)
}

fn read_sentinel(text: &str) -> Result<Vec<Student>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let found: HashSet<&str> = headers.iter().collect();
    let expected: HashSet<&str> = SENTINEL_FIELDS.iter().copied().collect();
    if found.len() != headers.len() || found != expected {
        return Err(Error::Schema {
            expected: SENTINEL_FIELDS.to_vec(),
            found: headers.iter().map(String::from).collect(),
        });
    }

    reader
        .deserialize::<SentinelRecord>()
        .map(|record| {
            let record = record?;
            let preferences = if record.preferences.is_empty() {
                Vec::new()
            } else {
                record
                    .preferences
                    .split(COURSE_LIST_SEPARATOR)
                    .map(String::from)
                    .collect()
            };
            Student::new(record.name, preferences)
        })
        .collect()
}
