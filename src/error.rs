use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort a run before or while solving.
///
/// Infeasibility of the problem is not an error. It is reported by `solve::solve()` as `Ok(None)`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Stream(#[from] std::io::Error),

    #[error("Unknown text encoding '{0}'")]
    UnknownEncoding(String),

    #[error("Input is not valid {0} text")]
    Decoding(&'static str),

    #[error("Output contains characters which cannot be represented in {0}")]
    Encoding(&'static str),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Expected fields {expected:?} but received {found:?}")]
    Schema {
        expected: Vec<&'static str>,
        found: Vec<String>,
    },

    #[error("Line {line}: expected {expected} fields but found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: invalid number '{value}' in field '{field}'")]
    InvalidNumber {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("Student '{0}' has no course preferences")]
    NoPreferences(String),

    #[error("Student '{student}' lists course '{course}' more than once")]
    DuplicatePreference { student: String, course: String },

    #[error("Student '{0}' is listed more than once")]
    DuplicateStudent(String),

    #[error("Course '{0}' is listed more than once")]
    DuplicateCourse(String),

    #[error("Course '{name}' has min_size {min_size} greater than max_size {max_size}")]
    InvalidCourseSize {
        name: String,
        min_size: u32,
        max_size: u32,
    },

    #[error("No variables for student {student}, courses {courses:?}")]
    NoMatchingVariables { student: usize, courses: Vec<String> },

    #[error("Solver failed: {0}")]
    Solver(String),
}
