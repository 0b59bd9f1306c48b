//! Reading the course capacity file.
//!
//! Two schema versions are supported and must be selected explicitly:
//! * `headered`: header row with the columns `name`, `min_size` and `max_size` (in any order)
//! * `legacy`: no header row, two columns `name,capacity`. The capacity is used as maximum size; the minimum size is 0.

use crate::{Course, CourseRegistry, Error};
use encoding_rs::Encoding;
use serde::Deserialize;
use std::collections::HashSet;

/// Expected column names of the `headered` schema
pub const VALID_FIELDS: [&str; 3] = ["name", "min_size", "max_size"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacitySchema {
    Headered,
    Legacy,
}

impl std::str::FromStr for CapacitySchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "headered" => Ok(Self::Headered),
            "legacy" => Ok(Self::Legacy),
            _ => Err(format!("Unknown capacity file schema '{}'", s)),
        }
    }
}

#[derive(Deserialize)]
struct CapacityRecord {
    name: String,
    min_size: u32,
    max_size: u32,
}

/// Read the list of courses from a course capacity CSV file
///
/// # Errors
///
/// Fails if the text cannot be decoded, the columns do not match the selected schema, a size is not a non-negative
/// integer, or the resulting courses are invalid (duplicate names, `min_size > max_size`).
pub fn read<R: std::io::Read>(
    reader: R,
    schema: CapacitySchema,
    encoding: &'static Encoding,
) -> Result<CourseRegistry, Error> {
    let text = super::read_text(reader, encoding)?;
    let courses = match schema {
        CapacitySchema::Headered => read_headered(&text)?,
        CapacitySchema::Legacy => read_legacy(&text)?,
    };
    CourseRegistry::new(courses)
}

fn read_headered(text: &str) -> Result<Vec<Course>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let found: HashSet<&str> = headers.iter().collect();
    let expected: HashSet<&str> = VALID_FIELDS.iter().copied().collect();
    if found.len() != headers.len() || found != expected {
        return Err(Error::Schema {
            expected: VALID_FIELDS.to_vec(),
            found: headers.iter().map(String::from).collect(),
        });
    }

    reader
        .deserialize::<CapacityRecord>()
        .map(|record| {
            let record = record?;
            Course::new(record.name, record.min_size, record.max_size)
        })
        .collect()
}

fn read_legacy(text: &str) -> Result<Vec<Course>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut courses = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        if record.len() != 2 {
            return Err(Error::FieldCount {
                line,
                expected: 2,
                found: record.len(),
            });
        }
        let capacity = record[1]
            .trim()
            .parse::<u32>()
            .map_err(|_| Error::InvalidNumber {
                line,
                field: "capacity",
                value: record[1].to_owned(),
            })?;
        courses.push(Course::new(record[0].to_owned(), 0, capacity)?);
    }
    Ok(courses)
}

#[cfg(test)]
mod test {
    use super::CapacitySchema;
    use crate::Error;

    #[test]
    fn parse_headered_file() {
        let data = include_bytes!("test_ressources/course_capacity.csv");
        let courses = super::read(&data[..], CapacitySchema::Headered, encoding_rs::UTF_8).unwrap();

        assert_eq!(courses.len(), 3);
        assert_eq!(
            courses.names().collect::<Vec<_>>(),
            vec!["course_1", "Tricky, Course, Name", "course_3"]
        );
        let tricky = courses.get("Tricky, Course, Name").unwrap();
        assert_eq!(tricky.min_size(), 2);
        assert_eq!(tricky.max_size(), 10);
    }

    #[test]
    fn parse_headered_columns_in_any_order() {
        let data = "max_size,name,min_size\n5,c1,2\n";
        let courses =
            super::read(data.as_bytes(), CapacitySchema::Headered, encoding_rs::UTF_8).unwrap();
        let c1 = courses.get("c1").unwrap();
        assert_eq!((c1.min_size(), c1.max_size()), (2, 5));
    }

    #[test]
    fn headered_schema_mismatch() {
        for data in [
            "name,capacity\nc1,5\n",
            "name,min_size,max_size,room\nc1,1,5,A\n",
            "name,min_size,min_size\nc1,1,5\n",
            "c1,1,5\n",
            "",
        ] {
            let result = super::read(data.as_bytes(), CapacitySchema::Headered, encoding_rs::UTF_8);
            assert!(
                matches!(result, Err(Error::Schema { .. })),
                "Expected schema error for {:?}, got {:?}",
                data,
                result
            );
        }
    }

    #[test]
    fn headered_invalid_values() {
        let data = "name,min_size,max_size\nc1,-1,5\n";
        let result = super::read(data.as_bytes(), CapacitySchema::Headered, encoding_rs::UTF_8);
        assert!(matches!(result, Err(Error::Csv(_))));

        let data = "name,min_size,max_size\nc1,6,5\n";
        let result = super::read(data.as_bytes(), CapacitySchema::Headered, encoding_rs::UTF_8);
        assert!(matches!(result, Err(Error::InvalidCourseSize { .. })));

        let data = "name,min_size,max_size\nc1,1,5\nc1,2,5\n";
        let result = super::read(data.as_bytes(), CapacitySchema::Headered, encoding_rs::UTF_8);
        assert!(matches!(result, Err(Error::DuplicateCourse(_))));
    }

    #[test]
    fn parse_legacy_file() {
        let data = include_bytes!("test_ressources/course_capacity_legacy.csv");
        let courses = super::read(&data[..], CapacitySchema::Legacy, encoding_rs::UTF_8).unwrap();

        assert_eq!(courses.len(), 2);
        let c1 = courses.get("course_1").unwrap();
        assert_eq!((c1.min_size(), c1.max_size()), (0, 1));
        let tricky = courses.get("Tricky, Course, Name").unwrap();
        assert_eq!((tricky.min_size(), tricky.max_size()), (0, 10));
    }

    #[test]
    fn legacy_schema_mismatch() {
        let data = "c1,5\nc2,1,5\n";
        let result = super::read(data.as_bytes(), CapacitySchema::Legacy, encoding_rs::UTF_8);
        assert!(matches!(
            result,
            Err(Error::FieldCount {
                line: 2,
                expected: 2,
                found: 3
            })
        ));

        let data = "name,capacity\nc1,5\n";
        let result = super::read(data.as_bytes(), CapacitySchema::Legacy, encoding_rs::UTF_8);
        assert!(matches!(
            result,
            Err(Error::InvalidNumber { line: 1, .. })
        ));
    }

    #[test]
    fn parse_latin1_file() {
        let data = b"name,min_size,max_size\nK\xe4sekurs,1,5\n";
        let courses =
            super::read(&data[..], CapacitySchema::Headered, encoding_rs::WINDOWS_1252).unwrap();
        assert!(courses.get("Käsekurs").is_some());

        let result = super::read(&data[..], CapacitySchema::Headered, encoding_rs::UTF_8);
        assert!(matches!(result, Err(Error::Decoding(_))));
    }

    #[test]
    fn schema_names() {
        assert_eq!("headered".parse(), Ok(CapacitySchema::Headered));
        assert_eq!("legacy".parse(), Ok(CapacitySchema::Legacy));
        assert!("Headered".parse::<CapacitySchema>().is_err());
    }
}
