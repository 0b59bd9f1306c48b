//! IO functionality for reading problem instances from and writing solutions to CSV files.
//!
//! All files of one run share a single text encoding (see `encoding_for_label()`). Input files are decoded to text
//! completely before parsing, output is serialized to text before encoding.

pub mod capacity;
pub mod preferences;
pub mod solution;

use crate::{Assignment, Error};
use encoding_rs::Encoding;
use std::fmt::Write;

/// Look up a text encoding by its WHATWG label (e.g. "utf-8", "latin1", "windows-1252"). `None` selects UTF-8.
pub fn encoding_for_label(label: Option<&str>) -> Result<&'static Encoding, Error> {
    match label {
        None => Ok(encoding_rs::UTF_8),
        Some(l) => {
            Encoding::for_label(l.as_bytes()).ok_or_else(|| Error::UnknownEncoding(l.to_owned()))
        }
    }
}

/// Read all data from `reader` and decode it using the given encoding. A byte order mark overrides the encoding.
fn read_text<R: std::io::Read>(mut reader: R, encoding: &'static Encoding) -> Result<String, Error> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let (text, actual_encoding, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(Error::Decoding(actual_encoding.name()));
    }
    Ok(text.into_owned())
}

/// Encode `text` using the given encoding and write it to `writer`.
fn write_text<W: std::io::Write>(
    mut writer: W,
    text: &str,
    encoding: &'static Encoding,
) -> Result<(), Error> {
    let (bytes, actual_encoding, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(Error::Encoding(actual_encoding.name()));
    }
    writer.write_all(&bytes)?;
    Ok(())
}

/// Format the calculated course assignment into a human readable String (e.g. to print it to stdout).
///
/// The output format will look like
/// ```text
/// student       course
/// Anton         Course name
/// Bertalotta    Another course name
/// ```
pub fn format_assignment(assignment: &Assignment) -> String {
    let width = assignment
        .iter()
        .map(|(s, _c)| s.chars().count())
        .chain(std::iter::once("student".len()))
        .max()
        .unwrap_or(0);
    let mut result = String::new();
    writeln!(result, "{:<width$}  course", "student", width = width).unwrap();
    for (student, course) in assignment.iter() {
        writeln!(result, "{:<width$}  {}", student, course, width = width).unwrap();
    }
    result
}

#[cfg(test)]
mod test {
    #[test]
    fn test_encoding_labels() {
        assert_eq!(super::encoding_for_label(None).unwrap(), encoding_rs::UTF_8);
        assert_eq!(
            super::encoding_for_label(Some("latin1")).unwrap(),
            encoding_rs::WINDOWS_1252
        );
        assert!(super::encoding_for_label(Some("no-such-encoding")).is_err());
    }

    #[test]
    fn test_read_text() {
        let data = b"\xc4rger";
        let text = super::read_text(&data[..], encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(text, "Ärger");
        assert!(super::read_text(&data[..], encoding_rs::UTF_8).is_err());
    }

    #[test]
    fn test_write_text() {
        let mut buffer = Vec::<u8>::new();
        super::write_text(&mut buffer, "Ärger", encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(buffer, b"\xc4rger");

        let mut buffer = Vec::<u8>::new();
        assert!(super::write_text(&mut buffer, "Ärger ☃", encoding_rs::WINDOWS_1252).is_err());
    }

    #[test]
    fn test_format_assignment() {
        let assignment = vec![
            (String::from("Anton"), String::from("Course name")),
            (String::from("Bertalotta"), String::from("Another course")),
        ];
        assert_eq!(
            super::format_assignment(&assignment),
            "student     course\nAnton       Course name\nBertalotta  Another course\n"
        );
    }
}
