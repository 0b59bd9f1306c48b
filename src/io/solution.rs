//! Writing (and reading back) the solution file: a CSV file with the columns `student` and `course` and one row per
//! student, in student registry order.

use crate::{Assignment, Error};
use encoding_rs::Encoding;
use serde::Deserialize;

pub const SOLUTION_FIELDS: [&str; 2] = ["student", "course"];

#[derive(Deserialize)]
struct SolutionRecord {
    student: String,
    course: String,
}

/// Write the calculated course assignment to a Writer (e.g. an output file)
pub fn write<W: std::io::Write>(
    writer: W,
    assignment: &Assignment,
    encoding: &'static Encoding,
) -> Result<(), Error> {
    let mut buffer = Vec::<u8>::new();
    {
        let mut csv_writer = csv::Writer::from_writer(&mut buffer);
        csv_writer.write_record(SOLUTION_FIELDS)?;
        for (student, course) in assignment.iter() {
            csv_writer.write_record([student, course])?;
        }
        csv_writer.flush()?;
    }
    let text = String::from_utf8(buffer).map_err(|_| Error::Decoding("UTF-8"))?;
    super::write_text(writer, &text, encoding)
}

/// Read a course assignment from a solution file, as written by `write()`
pub fn read<R: std::io::Read>(reader: R, encoding: &'static Encoding) -> Result<Assignment, Error> {
    let text = super::read_text(reader, encoding)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?;
    if headers.iter().ne(SOLUTION_FIELDS.iter().copied()) {
        return Err(Error::Schema {
            expected: SOLUTION_FIELDS.to_vec(),
            found: headers.iter().map(String::from).collect(),
        });
    }

    reader
        .deserialize::<SolutionRecord>()
        .map(|record| {
            let record = record?;
            Ok((record.student, record.course))
        })
        .collect()
}
