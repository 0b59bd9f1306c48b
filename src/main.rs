use std::fs::File;
use std::path::{Path, PathBuf};

use clap::{arg, command, value_parser, ArgMatches};
use log::{error, info};

use sortinghat::io::capacity::CapacitySchema;
use sortinghat::io::preferences::PreferenceSchema;
use sortinghat::{io, score, solve, CourseRegistry, Error, StudentRegistry};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = command!()
        .arg(
            arg!(<CAPACITY_FILE> "CSV file with the course names and their minimum and maximum sizes")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(<STUDENT_FILE> "CSV file with the student names and their course preferences, best first")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(<SOLUTION_FILE> "Path of the CSV file to write the course assignment to")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            arg!(-e --encoding <LABEL> "Text encoding of all input and output files (e.g. utf-8, latin1)")
                .required(false),
        )
        .arg(
            arg!(--"capacity-schema" <SCHEMA> "Layout of the course capacity file")
                .value_parser(|s: &str| s.parse::<CapacitySchema>())
                .default_value("headered"),
        )
        .arg(
            arg!(--"preference-schema" <SCHEMA> "Layout of the student preference file")
                .value_parser(|s: &str| s.parse::<PreferenceSchema>())
                .default_value("columns"),
        )
        .get_matches();

    let (students, courses, solution_path, encoding) = match read_input(&matches) {
        Ok(x) => x,
        Err((e, code)) => {
            error!("{}", e);
            std::process::exit(code);
        }
    };
    info!(
        "Read {} courses and {} students",
        courses.len(),
        students.len()
    );

    let result = match solve::solve(&students, &courses) {
        Ok(r) => r,
        Err(e) => {
            error!("{}", e);
            std::process::exit(exit_code_for(&e, exitcode::SOFTWARE));
        }
    };

    match result {
        Some((assignment, cost)) => {
            println!("Minimum of objective function: {}", cost);
            print!("{}", io::format_assignment(&assignment));

            info!(
                "Students per preference rank: {:?}",
                score::preference_histogram(&students, &assignment)
            );
            for (course, size) in score::course_sizes(&courses, &assignment) {
                info!("{}: {} students", course, size);
            }

            let write_result = File::create(solution_path)
                .map_err(|e| Error::Io {
                    path: solution_path.clone(),
                    source: e,
                })
                .and_then(|file| io::solution::write(file, &assignment, encoding));
            if let Err(e) = write_result {
                error!("Could not write solution file: {}", e);
                std::process::exit(exit_code_for(&e, exitcode::CANTCREAT));
            }
            println!("Saved solution to {}", solution_path.display());
        }
        None => {
            println!("No solution found.");
        }
    }
    std::process::exit(exitcode::OK);
}

/// Read both input files as selected by the command line arguments.
///
/// On failure, returns the error together with the process exit code to use.
fn read_input(
    matches: &ArgMatches,
) -> Result<
    (
        StudentRegistry,
        CourseRegistry,
        &PathBuf,
        &'static encoding_rs::Encoding,
    ),
    (Error, exitcode::ExitCode),
> {
    let encoding = io::encoding_for_label(matches.get_one::<String>("encoding").map(|s| s.as_str()))
        .map_err(|e| (e, exitcode::USAGE))?;
    let capacity_schema = matches
        .get_one::<CapacitySchema>("capacity-schema")
        .copied()
        .unwrap_or(CapacitySchema::Headered);
    let preference_schema = matches
        .get_one::<PreferenceSchema>("preference-schema")
        .copied()
        .unwrap_or(PreferenceSchema::Columns);

    let capacity_path = required_path(matches, "CAPACITY_FILE")?;
    let student_path = required_path(matches, "STUDENT_FILE")?;
    let solution_path = required_path(matches, "SOLUTION_FILE")?;

    let courses = io::capacity::read(open(capacity_path)?, capacity_schema, encoding)
        .map_err(|e| (e, exitcode::DATAERR))?;
    let students = io::preferences::read(open(student_path)?, preference_schema, encoding)
        .map_err(|e| (e, exitcode::DATAERR))?;

    Ok((students, courses, solution_path, encoding))
}

fn required_path<'a>(
    matches: &'a ArgMatches,
    id: &str,
) -> Result<&'a PathBuf, (Error, exitcode::ExitCode)> {
    matches.get_one::<PathBuf>(id).ok_or_else(|| {
        (
            Error::Io {
                path: PathBuf::from(id),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "argument missing"),
            },
            exitcode::USAGE,
        )
    })
}

fn open(path: &Path) -> Result<File, (Error, exitcode::ExitCode)> {
    File::open(path).map_err(|e| {
        (
            Error::Io {
                path: path.to_owned(),
                source: e,
            },
            exitcode::NOINPUT,
        )
    })
}

/// IO errors keep the given exit code, encoding problems of the output are data errors.
fn exit_code_for(e: &Error, default: exitcode::ExitCode) -> exitcode::ExitCode {
    match e {
        Error::Encoding(_) => exitcode::DATAERR,
        Error::NoMatchingVariables { .. } => exitcode::DATAERR,
        _ => default,
    }
}
