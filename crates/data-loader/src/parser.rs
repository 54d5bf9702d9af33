//! Parser for the enrollment dataset files.
//!
//! Every file is UTF-8 with `::` as field separator:
//! - categories.dat: categoryId::name
//! - courses.dat: courseId::fullname::categoryId::visible::summary
//! - enrollments.dat: userId::courseId
//! - overviewfiles.dat: courseId::filepath::filename::mimetype
//!
//! The course summary is the last field and keeps any `::` it contains.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

/// Read a data file into (line number, trimmed line) pairs, skipping blank lines
fn read_lines(path: &Path) -> Result<Vec<(usize, String)>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    Ok(content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim().to_string()))
        .filter(|(_, line)| !line.is_empty())
        .collect())
}

/// Split a line into exactly `expected` fields.
///
/// The last field swallows the remainder of the line.
fn split_fields<'a>(
    line: &'a str,
    expected: usize,
    file: &str,
    line_no: usize,
) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.splitn(expected, "::").collect();
    if fields.len() != expected {
        return Err(DataLoadError::FieldCountMismatch {
            file: file.to_string(),
            expected,
            found: fields.len(),
            line: line_no,
        });
    }
    Ok(fields)
}

/// Parse a numeric id field, reporting the file and line on failure
fn parse_id<T>(value: &str, name: &str, file: &str, line_no: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid {}: {}", name, e),
    })
}

/// Parse the 0/1 visibility flag
fn parse_visible(s: &str) -> Result<bool> {
    match s.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(DataLoadError::InvalidValue {
            field: "visible".to_string(),
            value: other.to_string(),
        }),
    }
}

/// Parse the categories.dat file
///
/// Format: categoryId::name
pub fn parse_categories(path: &Path) -> Result<Vec<Category>> {
    const FILE: &str = "categories.dat";
    let mut categories = Vec::new();

    for (line_no, line) in read_lines(path)? {
        let fields = split_fields(&line, 2, FILE, line_no)?;
        categories.push(Category {
            id: parse_id(fields[0], "categoryId", FILE, line_no)?,
            name: fields[1].to_string(),
        });
    }

    Ok(categories)
}

/// Parse the courses.dat file
///
/// Format: courseId::fullname::categoryId::visible::summary
pub fn parse_courses(path: &Path) -> Result<Vec<Course>> {
    const FILE: &str = "courses.dat";
    let mut courses = Vec::new();

    for (line_no, line) in read_lines(path)? {
        let fields = split_fields(&line, 5, FILE, line_no)?;
        let fullname = fields[1].trim();
        if fullname.is_empty() {
            return Err(DataLoadError::ParseError {
                file: FILE.to_string(),
                line: line_no,
                reason: "Missing fullname".to_string(),
            });
        }

        courses.push(Course {
            id: parse_id(fields[0], "courseId", FILE, line_no)?,
            fullname: fullname.to_string(),
            category: parse_id(fields[2], "categoryId", FILE, line_no)?,
            visible: parse_visible(fields[3])?,
            summary: fields[4].to_string(),
        });
    }

    Ok(courses)
}

/// Parse the enrollments.dat file
///
/// Format: userId::courseId
pub fn parse_enrollments(path: &Path) -> Result<Vec<Enrollment>> {
    const FILE: &str = "enrollments.dat";
    let mut enrollments = Vec::new();

    for (line_no, line) in read_lines(path)? {
        let fields = split_fields(&line, 2, FILE, line_no)?;
        enrollments.push(Enrollment {
            user_id: parse_id(fields[0], "userId", FILE, line_no)?,
            course_id: parse_id(fields[1], "courseId", FILE, line_no)?,
        });
    }

    Ok(enrollments)
}

/// Parse the overviewfiles.dat file
///
/// Format: courseId::filepath::filename::mimetype
pub fn parse_overview_files(path: &Path) -> Result<Vec<OverviewFile>> {
    const FILE: &str = "overviewfiles.dat";
    let mut files = Vec::new();

    for (line_no, line) in read_lines(path)? {
        let fields = split_fields(&line, 4, FILE, line_no)?;
        files.push(OverviewFile {
            course_id: parse_id(fields[0], "courseId", FILE, line_no)?,
            filepath: normalize_filepath(fields[1]),
            filename: fields[2].to_string(),
            mimetype: fields[3].trim().to_lowercase(),
        });
    }

    Ok(files)
}

/// Make sure a file-area path starts and ends with '/'
///
/// Example: "" -> "/", "img" -> "/img/", "/img/" -> "/img/"
fn normalize_filepath(s: &str) -> String {
    let trimmed = s.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}
