use super::types::{LoadError, LoadOptions, LoadReport};
use crate::record::{Entity, Organization, Person};
use crate::storage::TypedCache;

use csv::{ByteRecord, ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// An entity that can be read from one comma-separated line without a header.
pub trait CsvRecord: Entity {
    const FIELD_NAMES: &'static [&'static str];

    /// Builds the entity from already split fields. Missing fields are a `FieldCount` error.
    fn from_fields(fields: &[&str], line: usize) -> Result<Self, LoadError>;
}

impl CsvRecord for Organization {
    const FIELD_NAMES: &'static [&'static str] = &["id", "name"];

    fn from_fields(fields: &[&str], line: usize) -> Result<Self, LoadError> {
        let [id, name] = take::<2>(fields, line)?;
        Ok(Organization {
            id: parse_int(id, "id", line)?,
            name: name.to_string(),
        })
    }
}

impl CsvRecord for Person {
    const FIELD_NAMES: &'static [&'static str] = &["id", "name", "orgId"];

    fn from_fields(fields: &[&str], line: usize) -> Result<Self, LoadError> {
        let [id, name, org_id] = take::<3>(fields, line)?;
        Ok(Person {
            id: parse_int(id, "id", line)?,
            name: name.to_string(),
            org_id: parse_int(org_id, Person::ORG_ID, line)?,
        })
    }
}

/// Headerless, unquoted, comma-separated input with every field trimmed.
fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All);
    builder
}

/// Parses one line. `line` is 1-based and only used for error reporting.
pub fn parse_line<E: CsvRecord>(text: &str, line: usize) -> Result<E, LoadError> {
    let mut reader = reader_builder().from_reader(text.as_bytes());
    let mut record = ByteRecord::new();
    let read = reader
        .read_byte_record(&mut record)
        .map_err(|err| csv_error(err, "<line>", line))?;
    if !read {
        return Err(LoadError::FieldCount {
            line,
            expected: E::FIELD_NAMES.len(),
            found: 0,
        });
    }
    parse_record(&record, line)
}

fn parse_record<E: CsvRecord>(record: &ByteRecord, line: usize) -> Result<E, LoadError> {
    if record.len() != E::FIELD_NAMES.len() {
        return Err(LoadError::FieldCount {
            line,
            expected: E::FIELD_NAMES.len(),
            found: record.len(),
        });
    }
    let fields = record
        .iter()
        .map(|field| std::str::from_utf8(field).map_err(|_| LoadError::InvalidUtf8 { line }))
        .collect::<Result<Vec<&str>, _>>()?;
    E::from_fields(&fields, line)
}

/// Loads every line of `reader` into `cache`, one put per line.
///
/// Blank lines are ignored. A malformed line (wrong field count, bad integer, invalid
/// UTF-8) is skipped with a warning, or aborts the load when `options.strict` is set;
/// lines before it stay loaded. Read failures always abort.
pub fn load_reader<E, R>(
    reader: R,
    source: &str,
    cache: &TypedCache<E>,
    options: LoadOptions,
) -> Result<LoadReport, LoadError>
where
    E: CsvRecord,
    R: Read,
{
    let mut reader = reader_builder().from_reader(reader);
    let mut record = ByteRecord::new();
    let mut report = LoadReport::default();

    loop {
        let parsed = match reader.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map_or(0, |pos| pos.line() as usize);
                if record.iter().all(<[u8]>::is_empty) {
                    continue;
                }
                if options.echo {
                    let fields: Vec<_> = record.iter().map(String::from_utf8_lossy).collect();
                    println!("{}", fields.join(","));
                }
                parse_record::<E>(&record, line)
            }
            Err(err) => {
                let line = err.position().map_or(0, |pos| pos.line() as usize);
                Err(csv_error(err, source, line))
            }
        };

        match parsed {
            Ok(entity) => {
                cache.put(&entity)?;
                report.loaded += 1;
            }
            Err(err) if options.strict || !err.is_line_error() => return Err(err),
            Err(err) => {
                tracing::warn!("Skipping {} line: {}", source, err);
                report.skipped.push(err);
            }
        }
    }

    Ok(report)
}

pub fn load_file<E: CsvRecord>(
    path: &Path,
    cache: &TypedCache<E>,
    options: LoadOptions,
) -> Result<LoadReport, LoadError> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|err| LoadError::Io {
        path: source.clone(),
        source: err,
    })?;
    let report = load_reader(file, &source, cache, options)?;

    tracing::info!(
        "Loaded {} record(s) from {} into {} ({} skipped)",
        report.loaded,
        source,
        cache.store().name(),
        report.skipped.len()
    );
    Ok(report)
}

fn csv_error(err: csv::Error, source: &str, line: usize) -> LoadError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(err) => LoadError::Io {
            path: source.to_string(),
            source: err,
        },
        _ => LoadError::Malformed { line, message },
    }
}

fn take<'a, const N: usize>(fields: &[&'a str], line: usize) -> Result<[&'a str; N], LoadError> {
    fields.try_into().map_err(|_| LoadError::FieldCount {
        line,
        expected: N,
        found: fields.len(),
    })
}

fn parse_int(value: &str, field: &str, line: usize) -> Result<i64, LoadError> {
    value.parse::<i64>().map_err(|_| LoadError::InvalidInteger {
        line,
        field: field.to_string(),
        value: value.to_string(),
    })
}
