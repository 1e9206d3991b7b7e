//! Seed file parsing
//!
//! One record per line: `first_name,last_name,number,address`. There is no
//! quoting, so the first three fields cannot contain commas; the address takes
//! the rest of the line and an address like `Tehran, sina, p3` survives intact.
//! Blank lines are skipped.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::application::errors::StoreError;
use crate::domain::entities::NewContact;

/// Read and parse every record in a seed file
pub fn read_seed_file(path: impl AsRef<Path>) -> Result<Vec<NewContact>, StoreError> {
    let text = std::fs::read(path.as_ref()).map_err(|e| StoreError::SeedFile(e.into()))?;
    parse_seed(&text)
}

/// Parse seed records from any reader
pub fn read_seed(mut input: impl Read) -> Result<Vec<NewContact>, StoreError> {
    let mut text = Vec::new();
    input
        .read_to_end(&mut text)
        .map_err(|e| StoreError::SeedFile(e.into()))?;
    parse_seed(&text)
}

fn parse_seed(text: &[u8]) -> Result<Vec<NewContact>, StoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text);

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(StoreError::SeedFile)?;
        let line = line_of(text, &record).unwrap_or(idx + 1);
        if let Some(contact) = parse_seed_record(line, &record)? {
            records.push(contact);
        }
    }
    Ok(records)
}

/// 1-based line of a record. The reader skips blank lines, so the recorded
/// position can sit in front of them.
fn line_of(text: &[u8], record: &StringRecord) -> Option<usize> {
    let start = record.position()?.byte() as usize;
    let skipped = text
        .get(start..)?
        .iter()
        .take_while(|b| matches!(b, b'\r' | b'\n'))
        .count();
    let before = text.get(..start + skipped)?;
    Some(before.iter().filter(|&&b| b == b'\n').count() + 1)
}

/// Turn one record into a contact; `Ok(None)` for whitespace-only lines
pub fn parse_seed_record(
    line: usize,
    record: &StringRecord,
) -> Result<Option<NewContact>, StoreError> {
    let mut fields = record
        .iter()
        .enumerate()
        .map(|(i, field)| if i == 0 { field.trim_start_matches('\u{feff}') } else { field });

    if record.iter().all(|field| field.trim().is_empty()) {
        return Ok(None);
    }

    let mut required = |name: &str| -> Result<String, StoreError> {
        match fields.next().map(str::trim) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            _ => Err(StoreError::MalformedSeedRecord {
                line,
                reason: format!("missing {}", name),
            }),
        }
    };

    let first_name = required("first name")?;
    let last_name = required("last name")?;
    let number = required("number")?;

    let address = fields.collect::<Vec<_>>().join(",");
    let address = Some(address.trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    Ok(Some(
        NewContact::new(first_name, last_name, number).with_address_opt(address),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse_one(text: &str) -> NewContact {
        let mut records = read_seed(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 1, "expected one record in {:?}", text);
        records.remove(0)
    }

    #[test]
    fn test_parse_full_line() {
        let record = parse_one("John,Doe,5551234,Main St\n");
        assert_eq!(record.first_name, "John");
        assert_eq!(record.last_name, "Doe");
        assert_eq!(record.number, "5551234");
        assert_eq!(record.address.as_deref(), Some("Main St"));
    }

    #[test]
    fn test_address_keeps_commas() {
        let record = parse_one("mobin,banikarim,09123456789,Tehran, sina, p3");
        assert_eq!(record.address.as_deref(), Some("Tehran, sina, p3"));
    }

    #[test]
    fn test_quotes_are_plain_text() {
        let record = parse_one("John,Doe,5551234,\"Main St\"");
        assert_eq!(record.address.as_deref(), Some("\"Main St\""));
    }

    #[test]
    fn test_missing_or_empty_address() {
        assert_eq!(parse_one("Jane,Roe,5559999").address, None);
        assert_eq!(parse_one("Jane,Roe,5559999,  ").address, None);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let record = parse_one(" Jane , Roe ,5559999 , Harbour Rd \r\n");
        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.last_name, "Roe");
        assert_eq!(record.number, "5559999");
        assert_eq!(record.address.as_deref(), Some("Harbour Rd"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let records = read_seed("\nJohn,Doe,5551234\n   \n\nJane,Roe,5559999\n".as_bytes()).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(names, vec!["John", "Jane"]);
    }

    #[test]
    fn test_byte_order_mark_stripped() {
        let record = parse_one("\u{feff}John,Doe,5551234");
        assert_eq!(record.first_name, "John");
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let text = "a,b,11111111\n\nc,d,22222222\ne,f,33333333\n\n\nJohn,Doe\n";
        match read_seed(text.as_bytes()) {
            Err(StoreError::MalformedSeedRecord { line, reason }) => {
                assert_eq!(line, 7);
                assert!(reason.contains("number"));
            }
            other => panic!("expected malformed record, got {:?}", other),
        }

        assert!(matches!(
            read_seed("John,Doe,5551234\n,Doe,5551234,Main St\n".as_bytes()),
            Err(StoreError::MalformedSeedRecord { line: 2, .. })
        ));
    }

    #[test]
    fn test_read_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("init_data.txt");
        fs::write(&path, "John,Doe,5551234,Main St\n\nJane,Roe,5559999,\n").unwrap();

        let records = read_seed_file(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].first_name, "Jane");
        assert_eq!(records[1].address, None);
    }

    #[test]
    fn test_missing_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_seed_file(dir.path().join("nope.txt")),
            Err(StoreError::SeedFile(_))
        ));
    }
}
