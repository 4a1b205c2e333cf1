//! CSV pair lists.
//!
//! One row per pair: `i,j,status[,vol_common,vol_i,vol_j]`. The volume
//! fields are present exactly for the overlap classes. The format has no
//! quoting or escaping, so the parser is a straight field splitter.

use crate::IoError;
use clearcut_engine::report::{class_name, PairClass, PairRow};
use std::io::BufRead;

/// Formats one row the way the overlap checker prints it.
pub fn format_row(row: &PairRow) -> String {
    match row.volumes {
        Some((vol_common, vol_i, vol_j)) => format!(
            "{},{},{},{},{},{}",
            row.i,
            row.j,
            class_name(row.class),
            vol_common,
            vol_i,
            vol_j,
        ),
        None => format!("{},{},{}", row.i, row.j, class_name(row.class)),
    }
}

fn parse_row(line: &str, number: usize) -> Result<PairRow, IoError> {
    let bad = |reason: &str| IoError::BadRow {
        line: number,
        reason: reason.to_string(),
    };
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 && fields.len() != 6 {
        return Err(bad("expected 3 or 6 fields"));
    }
    let i: usize = fields[0].parse().map_err(|_| bad("bad first ordinal"))?;
    let j: usize = fields[1].parse().map_err(|_| bad("bad second ordinal"))?;
    let class = PairClass::from_name(fields[2]).ok_or_else(|| bad("unknown status"))?;
    let volumes = match fields.len() {
        6 => {
            let mut parsed = [0.0f64; 3];
            for (slot, field) in parsed.iter_mut().zip(&fields[3..]) {
                *slot = field.parse().map_err(|_| bad("bad volume"))?;
            }
            Some((parsed[0], parsed[1], parsed[2]))
        }
        _ => None,
    };
    if class.is_overlap() != volumes.is_some() {
        return Err(bad("volume fields must accompany exactly the overlap classes"));
    }
    Ok(PairRow {
        i,
        j,
        class,
        volumes,
    })
}

/// Parses a pair list, one row per non-empty line.
pub fn parse_rows(reader: impl BufRead) -> Result<Vec<PairRow>, IoError> {
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        rows.push(parse_row(trimmed, index + 1)?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_trip() {
        let rows = [
            PairRow {
                i: 0,
                j: 3,
                class: PairClass::Touch,
                volumes: None,
            },
            PairRow {
                i: 1,
                j: 2,
                class: PairClass::Overlap,
                volumes: Some((1.5, 125.0, 8.0)),
            },
            PairRow {
                i: 4,
                j: 9,
                class: PairClass::BadOverlap,
                volumes: Some((100.0, 125.0, 101.0)),
            },
        ];
        let text = rows.iter().map(format_row).collect::<Vec<_>>().join("\n");
        let parsed = parse_rows(text.as_bytes()).unwrap();
        assert_eq!(parsed, rows);
    }

    #[test]
    fn malformed_rows_are_rejected() {
        for line in [
            "0,1",                       // too few fields
            "0,1,overlap",               // overlap without volumes
            "0,1,touch,1.0,2.0,3.0",     // touch with volumes
            "0,1,sideways",              // unknown status
            "x,1,touch",                 // bad ordinal
            "0,1,overlap,a,2.0,3.0",     // bad volume
        ] {
            assert!(parse_rows(line.as_bytes()).is_err(), "accepted {line:?}");
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        let parsed = parse_rows("\n0,1,touch\n\n".as_bytes()).unwrap();
        assert_eq!(parsed.len(), 1);
    }
}
