//! Input and target example sets.
//!
//! Simple set (targets use `NUM_OUTPUT_UNITS` instead):
//!
//! ```text
//! NUM_INPUT_UNITS:2
//! NUM_MEMBERS:4
//!
//! 0,0
//! 0,1
//! 1,0
//! 1,1
//! ```
//!
//! A super set lists one single-example file per member instead of rows:
//!
//! ```text
//! NUM_MEMBERS:2
//!
//! members/a.txt
//! members/b.txt
//! ```
//!
//! and each single-example file is `NUM_INPUT_UNITS:n` followed by `n`
//! comma-separated values, which may span lines. Relative member paths
//! resolve against the super file's directory. In a simple set each member
//! sits on its own line.
use std::path::Path;

use tracing::debug;

use crate::error::{read_text, NetworkError, Result};
use crate::files::scanner::{base_dir, resolve, TokenReader};

const INPUT_UNITS: &str = "NUM_INPUT_UNITS";
const OUTPUT_UNITS: &str = "NUM_OUTPUT_UNITS";
const MEMBERS: &str = "NUM_MEMBERS";

pub fn parse_input_set(text: &str, num_input_units: usize) -> Result<Vec<Vec<f64>>> {
    parse_set(text, "input set file", INPUT_UNITS, "input", num_input_units)
}

pub fn parse_target_set(text: &str, num_output_units: usize) -> Result<Vec<Vec<f64>>> {
    parse_set(text, "target set file", OUTPUT_UNITS, "output", num_output_units)
}

/// Parses a single-example file.
pub fn parse_input_member(text: &str, num_input_units: usize) -> Result<Vec<f64>> {
    let mut reader = TokenReader::new("input member file", text);
    read_declared_units(&mut reader, INPUT_UNITS, "input", num_input_units)?;
    let member = reader.values(num_input_units)?;
    reader.finish()?;
    Ok(member)
}

/// Reads an input set in either the simple or the super layout, chosen by the
/// file's first label.
pub fn read_input_set(path: &Path, num_input_units: usize) -> Result<Vec<Vec<f64>>> {
    let text = read_text("Input set", path)?;
    let first_label = TokenReader::new("input set file", &text).peek();
    let set = if first_label == Some(MEMBERS) {
        debug!(path = %path.display(), "reading super input set");
        read_super_set(&text, &base_dir(path), num_input_units)?
    } else {
        parse_input_set(&text, num_input_units)?
    };
    debug!(path = %path.display(), members = set.len(), "read input set");
    Ok(set)
}

pub fn read_target_set(path: &Path, num_output_units: usize) -> Result<Vec<Vec<f64>>> {
    let text = read_text("Target set", path)?;
    let set = parse_target_set(&text, num_output_units)?;
    debug!(path = %path.display(), members = set.len(), "read target set");
    Ok(set)
}

pub fn read_input_member(path: &Path, num_input_units: usize) -> Result<Vec<f64>> {
    let text = read_text("Input member", path)?;
    parse_input_member(&text, num_input_units)
}

fn read_super_set(text: &str, base: &Path, num_input_units: usize) -> Result<Vec<Vec<f64>>> {
    let mut reader = TokenReader::new("super input set file", text);
    let num_members: usize = reader.labeled(MEMBERS)?;
    let paths = (0..num_members)
        .map(|_| reader.line().map(|p| resolve(base, p)))
        .collect::<Result<Vec<_>>>()?;
    reader.finish()?;
    paths
        .iter()
        .map(|member| read_input_member(member, num_input_units))
        .collect()
}

fn parse_set(
    text: &str,
    source_name: &str,
    units_label: &str,
    kind: &str,
    expected_units: usize,
) -> Result<Vec<Vec<f64>>> {
    let mut reader = TokenReader::new(source_name, text);
    read_declared_units(&mut reader, units_label, kind, expected_units)?;
    let num_members: usize = reader.labeled(MEMBERS)?;
    let set = (0..num_members)
        .map(|_| reader.row(expected_units))
        .collect::<Result<Vec<_>>>()?;
    reader.finish()?;
    Ok(set)
}

fn read_declared_units(
    reader: &mut TokenReader<'_>,
    label: &str,
    kind: &str,
    expected: usize,
) -> Result<()> {
    let declared: usize = reader.labeled(label)?;
    if declared != expected {
        return Err(NetworkError::Validation(format!(
            "the provided number of {} units ({}) does not match the network's number of {} units ({})",
            kind, declared, kind, expected
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_input_set() {
        let text = "NUM_INPUT_UNITS:2\nNUM_MEMBERS:3\n\n0,0\n0,1\n1,-0.5\n";
        let set = parse_input_set(text, 2).unwrap();
        assert_eq!(set, vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, -0.5]]);
    }

    #[test]
    fn unit_count_mismatch_is_validation() {
        let text = "NUM_OUTPUT_UNITS:3\nNUM_MEMBERS:1\n\n1,2,3\n";
        let err = parse_target_set(text, 1).unwrap_err();
        assert!(matches!(err, NetworkError::Validation(_)));
        let msg = err.to_string();
        assert!(msg.contains("(3)") && msg.contains("(1)"), "{msg}");
    }

    #[test]
    fn short_set_is_malformed() {
        let text = "NUM_INPUT_UNITS:2\nNUM_MEMBERS:2\n\n0,0\n1\n";
        let err = parse_input_set(text, 2).unwrap_err();
        assert!(matches!(err, NetworkError::Malformed { .. }));
    }

    #[test]
    fn extra_members_or_values_are_malformed() {
        let text = "NUM_INPUT_UNITS:2\nNUM_MEMBERS:1\n\n0,1\n1,1\n";
        let err = parse_input_set(text, 2).unwrap_err();
        assert!(err.to_string().contains("trailing data"), "{err}");

        let text = "NUM_INPUT_UNITS:2\nNUM_MEMBERS:2\n\n0,1,1\n1\n";
        assert!(matches!(parse_input_set(text, 2), Err(NetworkError::Malformed { .. })));

        let err = parse_input_member("NUM_INPUT_UNITS:1\n0.5\n0.7\n", 1).unwrap_err();
        assert!(matches!(err, NetworkError::Malformed { .. }));
    }

    #[test]
    fn member_values_may_span_lines() {
        let member = parse_input_member("NUM_INPUT_UNITS:3\n0.1,0.2\n0.3\n", 3).unwrap();
        assert_eq!(member, vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn target_label_is_required() {
        let text = "NUM_INPUT_UNITS:1\nNUM_MEMBERS:1\n\n1\n";
        assert!(matches!(parse_target_set(text, 1), Err(NetworkError::Malformed { .. })));
    }
}
