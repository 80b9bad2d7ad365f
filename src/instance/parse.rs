//! Text instance format.
//!
//! ```text
//! n
//! t_1 ... t_k      (n lines, one column per worker)
//! i j              (1-based precedence pairs)
//! -1 -1            (terminator; EOF also ends the list)
//! ```
//!
//! `inf` (any case) marks an infeasible worker/task pair; `NaN` is rejected.
//! Blank lines and `#` comments are skipped in the precedence section.

use std::str::FromStr;

use super::model::Instance;
use crate::error::AlwabpError;

/// Parses an instance from its text representation.
///
/// # Examples
///
/// ```
/// use u_alwabp::instance::parse_instance;
///
/// let text = "3\n2 5\n3 Inf\n4 1\n1 2\n2 3\n-1 -1\n";
/// let instance = parse_instance(text).unwrap();
/// assert_eq!(instance.task_count(), 3);
/// assert_eq!(instance.worker_count(), 2);
/// assert!(!instance.is_capable(1, 1));
/// ```
pub fn parse_instance(text: &str) -> Result<Instance, AlwabpError> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    let (line_no, header) = lines
        .by_ref()
        .find(|(_, l)| !l.is_empty())
        .ok_or_else(|| parse_err(1, "missing task count"))?;
    let task_count: usize = header
        .parse()
        .map_err(|_| parse_err(line_no, format!("invalid task count '{header}'")))?;

    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(task_count);
    let mut last_line = line_no;
    while rows.len() < task_count {
        let (line_no, line) = lines
            .next()
            .ok_or_else(|| parse_err(last_line + 1, "unexpected end of time table"))?;
        last_line = line_no;
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|tok| {
                match tok.parse::<f64>() {
                    Ok(t) if t.is_nan() => {
                        Err(parse_err(line_no, format!("time '{tok}' is not a number")))
                    }
                    Ok(t) => Ok(t),
                    Err(_) => Err(parse_err(line_no, format!("invalid time '{tok}'"))),
                }
            })
            .collect::<Result<Vec<f64>, _>>()?;
        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(parse_err(
                    line_no,
                    format!("expected {} times, found {}", first.len(), row.len()),
                ));
            }
        }
        rows.push(row);
    }

    let mut precedences = Vec::new();
    for (line_no, line) in lines {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let pair = line
            .split_whitespace()
            .map(|tok| tok.parse::<i64>())
            .collect::<Result<Vec<i64>, _>>()
            .ok()
            .filter(|p| p.len() == 2)
            .ok_or_else(|| parse_err(line_no, format!("invalid precedence '{line}'")))?;
        match (pair[0], pair[1]) {
            (-1, -1) => break,
            (i, j) if i >= 1 && j >= 1 => precedences.push((i as usize - 1, j as usize - 1)),
            _ => {
                return Err(parse_err(
                    line_no,
                    format!("precedence indices must be positive in '{line}'"),
                ))
            }
        }
    }

    Instance::from_task_rows(rows, precedences)
}

fn parse_err(line: usize, message: impl Into<String>) -> AlwabpError {
    AlwabpError::Parse {
        line,
        message: message.into(),
    }
}

impl FromStr for Instance {
    type Err = AlwabpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_instance(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_terminator_and_comments() {
        let text = "\n4\n1 2\n3 inf\n2 2\n5 1\n# chain\n1 2\n\n2 3\n1 4\n-1 -1\n9 9\n";
        let inst: Instance = text.parse().unwrap();
        assert_eq!(inst.task_count(), 4);
        assert_eq!(inst.worker_count(), 2);
        assert_eq!(inst.precedences(), &[(0, 1), (1, 2), (0, 3)]);
        assert!(!inst.is_capable(1, 1));
        assert_eq!(inst.time(0, 3), 5.0);
    }

    #[test]
    fn test_parse_without_terminator() {
        let inst = parse_instance("2\n1 1\n1 1\n1 2").unwrap();
        assert_eq!(inst.precedences(), &[(0, 1)]);
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = parse_instance("2\n1 1\n1 x\n").unwrap_err();
        assert!(matches!(err, AlwabpError::Parse { line: 3, .. }));

        let err = parse_instance("2\n1 1\n1 1 1\n").unwrap_err();
        assert!(matches!(err, AlwabpError::Parse { line: 3, .. }));

        let err = parse_instance("2\n1 1\n").unwrap_err();
        assert!(matches!(err, AlwabpError::Parse { .. }));

        let err = parse_instance("2\n1 1\n1 1\n1 2 3\n").unwrap_err();
        assert!(matches!(err, AlwabpError::Parse { line: 4, .. }));

        let err = parse_instance("2\n1 1\n1 1\n0 2\n").unwrap_err();
        assert!(matches!(err, AlwabpError::Parse { line: 4, .. }));

        let err = parse_instance("2\n1 NaN\n1 1\n").unwrap_err();
        assert!(matches!(
            err,
            AlwabpError::Parse { line: 2, ref message } if message.contains("not a number")
        ));
    }

    #[test]
    fn test_parse_surfaces_structural_errors() {
        let err = parse_instance("2\n1 1\n1 1\n1 2\n2 1\n-1 -1\n").unwrap_err();
        assert!(matches!(err, AlwabpError::CyclicPrecedence { .. }));
    }
}
