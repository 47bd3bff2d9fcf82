use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use colfmt::{DialectConfig, TypedValue};
use serde::Deserialize;

use super::config::Effective;
use super::error::DumpError;

/// One input line: a whole row, or a bare value read as a one-column row.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Line {
    Row(Vec<TypedValue>),
    Value(TypedValue),
}

impl Line {
    fn into_row(self) -> Vec<TypedValue> {
        match self {
            Line::Row(row) => row,
            Line::Value(v) => vec![v],
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
}

// ═══════════════════════════════════════════════════════════════
//  Main dispatch
// ═══════════════════════════════════════════════════════════════

pub fn run(args: &Effective) -> Result<Summary, DumpError> {
    tracing::info!(dialect = %args.dialect, input = args.input.as_deref().unwrap_or("-"), "dump started");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = match &args.input {
        Some(path) => dump(args, BufReader::new(File::open(path)?), &mut out)?,
        None => dump(args, std::io::stdin().lock(), &mut out)?,
    };
    out.flush()?;

    tracing::info!(rows = summary.written, skipped = summary.skipped, "dump finished");
    Ok(summary)
}

/// Format every row of `input` into `out`, one line per row.
pub fn dump<R: BufRead, W: Write>(args: &Effective, input: R, out: &mut W) -> Result<Summary, DumpError> {
    let config = args.dialect.config();
    let mut summary = Summary::default();

    for (i, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match format_line(config, &args.separator, i + 1, &line) {
            Ok(text) => {
                writeln!(out, "{text}")?;
                summary.written += 1;
            }
            Err(e) if args.skip_errors => {
                tracing::warn!(error = %e, "row skipped");
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(summary)
}

fn format_line(config: &DialectConfig, separator: &str, line_no: usize, line: &str) -> Result<String, DumpError> {
    let row = serde_json::from_str::<Line>(line)
        .map_err(|source| DumpError::Json { line: line_no, source })?
        .into_row();
    let columns = config
        .format_row(&row)
        .map_err(|source| DumpError::Format { line: line_no, source })?;
    Ok(columns.join(separator))
}

#[cfg(test)]
mod tests {
    use colfmt::Dialect;

    use super::*;

    fn eff(dialect: Dialect, skip_errors: bool) -> Effective {
        Effective { dialect, input: None, separator: "|".into(), skip_errors }
    }

    fn run_on(args: &Effective, input: &str) -> Result<(String, Summary), DumpError> {
        let mut out = Vec::new();
        let summary = dump(args, input.as_bytes(), &mut out)?;
        Ok((String::from_utf8(out).unwrap(), summary))
    }

    const ROW: &str = r#"[{"type":{"code":"INT64"},"value":"1"},{"type":{"code":"STRING"},"value":"a"}]"#;
    const SINGLE: &str = r#"{"type":{"code":"ARRAY","arrayElementType":{"code":"BOOL"}},"value":[true,null]}"#;
    const BAD: &str = r#"[{"type":{"code":"BOOL"},"value":"yes"}]"#;

    #[test]
    fn rows_and_single_values() {
        let input = format!("{ROW}\n\n{SINGLE}\n");
        let (text, summary) = run_on(&eff(Dialect::Literal, false), &input).unwrap();
        assert_eq!(text, "1|\"a\"\n[true, NULL]\n");
        assert_eq!(summary, Summary { written: 2, skipped: 0 });
    }

    #[test]
    fn dialect_is_applied() {
        let (text, _) = run_on(&eff(Dialect::Simple, false), SINGLE).unwrap();
        assert_eq!(text, "[true, <null>]\n");
    }

    #[test]
    fn first_failure_aborts() {
        let input = format!("{ROW}\n{BAD}\n{ROW}\n");
        let err = run_on(&eff(Dialect::Literal, false), &input).unwrap_err();
        assert!(matches!(err, DumpError::Format { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn skip_errors_keeps_going() {
        let input = format!("{ROW}\nnot json\n{BAD}\n{ROW}\n");
        let (text, summary) = run_on(&eff(Dialect::Compat, true), &input).unwrap();
        assert_eq!(text, "1|a\n1|a\n");
        assert_eq!(summary, Summary { written: 2, skipped: 2 });
    }
}
