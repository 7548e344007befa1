//! Line-oriented parsing helpers

use anyhow::Context;
use aoc_solver::ParseError;
use std::str::FromStr;

/// Parse every non-blank line with `parse_line`, tagging failures with their line number
pub fn parse_lines<'a, T, F>(input: &'a str, mut parse_line: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx, line.trim_end()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| parse_line(line).map_err(|e| ParseError::line(idx + 1, format!("{:#}", e))))
        .collect()
}

/// Parse whitespace separated numbers
pub fn numbers<T>(text: &str) -> anyhow::Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.split_whitespace()
        .map(|token| {
            token
                .parse()
                .with_context(|| format!("invalid number {:?}", token))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_skips_blank_and_reports_line() {
        let parsed = parse_lines("1\n\n2\n", |l| Ok(l.parse::<u8>()?)).unwrap();
        assert_eq!(parsed, vec![1, 2]);

        let err = parse_lines("1\n\nx\n", |l| Ok(l.parse::<u8>()?)).unwrap_err();
        assert!(matches!(err, ParseError::Line { line: 3, .. }));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(numbers::<u32>(" 41 48  83 ").unwrap(), vec![41, 48, 83]);
        assert!(numbers::<u32>("41 x").is_err());
        assert!(numbers::<u32>("").unwrap().is_empty());
    }
}
