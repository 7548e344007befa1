//! Borrowed byte grid over line-oriented input

/// Rows of the input as byte slices, one per line
///
/// Rows may differ in length and may be empty; row `i` is always line `i + 1`.
#[derive(Debug, Clone)]
pub struct Grid<'a> {
    rows: Vec<&'a [u8]>,
}

/// A horizontal run of cells `row, start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

impl<'a> Grid<'a> {
    pub fn new(input: &'a str) -> Self {
        let rows = input
            .lines()
            .map(|line| line.trim_end().as_bytes())
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[&'a [u8]] {
        &self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.rows.get(row)?.get(col).copied()
    }

    /// Iterate every `(row, col, byte)` in reading order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, bytes)| bytes.iter().enumerate().map(move |(col, &b)| (row, col, b)))
    }

    /// Cells in the 8-neighbourhood of `span`, clipped to the grid
    pub fn around(&self, span: Span) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let rows = span.row.saturating_sub(1)..=span.row + 1;
        rows.flat_map(move |row| {
            let cols = span.start.saturating_sub(1)..=span.end;
            cols.filter_map(move |col| {
                let inside = row == span.row && (span.start..span.end).contains(&col);
                if inside {
                    None
                } else {
                    self.get(row, col).map(|b| (row, col, b))
                }
            })
        })
    }

    /// Maximal runs of cells matching `pred`, row by row
    pub fn runs<P>(&self, pred: P) -> Vec<Span>
    where
        P: Fn(u8) -> bool,
    {
        let mut spans = Vec::new();
        for (row, bytes) in self.rows.iter().enumerate() {
            let mut col = 0;
            while col < bytes.len() {
                if pred(bytes[col]) {
                    let start = col;
                    while col < bytes.len() && pred(bytes[col]) {
                        col += 1;
                    }
                    spans.push(Span { row, start, end: col });
                } else {
                    col += 1;
                }
            }
        }
        spans
    }

    /// The bytes covered by `span`
    pub fn slice(&self, span: Span) -> &'a [u8] {
        &self.rows[span.row][span.start..span.end]
    }
}
