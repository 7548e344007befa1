//! Day 4: Scratchcards

use crate::utils::math::{checked_sum, overflow};
use crate::utils::parse::{numbers, parse_lines};
use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["2023", "parsing"])]
pub struct Solver;

/// `count` fields of `stride` bytes starting at byte `start` of the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub start: usize,
    pub count: usize,
    pub stride: usize,
}

impl ColumnSpan {
    fn fields<'a>(&self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let Self { start, count, stride } = *self;
        (0..count).map(move |i| {
            let from = (start + i * stride).min(line.len());
            let to = (from + stride).min(line.len());
            line.get(from..to).unwrap_or_default().trim()
        })
    }
}

/// How the numbers are laid out on each card line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardLayout {
    /// `Card N: w w w | h h h`, any amount of whitespace
    #[default]
    Delimited,
    /// Fixed-width columns measured from the start of the line
    Columns { winning: ColumnSpan, held: ColumnSpan },
}

impl CardLayout {
    /// Column layout of the real puzzle input: 10 winning numbers, 25 held
    pub const PUZZLE_COLUMNS: CardLayout = CardLayout::Columns {
        winning: ColumnSpan { start: 10, count: 10, stride: 3 },
        held: ColumnSpan { start: 42, count: 25, stride: 3 },
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u32,
    pub winning: Vec<u32>,
    pub held: Vec<u32>,
}

impl Card {
    /// Winning numbers that also appear among the held numbers
    pub fn matches(&self) -> usize {
        let held: HashSet<_> = self.held.iter().collect();
        self.winning.iter().filter(|n| held.contains(n)).count()
    }

    /// `2^(matches - 1)`, zero without matches; `None` past 64 bits
    pub fn points(&self) -> Option<u64> {
        match self.matches() {
            0 => Some(0),
            m => u32::try_from(m - 1).ok().and_then(|shift| 1u64.checked_shl(shift)),
        }
    }
}

fn parse_card(line: &str, layout: &CardLayout) -> anyhow::Result<Card> {
    let (head, body) = line.split_once(':').context("missing ':'")?;
    let id = head
        .strip_prefix("Card")
        .context("missing 'Card' prefix")?
        .trim()
        .parse()
        .with_context(|| format!("invalid card id in {:?}", head))?;

    let (winning, held) = match layout {
        CardLayout::Delimited => {
            let (winning, held) = body.split_once('|').context("missing '|'")?;
            (numbers(winning)?, numbers(held)?)
        }
        CardLayout::Columns { winning, held } => (
            column_numbers(line, winning).context("winning numbers")?,
            column_numbers(line, held).context("held numbers")?,
        ),
    };
    Ok(Card { id, winning, held })
}

fn column_numbers(line: &str, span: &ColumnSpan) -> anyhow::Result<Vec<u32>> {
    span.fields(line)
        .map(|field| {
            field
                .parse()
                .map_err(|_| anyhow!("invalid number field {:?}", field))
        })
        .collect()
}

pub fn parse_cards(input: &str, layout: &CardLayout) -> Result<Vec<Card>, ParseError> {
    let cards = parse_lines(input, |line| parse_card(line, layout))?;
    if cards.is_empty() {
        return Err(ParseError::MissingData("no scratchcards".into()));
    }
    Ok(cards)
}

/// Total cards held once every won copy has been scratched
///
/// Card `i` with `m` matches adds its copy count to cards `i+1..=i+m`,
/// clamped to the end of the table.
pub fn total_cards(cards: &[Card]) -> Option<u64> {
    let mut copies = vec![1u64; cards.len()];
    for (i, card) in cards.iter().enumerate() {
        let end = (i + 1 + card.matches()).min(cards.len());
        let held = copies[i];
        for count in &mut copies[i + 1..end] {
            *count = count.checked_add(held)?;
        }
    }
    checked_sum(copies)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Card>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_cards(input, &CardLayout::default())
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Total points";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .map(Card::points)
            .collect::<Option<Vec<_>>>()
            .and_then(checked_sum)
            .map(|total| total.to_string())
            .ok_or_else(|| overflow("total points"))
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Total scratchcards";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total_cards(shared)
            .map(|total| total.to_string())
            .ok_or_else(|| overflow("card count"))
    }
}
