//! Day 7: Camel Cards

use crate::utils::parse::parse_lines;
use anyhow::{Context, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["2023", "sorting"])]
pub struct Solver;

const CARD_ORDER: &[u8; 13] = b"23456789TJQKA";
const HAND_SIZE: usize = 5;

/// Ordered weakest first so the derived `Ord` ranks hands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

impl HandType {
    /// Classify from group sizes sorted largest first
    fn from_groups(groups: &[usize]) -> HandType {
        match groups {
            [5, ..] => HandType::FiveOfAKind,
            [4, ..] => HandType::FourOfAKind,
            [3, 2, ..] => HandType::FullHouse,
            [3, ..] => HandType::ThreeOfAKind,
            [2, 2, ..] => HandType::TwoPair,
            [2, ..] => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }
}

/// What `J` means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JokerRule {
    /// Ordinary card between `T` and `Q`
    Jack,
    /// Weakest card, counts as whatever makes the best hand
    Joker,
}

impl JokerRule {
    fn strength(self, card: u8) -> u8 {
        match (self, card) {
            (JokerRule::Joker, b'J') => 0,
            // validated at parse time
            _ => CARD_ORDER.iter().position(|&c| c == card).unwrap_or(0) as u8 + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub cards: [u8; HAND_SIZE],
    pub bid: u64,
}

impl Hand {
    pub fn hand_type(&self, rule: JokerRule) -> HandType {
        let jokers = match rule {
            JokerRule::Jack => 0,
            JokerRule::Joker => self.cards.iter().filter(|&&c| c == b'J').count(),
        };
        let mut groups: Vec<usize> = self
            .cards
            .iter()
            .filter(|&&c| rule == JokerRule::Jack || c != b'J')
            .counts()
            .into_values()
            .sorted_unstable_by(|a, b| b.cmp(a))
            .collect();

        // jokers always join the largest group
        match groups.first_mut() {
            Some(largest) => *largest += jokers,
            None => groups.push(jokers),
        }
        HandType::from_groups(&groups)
    }

    /// Sort key: type first, then card strengths left to right
    pub fn strength(&self, rule: JokerRule) -> (HandType, [u8; HAND_SIZE]) {
        (self.hand_type(rule), self.cards.map(|c| rule.strength(c)))
    }
}

fn parse_hand(line: &str) -> anyhow::Result<Hand> {
    let (cards, bid) = line
        .split_whitespace()
        .collect_tuple()
        .context("expected 'HAND BID'")?;
    let Ok(cards) = <[u8; HAND_SIZE]>::try_from(cards.as_bytes()) else {
        bail!("hand {:?} does not have {} cards", cards, HAND_SIZE);
    };
    if let Some(&bad) = cards.iter().find(|&&c| !CARD_ORDER.contains(&c)) {
        bail!("unknown card {:?}", bad as char);
    }
    let bid = bid
        .parse()
        .with_context(|| format!("invalid bid {:?}", bid))?;
    Ok(Hand { cards, bid })
}

/// Sum of bid times rank, weakest hand ranked 1
///
/// Hands of equal strength keep their input order.
pub fn total_winnings(hands: &[Hand], rule: JokerRule) -> u64 {
    hands
        .iter()
        .sorted_by_cached_key(|hand| hand.strength(rule))
        .zip(1u64..)
        .map(|(hand, rank)| hand.bid * rank)
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let hands = parse_lines(input, parse_hand)?;
        if hands.is_empty() {
            return Err(ParseError::MissingData("no hands".into()));
        }
        Ok(hands)
    }
}

impl PartSolver<1> for Solver {
    const LABEL: &'static str = "Total winnings";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, JokerRule::Jack).to_string())
    }
}

impl PartSolver<2> for Solver {
    const LABEL: &'static str = "Total winnings";

    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, JokerRule::Joker).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::Solver as _;
    use proptest::prelude::*;

    const EXAMPLE: &str = "\
32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483
";

    fn hand(cards: &str) -> Hand {
        parse_hand(&format!("{} 1", cards)).unwrap()
    }

    #[test]
    fn test_part1_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 1).unwrap(), "6440");
    }

    #[test]
    fn test_part2_example() {
        let mut shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(Solver::solve_part(&mut shared, 2).unwrap(), "5905");
    }

    #[test]
    fn test_hand_types() {
        let cases = [
            ("AAAAA", HandType::FiveOfAKind),
            ("AA8AA", HandType::FourOfAKind),
            ("23332", HandType::FullHouse),
            ("TTT98", HandType::ThreeOfAKind),
            ("23432", HandType::TwoPair),
            ("A23A4", HandType::OnePair),
            ("23456", HandType::HighCard),
        ];
        for (cards, expected) in cases {
            assert_eq!(hand(cards).hand_type(JokerRule::Jack), expected, "{}", cards);
        }
    }

    #[test]
    fn test_jokers_upgrade() {
        assert_eq!(hand("QJJQ2").hand_type(JokerRule::Joker), HandType::FourOfAKind);
        assert_eq!(hand("JJJJJ").hand_type(JokerRule::Joker), HandType::FiveOfAKind);
        assert_eq!(hand("2345J").hand_type(JokerRule::Joker), HandType::OnePair);
        assert_eq!(hand("2233J").hand_type(JokerRule::Joker), HandType::FullHouse);
        assert_eq!(hand("QJJQ2").hand_type(JokerRule::Jack), HandType::TwoPair);
    }

    #[test]
    fn test_card_by_card_tiebreak() {
        assert!(hand("33332").strength(JokerRule::Jack) > hand("2AAAA").strength(JokerRule::Jack));
        assert!(hand("77888").strength(JokerRule::Jack) > hand("77788").strength(JokerRule::Jack));
        // a joker is weaker than a two
        assert!(hand("JKKK2").strength(JokerRule::Joker) < hand("QQQQ2").strength(JokerRule::Joker));
        assert!(hand("JKKK2").strength(JokerRule::Jack) < hand("QQQQ2").strength(JokerRule::Jack));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Solver::parse("32T3 765\n").is_err());
        assert!(Solver::parse("32T3K\n").is_err());
        assert!(Solver::parse("32T3X 765\n").is_err());
        assert!(Solver::parse("32T3K abc\n").is_err());
        assert!(matches!(Solver::parse(""), Err(ParseError::MissingData(_))));
    }

    fn any_hand() -> impl Strategy<Value = Hand> {
        (prop::array::uniform5(prop::sample::select(CARD_ORDER.to_vec())), 1u64..1000)
            .prop_map(|(cards, bid)| Hand { cards, bid })
    }

    proptest! {
        #[test]
        fn prop_joker_never_downgrades(h in any_hand()) {
            prop_assert!(h.hand_type(JokerRule::Joker) >= h.hand_type(JokerRule::Jack));
        }

        #[test]
        fn prop_joker_matches_best_substitution(h in any_hand()) {
            let best = CARD_ORDER
                .iter()
                .filter(|&&c| c != b'J')
                .map(|&c| {
                    let cards = h.cards.map(|x| if x == b'J' { c } else { x });
                    Hand { cards, bid: h.bid }.hand_type(JokerRule::Jack)
                })
                .max()
                .unwrap();
            prop_assert_eq!(h.hand_type(JokerRule::Joker), best);
        }
    }
}
