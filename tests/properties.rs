// tests/properties.rs
use proptest::prelude::*;

use showdown_scrape::{Pipeline, RawBlock};

const NAMES: [&str; 3] = ["Ann", "Bo", "Cy"];

#[derive(Clone, Debug)]
struct Line {
    money: u32,
    first: u32,
    second: Option<u32>,
}

fn money_text(v: u32) -> String {
    if v >= 1000 {
        format!("${},{:03}", v / 1000, v % 1000)
    } else {
        format!("${v}")
    }
}

fn wheel_strategy() -> impl Strategy<Value = u32> {
    (1u32..=20).prop_map(|k| k * 5)
}

fn line_strategy() -> impl Strategy<Value = Line> {
    (100u32..=9999, wheel_strategy(), proptest::option::of(wheel_strategy()))
        .prop_map(|(money, first, second)| Line { money, first, second })
}

fn render(lines: &[Line]) -> String {
    lines
        .iter()
        .zip(NAMES)
        .map(|(l, name)| match l.second {
            Some(s) => format!("{} {name} {} + {s}", money_text(l.money), l.first),
            None => format!("{} {name} {}", money_text(l.money), l.first),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

proptest! {
    #[test]
    fn prop_totals_and_busts_follow_the_spins(lines in proptest::collection::vec(line_strategy(), 3)) {
        let r = Pipeline::default().process(&RawBlock::new("P", render(&lines)));
        prop_assert_eq!(r.contestants.len(), 3);
        for (c, l) in r.contestants.iter().zip(&lines) {
            let expected = f64::from(l.first + l.second.unwrap_or(0));
            prop_assert_eq!(c.pre_round_winnings, Some(i64::from(l.money)));
            prop_assert_eq!(c.total, Some(expected));
            prop_assert_eq!(c.bust, expected > 100.0);
        }
    }

    #[test]
    fn prop_winner_is_the_best_non_bust(lines in proptest::collection::vec(line_strategy(), 3)) {
        let r = Pipeline::default().process(&RawBlock::new("P", render(&lines)));
        let totals: Vec<u32> = lines.iter().map(|l| l.first + l.second.unwrap_or(0)).collect();
        let best = totals.iter().copied().filter(|&t| t <= 100).max();
        let leaders: Vec<usize> = (0..3).filter(|&i| Some(totals[i]) == best).collect();

        match leaders.as_slice() {
            [only] => {
                prop_assert_eq!(r.winner_index, Some(*only));
                for (i, c) in r.contestants.iter().enumerate() {
                    prop_assert_eq!(c.advanced, i == *only);
                }
            }
            // all bust, or a tie nobody spun off to break
            _ => prop_assert_eq!(r.winner_index, None),
        }
    }

    #[test]
    fn prop_processing_is_idempotent(lines in proptest::collection::vec(line_strategy(), 3)) {
        let p = Pipeline::default();
        let b = RawBlock::new("P", render(&lines));
        prop_assert_eq!(p.process(&b), p.process(&b));
    }

    #[test]
    fn prop_every_kept_round_has_a_scenario(lines in proptest::collection::vec(line_strategy(), 3)) {
        let r = Pipeline::default().process(&RawBlock::new("P", render(&lines)));
        if r.is_kept() {
            prop_assert!(r.scenario.is_some());
            prop_assert!(r.winner().is_some_and(|w| !w.bust));
        }
    }

    #[test]
    fn prop_quirk_literal_matches_one_hundred(lines in proptest::collection::vec(line_strategy(), 2)) {
        let rest = render(&lines);
        let with_quirk = format!("$1,000 Dee 1.00 {rest}");
        let with_hundred = format!("$1,000 Dee 100 {rest}");
        let p = Pipeline::default();
        let a = p.parse_text("Q", &with_quirk);
        let b = p.parse_text("Q", &with_hundred);
        prop_assert_eq!(a.contestants[0].first_spin(), Some(100.0));
        prop_assert_eq!(&a.contestants, &b.contestants);
        prop_assert_eq!(a.winner_index, b.winner_index);
    }
}
