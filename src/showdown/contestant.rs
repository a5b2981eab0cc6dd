// src/showdown/contestant.rs
use crate::config::consts::*;
use crate::config::SecondSpinRule;
use crate::core::sanitize::trim_name_punct;

use super::model::{BonusSpin, Contestant, SpinOff, SpinSlot};
use super::numeric::{is_currency_marked, is_well_formed_money, parse_number, role, spin_value, TokenRole};
use super::segment::{name_run, Segment};

lazy_regex!(ADVANCE_MARKER = r"(?i)through\s+to\s+the\s+show|goes\s+to\s+(?:the\s+)?showcase");
lazy_regex!(BONUS_PHRASE = r"(?i)bonus(?:\s+spin)?\s+(\d{1,3}(?:\.\d+)?)");
lazy_regex!(BONUS_CASH = r"\$ ?(25,?000|10,?000|5,?000)\b");

/// A contestant plus the per-slice observations the round-level passes need.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedContestant {
    pub contestant: Contestant,
    /// "through to the showcase" style phrase inside this slice.
    pub advance_marker: bool,
    pub malformed_money: bool,
    /// A `+` with no second spin after it.
    pub dangling_marker: bool,
}

/// Turn one slice into a contestant record. Never fails; gaps become `None`.
pub fn parse_contestant(
    tokens: &[String],
    seg: &Segment,
    position: usize,
    rule: SecondSpinRule,
) -> ParsedContestant {
    let money_tok = tokens[seg.money].as_str();
    let pre_round_winnings = parse_number(money_tok).map(|v| v.round() as i64);
    let malformed_money = !is_well_formed_money(money_tok);

    let name_start = seg.money + 1;
    let name_len = name_run(tokens, name_start, seg.end);
    let name_end = name_start + name_len;
    let name = if name_len == 0 {
        s!(UNKNOWN_NAME)
    } else {
        tokens[name_start..name_end]
            .iter()
            .map(|t| trim_name_punct(t))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let action = &tokens[name_end..seg.end];
    let action_text = action.join(" ");
    let has_bonus = action_text.to_lowercase().contains("bonus");
    let has_plus = action.iter().any(|t| t == SECOND_SPIN_MARKER);
    let advance_marker = ADVANCE_MARKER.is_match(&action_text);

    // dollar amounts in the action text (bonus cash) are not spins; any other
    // number is, even when it only looks like money, so the validator sees it
    let numbers: Vec<f64> = (name_end..seg.end)
        .filter(|&i| !is_currency_marked(tokens, i))
        .filter_map(|i| match role(tokens, i) {
            TokenRole::Number(v) => Some(v),
            TokenRole::Money(_) => spin_value(&tokens[i]),
            _ => None,
        })
        .collect();

    let first = numbers.first().copied();
    let take_second = match rule {
        SecondSpinRule::MarkerGated => has_plus,
        SecondSpinRule::Positional => true,
    };
    let second = if take_second { numbers.get(1).copied() } else { None };
    let consumed = usize::from(first.is_some()) + usize::from(second.is_some());

    let total = first.map(|a| a + second.unwrap_or(0.0));
    let bust = matches!((first, second, total), (Some(_), Some(_), Some(t)) if t > BUST_OVER);

    // a restated total is not an extra spin
    let mut extras: Vec<f64> = numbers[consumed..].to_vec();
    if let Some(t) = total {
        extras.retain(|v| (v - t).abs() >= EPS);
    }

    let (spin_off_spins, bonus_spins) = if has_bonus {
        (Vec::new(), bonus_spins(&extras, &action_text))
    } else {
        (extras.iter().map(|&value| SpinOff { value }).collect(), Vec::new())
    };

    if name_len == 0 || first.is_none() {
        logd!("Contestant {position}: name={name:?} first={first:?} in {:?}", tokens[seg.start..seg.end].join(" "));
    }

    ParsedContestant {
        contestant: Contestant {
            name,
            position,
            pre_round_winnings,
            initial_spins: [
                SpinSlot { spin_index: 1, value: first },
                SpinSlot { spin_index: 2, value: second },
            ],
            total,
            bust,
            spin_off_spins,
            bonus_spins,
            advanced: false,
        },
        advance_marker,
        malformed_money,
        dangling_marker: has_plus && second.is_none(),
    }
}

/// Every extra becomes a bonus spin; the cash prize (if stated) attaches to the
/// spin named by the "Bonus Spin N" phrase, else the last one.
fn bonus_spins(extras: &[f64], text: &str) -> Vec<BonusSpin> {
    let cash = BONUS_CASH
        .captures(text)
        .and_then(|c| c[1].replace(',', "").parse::<i64>().ok())
        .filter(|p| BONUS_PRIZES.contains(p));
    let phrase = BONUS_PHRASE.captures(text).and_then(|c| spin_value(&c[1]));

    let mut spins: Vec<BonusSpin> = extras
        .iter()
        .map(|&v| BonusSpin { wheel_value: Some(v), cash_prize: None })
        .collect();

    match (spins.is_empty(), cash) {
        (true, _) => {
            if phrase.is_some() || cash.is_some() {
                spins.push(BonusSpin { wheel_value: phrase, cash_prize: cash });
            }
        }
        (false, Some(prize)) => {
            let at = phrase
                .and_then(|p| {
                    spins
                        .iter()
                        .position(|s| s.wheel_value.is_some_and(|w| (w - p).abs() < EPS))
                })
                .unwrap_or(spins.len() - 1);
            spins[at].cash_prize = Some(prize);
        }
        (false, None) => {}
    }
    spins
}
