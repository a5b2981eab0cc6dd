// src/showdown/validate.rs
//! Second pass over a finished round. Reads only; reports `val_*` codes.

use crate::config::consts::{BUST_OVER, EPS};

use super::model::{Contestant, Round};
use super::numeric::is_wheel_value;

fn check_contestant(n: usize, c: &Contestant, out: &mut Vec<String>) {
    let present: Vec<f64> = c.initial_spins.iter().filter_map(|s| s.value).collect();
    for &v in &present {
        if !is_wheel_value(v) {
            out.push(format!("val_spin_out_of_range_c{n}_v{v:?}"));
        }
    }
    for s in &c.spin_off_spins {
        if !is_wheel_value(s.value) {
            out.push(format!("val_spin_off_out_of_range_c{n}_v{:?}", s.value));
        }
    }
    for v in c.bonus_spins.iter().filter_map(|b| b.wheel_value) {
        if !is_wheel_value(v) {
            out.push(format!("val_bonus_spin_out_of_range_c{n}_v{v:?}"));
        }
    }

    let recomputed = c.initial_total();
    if let (Some(total), Some(r)) = (c.total, recomputed) {
        if (total - r).abs() > EPS {
            out.push(format!("val_total_mismatch_c{n}_total{total:?}_recomputed{r:?}"));
        }
    }

    let expect_bust = present.len() == 2 && recomputed.is_some_and(|r| r > BUST_OVER);
    if c.bust != expect_bust {
        out.push(format!("val_bust_flag_mismatch_c{n}"));
    }
}

fn check_winner(round: &Round, out: &mut Vec<String>) {
    let Some(w) = round.winner_index else {
        out.push(s!("val_no_winner"));
        return;
    };
    let Some(winner) = round.contestants.get(w) else {
        out.push(s!("val_winner_index_out_of_range"));
        return;
    };
    let Some(tw) = winner.total else {
        out.push(s!("val_winner_missing_total"));
        return;
    };
    if tw > BUST_OVER || winner.bust {
        out.push(s!("val_winner_bust_total"));
    }
    let beaten = round
        .contestants
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != w)
        .filter_map(|(_, c)| c.contending_total())
        .any(|t| t > tw + EPS);
    if beaten {
        out.push(s!("val_winner_not_highest_non_bust"));
    }
}

fn check_flags(round: &Round, out: &mut Vec<String>) {
    let adv: Vec<usize> = round
        .contestants
        .iter()
        .enumerate()
        .filter(|(_, c)| c.advanced)
        .map(|(i, _)| i)
        .collect();
    match (adv.as_slice(), round.winner_index) {
        ([_, _, ..], _) => out.push(s!("val_multiple_advanced_flags")),
        ([a], Some(w)) if *a != w => out.push(s!("val_advanced_not_winner")),
        ([], Some(w)) if w < round.contestants.len() => out.push(s!("val_advanced_not_winner")),
        _ => {}
    }
}

/// All violations found in `round`, in a stable order. Empty when clean.
pub fn validate(round: &Round) -> Vec<String> {
    let mut out = Vec::new();
    if round.contestants.len() < 2 {
        out.push(s!("val_too_few_contestants"));
    }
    for (i, c) in round.contestants.iter().enumerate() {
        check_contestant(i + 1, c, &mut out);
    }
    check_winner(round, &mut out);
    check_flags(round, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showdown::model::{BonusSpin, SpinOff};
    use crate::Pipeline;

    fn clean() -> Round {
        Pipeline::default().parse_text("", "$1,000 Ann 35 + 40 $800 Bo 55 + 10 $900 Cy 60 + 25")
    }

    #[test]
    fn clean_round_has_no_violations() {
        assert_eq!(validate(&clean()), Vec::<String>::new());
    }

    #[test]
    fn tampered_total_and_bust() {
        let mut r = clean();
        r.contestants[0].total = Some(80.0);
        r.contestants[1].bust = true;
        let v = validate(&r);
        assert!(v.contains(&s!("val_total_mismatch_c1_total80.0_recomputed75.0")), "{v:?}");
        assert!(v.contains(&s!("val_bust_flag_mismatch_c2")), "{v:?}");
    }

    #[test]
    fn off_grid_spin() {
        let r = Pipeline::default().parse_text("", "$1,000 Ann 37 + 40 $800 Bo 55 + 20");
        let v = validate(&r);
        assert!(v.contains(&s!("val_spin_out_of_range_c1_v37.0")), "{v:?}");
    }

    #[test]
    fn wrong_winner() {
        let mut r = clean();
        r.contestants[2].advanced = false;
        r.contestants[0].advanced = true;
        r.winner_index = Some(0);
        assert_eq!(validate(&r), vec![s!("val_winner_not_highest_non_bust")]);

        r.winner_index = Some(9);
        assert!(validate(&r).contains(&s!("val_winner_index_out_of_range")));

        r.winner_index = None;
        assert!(validate(&r).contains(&s!("val_no_winner")));
    }

    #[test]
    fn flag_disagreements() {
        let mut r = clean();
        r.contestants[0].advanced = true;
        assert!(validate(&r).contains(&s!("val_multiple_advanced_flags")));

        let mut r = clean();
        r.contestants[2].advanced = false;
        r.contestants[1].advanced = true;
        assert!(validate(&r).contains(&s!("val_advanced_not_winner")));
    }

    #[test]
    fn marked_winner_who_busted() {
        let r = Pipeline::default().parse_text(
            "",
            "$1,000 Ann 35 + 40 $800 Bo 60 + 55 through to the showcase $900 Cy 60 + 25",
        );
        assert_eq!(r.winner_index, Some(1));
        assert_eq!(validate(&r), vec![s!("val_winner_bust_total")]);
    }

    #[test]
    fn winner_without_total() {
        let mut r = clean();
        r.contestants[2].total = None;
        assert_eq!(validate(&r), vec![s!("val_winner_missing_total")]);
    }

    #[test]
    fn off_grid_extras() {
        let mut r = clean();
        r.contestants[0].spin_off_spins.push(SpinOff { value: 37.0 });
        r.contestants[1].bonus_spins.push(BonusSpin { wheel_value: Some(120.0), cash_prize: None });
        r.contestants[1].bonus_spins.push(BonusSpin { wheel_value: None, cash_prize: Some(5_000) });
        assert_eq!(
            validate(&r),
            vec![
                s!("val_spin_off_out_of_range_c1_v37.0"),
                s!("val_bonus_spin_out_of_range_c2_v120.0"),
            ]
        );
    }

    #[test]
    fn single_contestant() {
        let r = Pipeline::default().parse_text("", "$1,000 Ann 35 + 40 through to the showcase");
        let v = validate(&r);
        assert!(v.contains(&s!("val_too_few_contestants")));
    }
}
