use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::drill_engine::{
    digits::to_digit_string,
    models::{Base, Operator, Round},
};

/// Which base subscripts to print after the last operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum SubscriptMode {
    None,
    /// Every base except ten.
    #[default]
    Some,
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub subscripts: SubscriptMode,
    /// Print partial products when a multiplication answer is missed.
    pub show_work: bool,
}

/// Subscript naming the base, e.g. `₈` or `ₕₑₓ`.
pub fn subscript_coda(base: Base, mode: SubscriptMode) -> &'static str {
    match (mode, base) {
        (SubscriptMode::None, _)              => "",
        (_, Base::Binary)                     => "\u{2082}",
        (_, Base::Quaternary)                 => "\u{2084}",
        (_, Base::Octal)                      => "\u{2088}",
        (SubscriptMode::All, Base::Decimal)   => "\u{209C}\u{2091}\u{2099}",
        (SubscriptMode::Some, Base::Decimal)  => "",
        (_, Base::Hex)                        => "\u{2095}\u{2091}\u{2093}",
    }
}

/// Column of the last character of every printed number.
///
/// Operand lines are padded so that a number of `2 * length + 2` digits
/// still leaves room for the operator and three spaces before it.
fn right_edge(round: &Round) -> usize {
    2 * round.length + 7
}

fn rule(len: usize) -> String {
    "\u{2550}".repeat(len)
}

/// The problem as shown before the user answers.
///
/// The operator symbol floats with its operand, three spaces before the
/// first digit.
pub fn problem_lines(round: &Round, opts: &DisplayOptions) -> Vec<String> {
    let edge = right_edge(round);
    let last = round.operands.len().saturating_sub(1);
    let coda = subscript_coda(round.base, opts.subscripts);
    round
        .operands
        .iter()
        .enumerate()
        .map(|(i, op)| {
            let marker = if i == 0 { ' ' } else { round.operator.symbol() };
            let digits = to_digit_string(op.value, round.base);
            let line = format!("{:>edge$}", format!("{marker}   {digits}"));
            if i == last && !coda.is_empty() {
                format!("{line}  {coda}")
            } else {
                line
            }
        })
        .collect()
}

/// Whether partial products are worth showing for this round.
fn wants_work(round: &Round, opts: &DisplayOptions) -> bool {
    opts.show_work
        && round.operator == Operator::Multiply
        && round.operands.len() == 2
        && round.length != 1
        && round
            .operands
            .iter()
            .all(|op| to_digit_string(op.value, round.base).len() > 1)
}

/// Partial products of a two-operand multiplication, one per digit of the
/// second operand, least significant first and shifted one column left each.
fn work_lines(round: &Round) -> Vec<String> {
    let edge = right_edge(round);
    let [multiplicand, multiplier] = round.operands.as_slice() else {
        return Vec::new();
    };
    let mut lines = vec![format!("{:>edge$}", rule(round.length))];
    let digits = to_digit_string(multiplier.value, round.base);
    for (i, d) in digits.chars().rev().enumerate() {
        let Some(d) = d.to_digit(round.base.radix()) else {
            continue;
        };
        let summand = to_digit_string(u128::from(d) * multiplicand.value, round.base);
        lines.push(format!("{:>w$}", summand, w = edge.saturating_sub(i)));
    }
    lines
}

/// What to print after a wrong or empty guess: optional work, the result
/// under a rule, and a blank line.
pub fn answer_lines(round: &Round, opts: &DisplayOptions) -> Vec<String> {
    let edge = right_edge(round);
    let mut lines = if wants_work(round, opts) {
        work_lines(round)
    } else {
        Vec::new()
    };
    lines.push(format!("{:>edge$}", rule(round.result_digits.len())));
    lines.push(format!("{:>edge$}", round.result_digits));
    lines.push(String::new());
    lines
}

/// One-line JSON dump of a round.
///
/// # Errors
///
/// Propagates `serde_json` serialisation errors.
pub fn round_json(round: &Round) -> serde_json::Result<String> {
    serde_json::to_string(round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::models::Operand;

    fn round(base: Base, op: Operator, length: usize, values: &[u128], result: u128) -> Round {
        Round {
            round_id: "MUL-00000000".to_string(),
            base,
            operator: op,
            length,
            operands: values
                .iter()
                .map(|&v| Operand { digits: to_digit_string(v, base), value: v })
                .collect(),
            result,
            result_digits: to_digit_string(result, base),
            failure: None,
        }
    }

    #[test]
    fn coda_depends_on_base_and_mode() {
        assert_eq!(subscript_coda(Base::Hex, SubscriptMode::Some), "ₕₑₓ");
        assert_eq!(subscript_coda(Base::Octal, SubscriptMode::Some), "₈");
        assert_eq!(subscript_coda(Base::Decimal, SubscriptMode::Some), "");
        assert_eq!(subscript_coda(Base::Decimal, SubscriptMode::All), "ₜₑₙ");
        assert_eq!(subscript_coda(Base::Binary, SubscriptMode::None), "");
    }

    #[test]
    fn operator_floats_three_spaces_before_the_digits() {
        let r = round(Base::Decimal, Operator::Multiply, 1, &[3, 4], 12);
        let lines = problem_lines(&r, &DisplayOptions::default());
        assert_eq!(lines, vec!["        3".to_string(), "    ×   4".to_string()]);
    }

    #[test]
    fn coda_follows_the_last_operand_only() {
        let r = round(Base::Hex, Operator::Add(3), 2, &[0xab, 0x1c, 0x2d], 0xf4);
        let lines = problem_lines(&r, &DisplayOptions::default());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "         ab");
        assert_eq!(lines[1], "     +   1c");
        assert_eq!(lines[2], "     +   2d  ₕₑₓ");
    }

    #[test]
    fn answer_shows_rule_result_and_blank_line() {
        let r = round(Base::Decimal, Operator::Multiply, 1, &[3, 4], 12);
        let lines = answer_lines(&r, &DisplayOptions::default());
        assert_eq!(
            lines,
            vec!["       ══".to_string(), "       12".to_string(), String::new()]
        );
    }

    #[test]
    fn show_work_lists_shifted_partial_products() {
        let r = round(Base::Decimal, Operator::Multiply, 2, &[12, 34], 408);
        let opts = DisplayOptions { show_work: true, ..DisplayOptions::default() };
        let lines = answer_lines(&r, &opts);
        assert_eq!(
            lines,
            vec![
                "         ══".to_string(),
                "         48".to_string(),
                "        36".to_string(),
                "        ═══".to_string(),
                "        408".to_string(),
                String::new(),
            ]
        );
    }

    #[test]
    fn show_work_skipped_for_single_digit_operands() {
        let r = round(Base::Decimal, Operator::Multiply, 2, &[12, 7], 84);
        let opts = DisplayOptions { show_work: true, ..DisplayOptions::default() };
        assert_eq!(answer_lines(&r, &opts).len(), 3);
    }

    #[test]
    fn round_serialises_to_json() {
        let r = round(Base::Octal, Operator::Subtract, 1, &[7, 5], 2);
        let json = round_json(&r).unwrap();
        assert!(json.contains("\"result_digits\":\"2\""), "{json}");
        assert!(json.contains("\"Octal\""), "{json}");
    }
}
