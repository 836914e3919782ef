//! Per-digit pairing rules between operands.
//!
//! A pattern spec such as `357:6ae,6ae:357` says that a 3, 5 or 7 in one
//! operand may only pair with 6, a or e in the other, and the other way
//! round. Which digits "pair" depends on the operator:
//!
//! | Operator            | Pairing |
//! |---------------------|---------|
//! | add, subtract       | digits in the same column |
//! | multiply, divide    | every digit against the whole other operand |
//!
//! ## Caret quirk
//!
//! A target list may start with `^` (`f:^bd`). The caret is accepted and
//! stripped, but the list is **not** negated: `f:^bd` means the same as
//! `f:bd`.

use log::{debug, warn};
use regex::Regex;

use crate::drill_engine::{
    digits::parse_digit_set,
    errors::ConfigError,
    models::{Base, Operator},
};

/// Membership test for the digits allowed to pair with one source digit.
#[derive(Debug, Clone)]
enum Matcher {
    Anything,
    Only(Regex),
}

impl Matcher {
    fn matches(&self, digits: &str) -> bool {
        match self {
            Matcher::Anything => true,
            Matcher::Only(re) => re.is_match(digits),
        }
    }
}

/// Compiled pattern spec: one matcher per digit value of the base.
#[derive(Debug, Clone)]
pub struct PatternTable {
    base: Base,
    matchers: Vec<Matcher>,
}

impl PatternTable {
    /// A table where every digit may pair with anything.
    pub fn permissive(base: Base) -> Self {
        PatternTable {
            base,
            matchers: vec![Matcher::Anything; base.radix() as usize],
        }
    }

    /// Compile a comma-separated pattern spec for `base`.
    ///
    /// Later clauses override earlier ones for the same source digit.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] naming the first clause that
    /// lacks exactly one colon, has an empty source or target list, or uses a
    /// digit outside `base`.
    pub fn parse(spec: &str, base: Base) -> Result<Self, ConfigError> {
        let mut table = PatternTable::permissive(base);
        let spec = spec.to_lowercase();

        for clause in spec.split(',') {
            let invalid = || {
                warn!("Invalid pattern clause '{}'", clause);
                ConfigError::InvalidPattern(clause.to_string())
            };

            let parts: Vec<&str> = clause.split(':').collect();
            let [sources, targets] = parts.as_slice() else {
                return Err(invalid());
            };
            let targets = targets.strip_prefix('^').unwrap_or(*targets);
            if sources.is_empty() || targets.is_empty() {
                return Err(invalid());
            }
            let sources = parse_digit_set(sources, base).map_err(|_| invalid())?;
            let targets = parse_digit_set(targets, base).map_err(|_| invalid())?;

            let re = Regex::new(&format!("^[{targets}]*$")).map_err(|_| invalid())?;
            for d in sources.iter() {
                if let Some(idx) = d.to_digit(base.radix()) {
                    table.matchers[idx as usize] = Matcher::Only(re.clone());
                }
            }
            debug!("Pattern clause '{}': {} pairs with {}", clause, sources, targets);
        }

        Ok(table)
    }

    pub fn base(&self) -> Base {
        self.base
    }

    /// True if every character of `partners` may pair with `digit`.
    ///
    /// A `digit` outside the base never matches.
    pub fn allows(&self, digit: char, partners: &str) -> bool {
        digit
            .to_digit(self.base.radix())
            .and_then(|idx| self.matchers.get(idx as usize))
            .is_some_and(|m| m.matches(partners))
    }

    /// Check one pair of operands in both directions under `op`'s pairing rule.
    pub fn pair_matches(&self, op: Operator, a: &str, b: &str) -> bool {
        if op.is_positional() {
            self.columns_match(a, b) && self.columns_match(b, a)
        } else {
            self.whole_match(a, b) && self.whole_match(b, a)
        }
    }

    /// Every digit of `a` against the whole of `b`.
    fn whole_match(&self, a: &str, b: &str) -> bool {
        a.chars().all(|d| self.allows(d, b))
    }

    /// Digit `k` of `a` against digit `k` of `b`, for every column.
    fn columns_match(&self, a: &str, b: &str) -> bool {
        let mut buf = [0u8; 4];
        a.chars()
            .zip(b.chars())
            .all(|(da, db)| self.allows(da, db.encode_utf8(&mut buf)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_table_allows_everything() {
        let table = PatternTable::permissive(Base::Hex);
        assert!(table.allows('f', "0123abc"));
        assert!(table.pair_matches(Operator::Multiply, "12", "ef"));
        assert!(table.pair_matches(Operator::Add(2), "12", "ef"));
    }

    #[test]
    fn unlisted_source_digits_match_anything() {
        let table = PatternTable::parse("3:6", Base::Decimal).unwrap();
        assert!(table.allows('3', "66"));
        assert!(!table.allows('3', "67"));
        assert!(table.allows('4', "0123456789"));
    }

    #[test]
    fn caret_is_stripped_not_negated() {
        let plain = PatternTable::parse("f:bd", Base::Hex).unwrap();
        let caret = PatternTable::parse("f:^bd", Base::Hex).unwrap();
        for partners in ["b", "d", "bd", "a", "bda"] {
            assert_eq!(
                plain.allows('f', partners),
                caret.allows('f', partners),
                "caret changed the meaning for '{partners}'"
            );
        }
        assert!(caret.allows('f', "db"));
        assert!(!caret.allows('f', "a"));
    }

    #[test]
    fn clauses_are_case_insensitive_and_later_ones_win() {
        let table = PatternTable::parse("A:B,a:c", Base::Hex).unwrap();
        assert!(table.allows('a', "c"));
        assert!(!table.allows('a', "b"));
    }

    #[test]
    fn malformed_clauses_are_rejected_by_name() {
        let cases = [
            ("35", "35"),
            ("3:5:7", "3:5:7"),
            (":5", ":5"),
            ("3:", "3:"),
            ("3:^", "3:^"),
            ("9:3", "9:3"),
            ("3:9", "3:9"),
            ("2:3,x:4", "x:4"),
        ];
        for (input, clause) in cases {
            let err = PatternTable::parse(input, Base::Octal).unwrap_err();
            assert_eq!(err, ConfigError::InvalidPattern(clause.to_string()), "pattern '{input}'");
        }
    }

    #[test]
    fn multiplication_checks_whole_operands_in_both_directions() {
        // 6 may only pair with 3s; 3 may pair with anything.
        let table = PatternTable::parse("6:3", Base::Decimal).unwrap();
        assert!(table.pair_matches(Operator::Multiply, "6", "33"));
        assert!(!table.pair_matches(Operator::Multiply, "6", "34"));
        // Reverse direction: the 6 in b must accept all of a.
        assert!(!table.pair_matches(Operator::Divide, "34", "6"));
        assert!(table.pair_matches(Operator::Divide, "33", "6"));
    }

    #[test]
    fn addition_checks_columns_in_both_directions() {
        let table = PatternTable::parse("6:3", Base::Decimal).unwrap();
        // Column 0: 6 over 3, column 1: 4 over 6 -> the 6 in b sees a 4.
        assert!(!table.pair_matches(Operator::Add(2), "64", "36"));
        assert!(table.pair_matches(Operator::Subtract, "64", "34"));
    }

    #[test]
    fn pattern_content_need_not_be_symmetric() {
        // 2 only pairs with 5, but 5 pairs with anything.
        let table = PatternTable::parse("2:5", Base::Decimal).unwrap();
        assert!(table.allows('5', "7"));
        assert!(!table.allows('2', "7"));
        assert!(table.pair_matches(Operator::Multiply, "5", "2"));
        assert!(!table.pair_matches(Operator::Multiply, "7", "2"));
    }
}
