//! Parsing of the comma-separated `--filter` argument.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostics::Diagnostics;
use crate::filter::predicate::{Operator, Predicate};

/// Clause grammars, tried in this order. Each binds one attribute to the
/// operators and value shape it accepts.
const GRAMMARS: [(&str, &str); 9] = [
    ("id", r"^(?P<attr>id)(?P<operator>[=])(?P<value>.+)$"),
    ("replacementid", r"^(?P<attr>replacementid)(?P<operator>[=])(?P<value>.+)$"),
    ("ip", r"^(?P<attr>ip)(?P<operator>[=])(?P<value>[0-9]+\.[0-9]+\.[0-9]+.[0-9]+)$"),
    ("name", r"^(?P<attr>name)(?P<operator>[~!%])(?P<value>.+)$"),
    ("replacementname", r"^(?P<attr>replacementname)(?P<operator>[~!%])(?P<value>.+)$"),
    ("publishedon", r"^(?P<attr>publishedon)(?P<operator>[<=>])(?P<value>[0-9]+)$"),
    ("deprecatedon", r"^(?P<attr>deprecatedon)(?P<operator>[<=>])(?P<value>[0-9]+)$"),
    ("deletedon", r"^(?P<attr>deletedon)(?P<operator>[<=>])(?P<value>[0-9]+)$"),
    ("type", r"^(?P<attr>type)(?P<operator>[~!%])(?P<value>.+)$"),
];

static COMPILED: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    GRAMMARS
        .iter()
        .map(|(name, pattern)| {
            let regex = Regex::new(pattern).unwrap_or_else(|e| panic!("bad {} grammar: {}", name, e));
            (*name, regex)
        })
        .collect()
});

/// Parse a filter string into predicates, in phrase order.
///
/// An absent or empty string yields no predicates. Phrases that match no
/// grammar are reported to `diagnostics` and skipped.
pub fn parse_filter(raw: Option<&str>, diagnostics: &dyn Diagnostics) -> Vec<Predicate> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    raw.split(',')
        .filter_map(|phrase| {
            let predicate = parse_phrase(phrase);
            if predicate.is_none() {
                diagnostics.warning(&format!(
                    "Invalid filter phrase '{}' will be ignored.",
                    phrase
                ));
            }
            predicate
        })
        .collect()
}

/// Match one phrase against the grammars; the first match wins.
pub fn parse_phrase(phrase: &str) -> Option<Predicate> {
    COMPILED.iter().find_map(|(_, regex)| {
        let captures = regex.captures(phrase)?;
        let operator = Operator::from_symbol(&captures["operator"])?;
        Some(Predicate::new(&captures["attr"], operator, &captures["value"]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Collector;

    fn parse(raw: &str) -> (Vec<Predicate>, Vec<String>) {
        let collector = Collector::new();
        let predicates = parse_filter(Some(raw), &collector);
        (predicates, collector.messages())
    }

    #[test]
    fn test_grammars_compile() {
        assert_eq!(COMPILED.len(), 9);
    }

    #[test]
    fn test_absent_or_empty() {
        let collector = Collector::new();
        assert!(parse_filter(None, &collector).is_empty());
        assert!(parse_filter(Some(""), &collector).is_empty());
        assert!(collector.messages().is_empty());
    }

    #[test]
    fn test_single_substring_clause() {
        let (predicates, warnings) = parse("name~foo");
        assert_eq!(predicates, vec![Predicate::new("name", Operator::Contains, "foo")]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_bogus_clause_warns() {
        let (predicates, warnings) = parse("bogus*clause");
        assert!(predicates.is_empty());
        assert_eq!(
            warnings,
            vec!["Invalid filter phrase 'bogus*clause' will be ignored."]
        );
    }

    #[test]
    fn test_phrase_order_is_kept() {
        let (predicates, _) = parse("publishedon>20200101,name!sap,id=ami-123");
        assert_eq!(
            predicates,
            vec![
                Predicate::new("publishedon", Operator::GreaterThan, "20200101"),
                Predicate::new("name", Operator::Excludes, "sap"),
                Predicate::new("id", Operator::Exact, "ami-123"),
            ]
        );
    }

    #[test]
    fn test_invalid_phrase_does_not_stop_parsing() {
        let (predicates, warnings) = parse("name~sles,id~ami,type%smt");
        assert_eq!(predicates.len(), 2);
        assert_eq!(predicates[1], Predicate::new("type", Operator::Matches, "smt"));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'id~ami'"));
    }

    #[test]
    fn test_operator_restrictions() {
        // id-like and ip only take '='
        assert!(parse_phrase("replacementid=ami-1").is_some());
        assert!(parse_phrase("replacementid~ami").is_none());
        // name-like only take '~', '!', '%'
        assert!(parse_phrase("name=sles").is_none());
        assert!(parse_phrase("replacementname%suse").is_some());
        // dates take '<', '=', '>' with digits only
        assert!(parse_phrase("deprecatedon=20200101").is_some());
        assert!(parse_phrase("deletedon<20200101").is_some());
        assert!(parse_phrase("deletedon<yesterday").is_none());
        assert!(parse_phrase("publishedon~2020").is_none());
    }

    #[test]
    fn test_ip_grammar() {
        assert_eq!(
            parse_phrase("ip=10.0.0.1"),
            Some(Predicate::new("ip", Operator::Exact, "10.0.0.1"))
        );
        assert!(parse_phrase("ip=10.0.0").is_none());
        assert!(parse_phrase("ip=host.example.com").is_none());
    }

    #[test]
    fn test_dates_take_ascii_digits_only() {
        assert_eq!(
            parse_phrase("publishedon>99999999999999999999"),
            Some(Predicate::new("publishedon", Operator::GreaterThan, "99999999999999999999"))
        );
        assert!(parse_phrase("publishedon>\u{662}\u{660}\u{662}\u{660}").is_none());
        assert!(parse_phrase("ip=\u{661}0.0.0.1").is_none());
    }

    #[test]
    fn test_value_may_contain_operators() {
        assert_eq!(
            parse_phrase("name~a=b"),
            Some(Predicate::new("name", Operator::Contains, "a=b"))
        );
    }

    #[test]
    fn test_phrases_are_not_trimmed() {
        let (predicates, warnings) = parse("name~sles, id=ami-1");
        assert_eq!(predicates.len(), 1);
        assert_eq!(warnings, vec!["Invalid filter phrase ' id=ami-1' will be ignored."]);
    }

    #[test]
    fn test_empty_phrase_warns() {
        let (predicates, warnings) = parse("name~sles,");
        assert_eq!(predicates.len(), 1);
        assert_eq!(warnings, vec!["Invalid filter phrase '' will be ignored."]);
    }
}
