//! Property-based tests for pattern reversal.

use fancy_regex::Regex;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use unmatcher::{reverse, GroupValues, ReverseOptions, Unmatcher};

fn full_match(pattern: &str, s: &str) -> bool {
    Regex::new(&format!("^(?:{})$", pattern))
        .unwrap()
        .is_match(s)
        .unwrap()
}

/// Patterns that every generated string must fully match.
fn pattern_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        r"[a-z]+(-[a-z]+)*",
        r"\d{1,3}(\.\d{1,3}){3}",
        r"(?P<q>['\x22]).*(?P=q)",
        r"(\w)(\w)?\1",
        r"[^,]+(,[^,]+)*",
        r"(x|yy|zzz){2,5}",
        r"\s*\S+\s*",
        r"(?i)[^k]+",
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn literal_patterns_reverse_to_themselves(expr in "[a-zA-Z0-9]{0,20}") {
        prop_assert_eq!(reverse(expr.as_str(), &GroupValues::new()).unwrap(), expr);
    }

    #[test]
    fn star_and_plus_repeat_only_their_atom(ch in "[a-zA-Z0-9]", plus in any::<bool>()) {
        let pattern = format!("{}{}", ch, if plus { '+' } else { '*' });
        let s = reverse(pattern.as_str(), &GroupValues::new()).unwrap();
        prop_assert!(full_match(&pattern, &s));
        prop_assert!(s.chars().all(|c| c.to_string() == ch));
        if plus {
            prop_assert!(!s.is_empty());
        }
    }

    #[test]
    fn brace_repeat_stays_within_bounds(ch in "[a-zA-Z0-9]", a in 0u32..64, b in 0u32..64) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let pattern = format!("{}{{{},{}}}", ch, lo, hi);
        let s = reverse(pattern.as_str(), &GroupValues::new()).unwrap();
        let len = s.chars().count() as u32;
        prop_assert!(lo <= len && len <= hi, "{} produced {} characters", pattern, len);
    }

    #[test]
    fn unbounded_repeat_is_capped(extra in 0u32..10, min in 0u32..5, seed in any::<u64>()) {
        let options = ReverseOptions::default().with_unbounded_repeat_extra(extra);
        let pattern = format!("q{{{},}}", min);
        let unmatcher = Unmatcher::with_options(pattern.as_str(), options).unwrap();
        let s = unmatcher
            .reverse_with_rng(&GroupValues::new(), &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let len = s.len() as u32;
        prop_assert!(min <= len && len <= min + extra);
    }

    #[test]
    fn seeded_outputs_fully_match(pattern in pattern_strategy(), seed in any::<u64>()) {
        let unmatcher = Unmatcher::new(pattern).unwrap();
        let s = unmatcher
            .reverse_with_rng(&GroupValues::new(), &mut StdRng::seed_from_u64(seed))
            .unwrap();
        prop_assert!(full_match(pattern, &s), "{:?} does not match {:?}", s, pattern);
    }

    #[test]
    fn seeded_group_appears_at_both_ends(tag in "[a-z][a-z0-9]{0,7}") {
        let s = reverse(r"<(\w+)>.*</\1>", &GroupValues::new().push(tag.clone())).unwrap();
        let open = format!("<{}>", tag);
        let close = format!("</{}>", tag);
        prop_assert!(s.starts_with(&open));
        prop_assert!(s.ends_with(&close));
    }
}
