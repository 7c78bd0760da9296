//! Query variant generation.
//!
//! Part numbers arrive in whatever shape the user's supplier catalog,
//! invoice, or memory produced: `11427566327`, `11 42 7 566 327`,
//! `04465-47060`, `hu816x`. The catalog's OE lookup is picky about
//! formatting, so each raw query expands into an ordered list of candidate
//! rewrites; the lookup loop tries them in order and the first hit wins.
//!
//! The rule order below is significant and fixed. Every rule's output is
//! added only if not already present (exact-string, case-sensitive dedup),
//! so the sequence is finite and duplicate-free.

/// Group sizes for manufacturer-style regrouping of long all-digit numbers
/// (BMW convention: `11 42 7 566 327`). The remainder after these groups
/// becomes one final group.
const DIGIT_GROUP_SIZES: [usize; 4] = [2, 2, 1, 3];

/// Expands a raw query into ordered, deduplicated lookup candidates.
///
/// Never panics; empty input yields a single empty-string candidate, which
/// the fetch layer rejects with a 404 like any other miss.
#[must_use]
pub fn generate(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let trimmed = raw.trim().to_owned();

    // Rule 1: the trimmed input, unchanged.
    push_unique(&mut out, trimmed.clone());

    // Rule 2: whitespace, hyphens, dots, and slashes removed.
    let compact: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '/'))
        .collect();
    push_unique(&mut out, compact.clone());

    // Rule 3: every non-alphanumeric character removed.
    let alnum: String = trimmed.chars().filter(|c| c.is_alphanumeric()).collect();
    push_unique(&mut out, alnum);

    // Rules 4 and 5: case-folded forms of the compact rewrite.
    push_unique(&mut out, compact.to_uppercase());
    push_unique(&mut out, compact.to_lowercase());

    // Rule 6: manufacturer-style regrouping of long all-digit numbers.
    if compact.len() >= 8 && compact.bytes().all(|b| b.is_ascii_digit()) {
        push_unique(&mut out, regroup_digits(&compact));
    }

    // Rule 7: insert a hyphen after the first 5 characters (Toyota/Lexus
    // style), unless the user already supplied one.
    if compact.chars().count() >= 10 && !trimmed.contains('-') {
        if let Some(split) = compact.char_indices().nth(5).map(|(i, _)| i) {
            push_unique(&mut out, format!("{}-{}", &compact[..split], &compact[split..]));
        }
    }

    out
}

fn push_unique(out: &mut Vec<String>, candidate: String) {
    if !out.contains(&candidate) {
        out.push(candidate);
    }
}

/// Splits an all-digit string into groups of [`DIGIT_GROUP_SIZES`] plus the
/// remainder, joined by single spaces.
fn regroup_digits(digits: &str) -> String {
    let mut groups: Vec<&str> = Vec::with_capacity(DIGIT_GROUP_SIZES.len() + 1);
    let mut rest = digits;
    for size in DIGIT_GROUP_SIZES {
        if rest.len() < size {
            break;
        }
        let (group, tail) = rest.split_at(size);
        groups.push(group);
        rest = tail;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.join(" ").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_same_input() {
        let a = generate("11427566327");
        let b = generate("11427566327");
        assert_eq!(a, b);
    }

    #[test]
    fn no_duplicate_candidates() {
        for query in ["11427566327", "04465-47060", "HU 816 x", "a.b/c-d", ""] {
            let variants = generate(query);
            for (i, v) in variants.iter().enumerate() {
                assert!(
                    !variants[i + 1..].contains(v),
                    "duplicate candidate {v:?} for query {query:?}"
                );
            }
        }
    }

    #[test]
    fn bmw_number_starts_literal_and_includes_grouped_form() {
        let variants = generate("11427566327");
        assert_eq!(variants[0], "11427566327");
        assert!(variants.contains(&"11 42 7 566 327".to_owned()));
    }

    #[test]
    fn toyota_number_keeps_literal_and_compact_forms() {
        let variants = generate("04465-47060");
        assert!(variants.contains(&"04465-47060".to_owned()));
        assert!(variants.contains(&"0446547060".to_owned()));
    }

    #[test]
    fn hyphen_insertion_skipped_when_input_has_hyphen() {
        let variants = generate("04465-47060");
        // Rule 7 would produce "04465-47060" again; either way no second
        // hyphenated rewrite appears.
        let hyphenated: Vec<&String> = variants.iter().filter(|v| v.contains('-')).collect();
        assert_eq!(hyphenated, vec!["04465-47060"]);
    }

    #[test]
    fn hyphen_inserted_for_long_unhyphenated_input() {
        let variants = generate("0446547060");
        assert!(variants.contains(&"04465-47060".to_owned()));
    }

    #[test]
    fn case_folded_forms_present_for_mixed_case() {
        let variants = generate("5k0698451a");
        assert!(variants.contains(&"5K0698451A".to_owned()));
        assert!(variants.contains(&"5k0698451a".to_owned()));
    }

    #[test]
    fn whitespace_and_punctuation_stripped() {
        let variants = generate(" 11 42.7/566-327 ");
        assert_eq!(variants[0], "11 42.7/566-327");
        assert!(variants.contains(&"11427566327".to_owned()));
    }

    #[test]
    fn empty_input_yields_single_empty_candidate() {
        assert_eq!(generate(""), vec![String::new()]);
        assert_eq!(generate("   "), vec![String::new()]);
    }

    #[test]
    fn short_digit_strings_are_not_regrouped() {
        let variants = generate("1234567");
        assert!(!variants.iter().any(|v| v.contains(' ')));
    }

    #[test]
    fn regroup_handles_exact_group_boundary() {
        // 8 digits fill the fixed groups with nothing left over.
        let variants = generate("11427566");
        assert!(variants.contains(&"11 42 7 566".to_owned()));
    }
}
