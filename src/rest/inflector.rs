//! English pluralization of element names.
//!
//! Collection URLs use the plural form of a resource's element name
//! (`song` -> `songs`). The pluralizer appends `s` and then runs a fixed,
//! ordered list of suffix rewrites, each of which only fires when its pattern
//! matches the word as left by the previous rules. A table of irregular
//! corrections is consulted last and wins over the rule-derived result.
//!
//! This is a heuristic, not a dictionary: irregular nouns missing from the
//! table may come out wrong (`roof` -> `rooves`).
//!
//! # Example
//!
//! ```rust
//! use active_resource::rest::pluralize;
//!
//! assert_eq!(pluralize("track"), "tracks");
//! assert_eq!(pluralize("box"), "boxes");
//! assert_eq!(pluralize("city"), "cities");
//! assert_eq!(pluralize("leaf"), "leaves");
//! assert_eq!(pluralize("person"), "people");
//! ```

use std::sync::OnceLock;

use regex::Regex;

/// Suffix rewrites, applied in order. Later rules clean up artifacts of
/// earlier ones, so the order is significant.
const SUFFIX_RULES: &[(&str, &str)] = &[
    (r"(x|ch|sh|ss)s$", "${1}es"),
    (r"ss$", "ses"),
    (r"([ti])ums$", "${1}a"),
    (r"sises$", "ses"),
    (r"([^aeiouy]|qu)ys$", "${1}ies"),
    (r"(?:([^f])fe|([^f])f)s$", "${1}${2}ves"),
    (r"ieses$", "ies"),
];

/// Corrections keyed by the rule pipeline's output.
const IRREGULAR_CORRECTIONS: &[(&str, &str)] = &[
    ("persons", "people"),
    ("peoples", "people"),
    ("mans", "men"),
    ("mens", "men"),
    ("womans", "women"),
    ("womens", "women"),
    ("childs", "children"),
    ("childrens", "children"),
    ("sheeps", "sheep"),
    ("octopuses", "octopi"),
    ("quizs", "quizzes"),
    ("axises", "axes"),
    ("buffalos", "buffaloes"),
    ("tomatos", "tomatoes"),
    ("potatos", "potatoes"),
    ("oxes", "oxen"),
    ("mouses", "mice"),
    ("matrixes", "matrices"),
    ("vertexes", "vertices"),
    ("indexes", "indices"),
];

static COMPILED_RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

fn compiled_rules() -> &'static [(Regex, &'static str)] {
    COMPILED_RULES.get_or_init(|| compile_rules(SUFFIX_RULES))
}

/// Compiles each rule in order, logging and skipping any invalid pattern.
fn compile_rules(rules: &[(&'static str, &'static str)]) -> Vec<(Regex, &'static str)> {
    let mut compiled = Vec::with_capacity(rules.len());
    for (pattern, replacement) in rules {
        match Regex::new(pattern) {
            Ok(regex) => compiled.push((regex, *replacement)),
            Err(error) => tracing::error!("Invalid suffix rule {pattern}: {error}"),
        }
    }
    compiled
}

/// Runs the suffix rules without consulting the irregular table.
#[must_use]
pub fn apply_suffix_rules(word: &str) -> String {
    let mut word = format!("{word}s");
    for (regex, replacement) in compiled_rules() {
        if regex.is_match(&word) {
            word = regex.replace(&word, *replacement).into_owned();
        }
    }
    word
}

/// Looks up the irregular correction for a rule-derived plural, if any.
#[must_use]
pub fn irregular_correction(rule_output: &str) -> Option<&'static str> {
    IRREGULAR_CORRECTIONS
        .iter()
        .find(|(from, _)| *from == rule_output)
        .map(|(_, to)| *to)
}

/// Returns the entries of the irregular correction table.
#[must_use]
pub const fn irregular_corrections() -> &'static [(&'static str, &'static str)] {
    IRREGULAR_CORRECTIONS
}

/// Pluralizes a singular noun.
///
/// Pure, total and deterministic: every input produces exactly one output.
#[must_use]
pub fn pluralize(word: &str) -> String {
    let plural = apply_suffix_rules(word);
    irregular_correction(&plural).map_or(plural, ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_suffix_rules_compile() {
        assert_eq!(compiled_rules().len(), SUFFIX_RULES.len());
    }

    #[test]
    fn test_invalid_rule_is_skipped_and_rest_kept() {
        let rules = [("(ss)$", "${1}es"), ("([unclosed$", "x"), ("(x)$", "${1}es")];

        let compiled = compile_rules(&rules);

        assert_eq!(compiled.len(), 2);
        assert_eq!(compiled[0].0.as_str(), "(ss)$");
        assert_eq!(compiled[1].0.as_str(), "(x)$");
    }

    #[test]
    fn test_regular_nouns() {
        assert_eq!(pluralize("track"), "tracks");
        assert_eq!(pluralize("song"), "songs");
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("day"), "days");
    }

    #[test]
    fn test_sibilant_endings() {
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("church"), "churches");
        assert_eq!(pluralize("dish"), "dishes");
        assert_eq!(pluralize("class"), "classes");
        assert_eq!(pluralize("status"), "statuses");
    }

    #[test]
    fn test_latin_neuter_endings() {
        assert_eq!(pluralize("medium"), "media");
        assert_eq!(pluralize("datum"), "data");
        // Only -ium and -tum are rewritten
        assert_eq!(pluralize("album"), "albums");
    }

    #[test]
    fn test_sis_endings_collapse() {
        assert_eq!(pluralize("analysis"), "analyses");
        assert_eq!(pluralize("basis"), "bases");
    }

    #[test]
    fn test_consonant_y_endings() {
        assert_eq!(pluralize("city"), "cities");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("soliloquy"), "soliloquies");
        assert_eq!(pluralize("key"), "keys");
    }

    #[test]
    fn test_f_and_fe_endings() {
        assert_eq!(pluralize("leaf"), "leaves");
        assert_eq!(pluralize("wolf"), "wolves");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("wife"), "wives");
        assert_eq!(pluralize("staff"), "staffs");
    }

    #[test]
    fn test_irregular_table_overrides_rules() {
        assert_eq!(apply_suffix_rules("person"), "persons");
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("ox"), "oxen");
        assert_eq!(pluralize("mouse"), "mice");
        assert_eq!(pluralize("index"), "indices");
        assert_eq!(pluralize("octopus"), "octopi");
        assert_eq!(pluralize("axis"), "axes");
        assert_eq!(pluralize("quiz"), "quizzes");
    }

    #[test]
    fn test_already_plural_irregulars_are_stable() {
        assert_eq!(pluralize("people"), "people");
        assert_eq!(pluralize("men"), "men");
        assert_eq!(pluralize("children"), "children");
    }

    #[test]
    fn test_irregular_correction_lookup() {
        assert_eq!(irregular_correction("mans"), Some("men"));
        assert_eq!(irregular_correction("songs"), None);
    }
}
