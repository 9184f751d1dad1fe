//! English inflection rules
//!
//! Rule tables are checked in order and the first matching pattern wins,
//! so more specific patterns come first.

use once_cell::sync::Lazy;
use regex::Regex;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn compile(table: &[(&str, &'static str)]) -> Vec<Rule> {
    table
        .iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(pattern).expect("inflection rule must compile"),
            replacement,
        })
        .collect()
}

static PLURALS: Lazy<Vec<Rule>> = Lazy::new(|| {
    compile(&[
        (r"(?i)(quiz)$", "${1}zes"),
        (r"(?i)^(oxen)$", "${1}"),
        (r"(?i)^(ox)$", "${1}en"),
        (r"(?i)^(m|l)ice$", "${1}ice"),
        (r"(?i)^(m|l)ouse$", "${1}ice"),
        (r"(?i)(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
        (r"(?i)(x|ch|ss|sh)$", "${1}es"),
        (r"(?i)([^aeiouy]|qu)y$", "${1}ies"),
        (r"(?i)(hive)$", "${1}s"),
        (r"(?i)(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(?i)sis$", "ses"),
        (r"(?i)([ti])a$", "${1}a"),
        (r"(?i)([ti])um$", "${1}a"),
        (r"(?i)(buffal|tomat)o$", "${1}oes"),
        (r"(?i)(bu)s$", "${1}ses"),
        (r"(?i)(alias|status)$", "${1}es"),
        (r"(?i)(octop|vir)i$", "${1}i"),
        (r"(?i)(octop|vir)us$", "${1}i"),
        (r"(?i)^(ax|test)is$", "${1}es"),
        (r"(?i)s$", "s"),
        (r"$", "s"),
    ])
});

static SINGULARS: Lazy<Vec<Rule>> = Lazy::new(|| {
    compile(&[
        (r"(?i)(database)s$", "${1}"),
        (r"(?i)(quiz)zes$", "${1}"),
        (r"(?i)(matr)ices$", "${1}ix"),
        (r"(?i)(vert|ind)ices$", "${1}ex"),
        (r"(?i)^(ox)en", "${1}"),
        (r"(?i)(alias|status)(es)?$", "${1}"),
        (r"(?i)(octop|vir)(us|i)$", "${1}us"),
        (r"(?i)^(a)x[ie]s$", "${1}xis"),
        (r"(?i)(cris|test)(is|es)$", "${1}is"),
        (r"(?i)(shoe)s$", "${1}"),
        (r"(?i)(o)es$", "${1}"),
        (r"(?i)(bus)(es)?$", "${1}"),
        (r"(?i)^(m|l)ice$", "${1}ouse"),
        (r"(?i)(x|ch|ss|sh)es$", "${1}"),
        (r"(?i)(m)ovies$", "${1}ovie"),
        (r"(?i)(s)eries$", "${1}eries"),
        (r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
        (r"(?i)([lr])ves$", "${1}f"),
        (r"(?i)(tive)s$", "${1}"),
        (r"(?i)(hive)s$", "${1}"),
        (r"(?i)([^f])ves$", "${1}fe"),
        (r"(?i)(^analy)(sis|ses)$", "${1}sis"),
        (
            r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
            "${1}sis",
        ),
        (r"(?i)([ti])a$", "${1}um"),
        (r"(?i)(n)ews$", "${1}ews"),
        (r"(?i)(ss)$", "${1}"),
        (r"(?i)s$", ""),
    ])
});

/// (singular, plural)
const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

#[derive(Clone, Copy)]
enum Direction {
    Plural,
    Singular,
}

pub fn pluralize(word: &str) -> String {
    inflect(word, &PLURALS, Direction::Plural)
}

pub fn singularize(word: &str) -> String {
    inflect(word, &SINGULARS, Direction::Singular)
}

/// `line_item` -> `LineItem`, leaving existing capitals alone
pub fn camelize(word: &str) -> String {
    word.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// `LineItem` -> `line_item`
pub fn underscore(word: &str) -> String {
    let word = ACRONYM_BOUNDARY.replace_all(word, "${1}_${2}");
    let word = WORD_BOUNDARY.replace_all(&word, "${1}_${2}");
    word.replace('-', "_").to_ascii_lowercase()
}

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("acronym boundary must compile"));

static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("word boundary must compile"));

/// `LineItem` -> `Lineitem`, `author_id` -> `Author`
pub fn humanize(word: &str) -> String {
    let stripped = word.strip_suffix("_id").unwrap_or(word);
    let lowered = stripped.replace('_', " ").to_ascii_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Singular, camelized class name for a table or resource name
pub fn classify(word: &str) -> String {
    camelize(&singularize(word))
}

fn inflect(word: &str, rules: &[Rule], direction: Direction) -> String {
    if word.is_empty() || ends_with_word(word, UNCOUNTABLES.iter().copied()).is_some() {
        return word.to_string();
    }

    if let Some(inflected) = irregular(word, direction) {
        return inflected;
    }

    rules
        .iter()
        .find(|rule| rule.pattern.is_match(word))
        .map(|rule| rule.pattern.replace(word, rule.replacement).into_owned())
        .unwrap_or_else(|| word.to_string())
}

fn irregular(word: &str, direction: Direction) -> Option<String> {
    for (singular, plural) in IRREGULARS {
        let (from, to) = match direction {
            Direction::Plural => (*singular, *plural),
            Direction::Singular => (*plural, *singular),
        };
        if ends_with_word(word, std::iter::once(to)).is_some() {
            return Some(word.to_string());
        }
        if let Some(start) = ends_with_word(word, std::iter::once(from)) {
            let first = &word[start..start + 1];
            return Some(format!("{}{}{}", &word[..start], first, &to[1..]));
        }
    }
    None
}

/// Byte offset of the first candidate that ends `word` as a whole word:
/// the match starts the string, follows an underscore, or starts a
/// camel-case hump.
fn ends_with_word<'a>(word: &str, candidates: impl Iterator<Item = &'a str>) -> Option<usize> {
    let lowered = word.to_ascii_lowercase();
    for candidate in candidates {
        if !lowered.ends_with(candidate) {
            continue;
        }
        let start = word.len() - candidate.len();
        let at_boundary = start == 0
            || word[..start].ends_with('_')
            || word[start..].starts_with(|c: char| c.is_ascii_uppercase());
        if at_boundary {
            return Some(start);
        }
    }
    None
}
