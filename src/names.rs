use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

const KATAKANA_START: u32 = 0x30A1;
const KATAKANA_END: u32 = 0x30F6;
const KATAKANA_TO_HIRAGANA: u32 = 0x60;

/// Orders names with ASCII-initial names first (case-insensitive), then
/// everything else by kana reading.
pub fn sort_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let (mut ascii, mut other): (Vec<String>, Vec<String>) = names
        .into_iter()
        .map(Into::into)
        .partition(|name| starts_with_ascii_letter(name));

    ascii.sort_by_cached_key(|name| (name.to_ascii_lowercase(), name.clone()));
    other.sort_by_cached_key(|name| collation_key(name));

    ascii.append(&mut other);
    ascii
}

fn starts_with_ascii_letter(name: &str) -> bool {
    name.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic())
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    primary: String,
    secondary: String,
    raw: String,
}

fn collation_key(name: &str) -> CollationKey {
    let secondary: String = name
        .nfkc()
        .map(katakana_to_hiragana)
        .flat_map(char::to_lowercase)
        .collect();
    let primary = secondary
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect();
    CollationKey {
        primary,
        secondary,
        raw: name.to_string(),
    }
}

fn katakana_to_hiragana(ch: char) -> char {
    let code = u32::from(ch);
    if (KATAKANA_START..=KATAKANA_END).contains(&code) {
        char::from_u32(code - KATAKANA_TO_HIRAGANA).unwrap_or(ch)
    } else {
        ch
    }
}
