use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a", "an", "and", "are", "as", "at", "be", "but", "by",
            "for", "if", "in", "into", "is", "it",
            "no", "not", "of", "on", "or", "such",
            "that", "the", "their", "then", "there", "these",
            "they", "this", "to", "was", "will", "with",
        ];
        words.iter().copied().collect()
    };
}

/// Strip diacritics: decompose to NFD, drop combining marks, and expand the
/// handful of ligatures that decomposition leaves alone ("Kværndrup" must
/// become "Kvaerndrup").
fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        match c {
            'æ' | 'Æ' => out.push_str("ae"),
            'œ' | 'Œ' => out.push_str("oe"),
            'ø' | 'Ø' => out.push('o'),
            'đ' | 'Đ' => out.push('d'),
            'ł' | 'Ł' => out.push('l'),
            'ß' => out.push_str("ss"),
            _ => out.push(c),
        }
    }
    out
}

/// Normalize free text into the terms used for both indexing and querying:
/// diacritics folded, lower-cased, split on anything that is not a Unicode
/// letter or digit, stop words dropped.
///
/// The output preserves input order. Empty input produces an empty vec, as
/// does input consisting solely of separators or stop words.
pub fn normalize(text: &str) -> Vec<String> {
    let folded = fold(text).to_lowercase();
    WORD.find_iter(&folded)
        .map(|m| m.as_str())
        .filter(|word| !STOPWORDS.contains(*word))
        .map(str::to_owned)
        .collect()
}
