// Sentence segmentation — splits raw input into ordered sentence slices.
//
// A boundary is a run of terminal punctuation (. ! ?), optionally followed by
// closing quotes or brackets, then whitespace or the end of the text. Periods
// that end a known abbreviation or a single-letter initial don't split, and
// neither does a period followed by a lowercase word ("approx. three").

/// Abbreviations whose trailing period should not end a sentence.
/// Compared lowercase, without the trailing period.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "inc", "ltd", "co",
    "corp", "fig", "figs", "vol", "pp", "ed", "eds", "approx", "dept", "est", "gen",
    "gov", "rev", "sen", "rep", "capt", "col", "lt", "sgt", "jan", "feb", "mar", "apr", "jun",
    "jul", "aug", "sep", "sept", "oct", "nov", "dec", "al", "cf", "ca",
];

/// Split `text` into sentences, in order of appearance.
///
/// Every returned slice is trimmed and non-empty. Text without any sentence
/// boundary comes back as a single trimmed sentence; blank text yields none.
pub fn segment(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminal(c) {
            continue;
        }

        // Absorb "?!", "..." and closing quotes/brackets into this boundary
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if is_terminal(next) || is_closing(next) {
                end = j + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        // "3.14", "example.com" and "a.b" are not boundaries
        if let Some(&(_, next)) = chars.peek() {
            if !next.is_whitespace() {
                continue;
            }
        }

        if c == '.' && ends_with_abbreviation(&text[start..i]) {
            continue;
        }
        if c == '.' && starts_lowercase(&text[end..]) {
            continue;
        }

        push_trimmed(&mut sentences, &text[start..end]);
        start = end;
    }

    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '。' | '！' | '？')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '”' | '’' | '»')
}

/// True if the last word before a period is an abbreviation or an initial.
fn ends_with_abbreviation(before: &str) -> bool {
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    if word.is_empty() {
        return false;
    }

    // Single-letter initials: "J. R. R. Tolkien"
    let mut letters = word.chars();
    if let (Some(first), None) = (letters.next(), letters.next()) {
        return first.is_alphabetic();
    }

    // Dotted letter forms such as "e.g" or "U.S", but not "2.0" or "example.com"
    if word.contains('.') {
        return word.split('.').all(|part| {
            let mut chars = part.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
        });
    }

    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

fn starts_lowercase(rest: &str) -> bool {
    rest.trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_lowercase())
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
