// Song title cleanup.
//
// Media sessions (browsers especially) report titles like
// "Artist - Song (Official Video) [4K] ft. Someone". This strips the noise and
// guesses which dash-separated segment is the song. The guess is a heuristic:
// when the first segment contains the known artist name, the second one wins.

const SEPARATORS: [char; 4] = ['-', '–', '|', '•'];
const FEATURING: [&str; 3] = ["ft.", "feat.", "featuring"];
const BRACKETS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

pub fn clean_title(raw: &str, artist: Option<&str>, junk_words: &[String]) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let title = strip_bracketed(raw);
    let title = strip_words(&title, junk_words);
    let title = cut_featuring(&title);

    let parts: Vec<&str> = title
        .split(SEPARATORS)
        .map(str::trim)
        .filter(|p| p.chars().count() > 2)
        .collect();

    let artist = artist.map(str::trim).filter(|a| !a.is_empty());
    let chosen = match (parts.as_slice(), artist) {
        ([first, second, ..], Some(artist))
            if first.to_lowercase().contains(&artist.to_lowercase()) =>
        {
            *second
        }
        ([first, ..], _) => *first,
        ([], _) => title,
    };
    collapse_whitespace(chosen)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Drop `(...)`, `[...]` and `{...}` groups, closing at the first matching closer.
/// An opener with no closer is kept as text.
pub(crate) fn strip_bracketed(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        let after = &rest[c.len_utf8()..];
        let closer = BRACKETS.iter().find(|(open, _)| *open == c).map(|(_, close)| *close);
        match closer.and_then(|close| after.find(close).map(|i| (i, close))) {
            Some((i, close)) => rest = &after[i + close.len_utf8()..],
            None => {
                out.push(c);
                rest = after;
            }
        }
    }
    out
}

/// Remove whole words matching any of `words`, ignoring case.
fn strip_words(s: &str, words: &[String]) -> String {
    let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
    let mut out = String::with_capacity(s.len());
    let mut word = String::new();
    let flush = |word: &mut String, out: &mut String| {
        if !lowered.contains(&word.to_lowercase()) {
            out.push_str(word);
        }
        word.clear();
    };
    for c in s.chars() {
        if is_word_char(c) {
            word.push(c);
        } else {
            flush(&mut word, &mut out);
            out.push(c);
        }
    }
    flush(&mut word, &mut out);
    out
}

/// Truncate at the first "ft." / "feat." / "featuring" that starts a word.
fn cut_featuring(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut prev: Option<char> = None;
    for (i, c) in s.char_indices() {
        let at_boundary = prev.is_none_or(|p| !is_word_char(p));
        // Markers are ASCII, so a byte-wise case-insensitive compare is exact.
        if at_boundary
            && FEATURING.iter().any(|m| {
                bytes[i..]
                    .get(..m.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(m.as_bytes()))
            })
        {
            return &s[..i];
        }
        prev = Some(c);
    }
    s
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
