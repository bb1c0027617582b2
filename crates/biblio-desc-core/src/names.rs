//! Author-name renderings used in citations and the table of contents.
//!
//! Raw names arrive as `"Surname Given [Patronymic…]"` with space-separated,
//! Title-Cased tokens.

const AUTHOR_SEPARATOR: &str = ", ";

/// Splits a raw name into its surname and the tokens that follow it.
fn split_name(author: &str) -> (&str, Vec<&str>) {
    let mut tokens = author.split_whitespace();
    let surname = tokens.next().unwrap_or("");
    (surname, tokens.collect())
}

/// `"Іван"` → `"І."`
fn initial(token: &str) -> String {
    let mut out = String::with_capacity(8);
    if let Some(first) = token.chars().next() {
        out.push(first);
    }
    out.push('.');
    out
}

fn initials(given: &[&str]) -> String {
    given
        .iter()
        .map(|token| initial(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// First token of a raw name, if any.
pub fn surname(author: &str) -> Option<&str> {
    author.split_whitespace().next()
}

/// `"Коваль Іван Петрович"` → `"І. П. Коваль"`, authors joined by `", "`.
pub fn initials_first<S: AsRef<str>>(authors: &[S]) -> String {
    authors
        .iter()
        .map(|author| {
            let (surname, given) = split_name(author.as_ref());
            if given.is_empty() {
                surname.to_owned()
            } else {
                format!("{} {}", initials(&given), surname)
            }
        })
        .collect::<Vec<_>>()
        .join(AUTHOR_SEPARATOR)
}

/// `"Коваль Іван Петрович"` → `"Коваль І. П."`, authors joined by `", "`.
pub fn surname_first<S: AsRef<str>>(authors: &[S]) -> String {
    authors
        .iter()
        .map(|author| {
            let (surname, given) = split_name(author.as_ref());
            if given.is_empty() {
                surname.to_owned()
            } else {
                format!("{} {}", surname, initials(&given))
            }
        })
        .collect::<Vec<_>>()
        .join(AUTHOR_SEPARATOR)
}
