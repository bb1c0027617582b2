//! Ukrainian Cyrillic to Latin transliteration following the official
//! national table (Cabinet of Ministers resolution No. 55, 2010).
//!
//! The engine never fails: a character outside the table is replaced with
//! [`UNMAPPED`] so the defect stays visible in the rendered text.

/// Marker emitted for every character the table does not cover.
pub const UNMAPPED: &str = "???";

/// Transliterates `text` left to right. The sequence "зг" takes precedence
/// over the single-letter rules and becomes "zgh".
pub fn transliterate(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        let digraph = match (ch, chars.peek()) {
            ('З', Some('г')) => Some("Zgh"),
            ('з', Some('г')) => Some("zgh"),
            _ => None,
        };

        if let Some(latin) = digraph {
            chars.next();
            output.push_str(latin);
        } else {
            output.push_str(latin_for(ch).unwrap_or(UNMAPPED));
        }
    }

    output
}

/// Characters of `text` that [`transliterate`] would replace with [`UNMAPPED`].
pub fn unmapped_chars(text: &str) -> Vec<char> {
    text.chars().filter(|ch| latin_for(*ch).is_none()).collect()
}

/// Single-character table. Apostrophes and the soft sign are elided.
fn latin_for(ch: char) -> Option<&'static str> {
    let latin = match ch {
        'А' => "A",
        'а' => "a",
        'Б' => "B",
        'б' => "b",
        'В' => "V",
        'в' => "v",
        'Г' => "H",
        'г' => "h",
        'Ґ' => "G",
        'ґ' => "g",
        'Д' => "D",
        'д' => "d",
        'Е' => "E",
        'е' => "e",
        'Є' => "Ye",
        'є' => "ie",
        'Ж' => "Zh",
        'ж' => "zh",
        'З' => "Z",
        'з' => "z",
        'И' => "Y",
        'и' => "y",
        'І' => "I",
        'і' => "i",
        'Ї' => "Yi",
        'ї' => "i",
        'Й' => "Y",
        'й' => "i",
        'К' => "K",
        'к' => "k",
        'Л' => "L",
        'л' => "l",
        'М' => "M",
        'м' => "m",
        'Н' => "N",
        'н' => "n",
        'О' => "O",
        'о' => "o",
        'П' => "P",
        'п' => "p",
        'Р' => "R",
        'р' => "r",
        'С' => "S",
        'с' => "s",
        'Т' => "T",
        'т' => "t",
        'У' => "U",
        'у' => "u",
        'Ф' => "F",
        'ф' => "f",
        'Х' => "Kh",
        'х' => "kh",
        'Ц' => "Ts",
        'ц' => "ts",
        'Ч' => "Ch",
        'ч' => "ch",
        'Ш' => "Sh",
        'ш' => "sh",
        'Щ' => "Shch",
        'щ' => "shch",
        'Ю' => "Yu",
        'ю' => "iu",
        'Я' => "Ya",
        'я' => "ia",
        'Ь' | 'ь' => "",
        '\'' | '\u{2019}' | '\u{02BC}' => "",
        ' ' => " ",
        _ => return None,
    };
    Some(latin)
}
