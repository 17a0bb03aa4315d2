//! Slug derivation from note titles.

use crate::domain::SLUG_MAX_LENGTH;

/// Latin spelling of a lowercase Cyrillic letter.
///
/// Hard and soft signs transliterate to nothing.
fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' | 'ґ' => "g",
        'д' => "d",
        'е' | 'э' => "e",
        'ё' => "yo",
        'є' => "ye",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'ї' => "yi",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

/// Appends `piece`, emitting one separating hyphen if a break is pending.
fn push_piece(result: &mut String, pending_hyphen: &mut bool, piece: &str) {
    if piece.is_empty() {
        return;
    }
    if *pending_hyphen && !result.is_empty() {
        result.push('-');
    }
    *pending_hyphen = false;
    result.push_str(piece);
}

/// Converts a title to a URL-friendly slug.
///
/// - Converts to lowercase
/// - Transliterates Cyrillic letters to Latin (`Заметка` -> `zametka`)
/// - Replaces runs of whitespace and hyphens with a single hyphen
/// - Keeps only ASCII alphanumerics, hyphens, and underscores
/// - Trims leading/trailing hyphens
/// - Truncates to [`SLUG_MAX_LENGTH`] characters
/// - Returns "untitled" for empty results
///
/// The result always satisfies [`crate::domain::Slug::new`].
///
/// # Examples
///
/// ```
/// use notes::infra::slugify;
///
/// assert_eq!(slugify("Test Note"), "test-note");
/// assert_eq!(slugify("Заметка 1"), "zametka-1");
/// assert_eq!(slugify("!!!"), "untitled");
/// ```
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();

    let mut result = String::with_capacity(lower.len());
    let mut pending_hyphen = false;

    for c in lower.chars() {
        if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            let mut buf = [0u8; 4];
            push_piece(&mut result, &mut pending_hyphen, c.encode_utf8(&mut buf));
        } else if let Some(latin) = transliterate(c) {
            push_piece(&mut result, &mut pending_hyphen, latin);
        }
        // Everything else is dropped
    }

    if result.is_empty() {
        return "untitled".to_string();
    }

    // Only ASCII remains, so byte and char lengths agree
    if result.len() > SLUG_MAX_LENGTH {
        result.truncate(SLUG_MAX_LENGTH);
        let trimmed = result.trim_end_matches('-').len();
        result.truncate(trimmed);
    }

    result
}
