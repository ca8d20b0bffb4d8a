//! Naming-style conversion between snake_case, kebab-case, and lowerCamelCase.
//!
//! All conversions are total: characters that are neither letters, digits,
//! nor word separators are carried through unchanged.

/// Splits an identifier into words.
///
/// Boundaries are `_`, `-`, and spaces; any non-uppercase character followed
/// by an uppercase letter; and the last capital of an uppercase run that is
/// followed by a lowercase letter (`HTTPServer` → `HTTP`, `Server`).
fn words(s: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = s.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &(idx, c)) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ') {
            if let Some(begin) = start.take() {
                words.push(&s[begin..idx]);
            }
            continue;
        }

        let Some(begin) = start else {
            start = Some(idx);
            continue;
        };

        let prev = chars[i - 1].1;
        let next = chars.get(i + 1).map(|&(_, c)| c);
        let boundary = c.is_uppercase()
            && (!prev.is_uppercase() || next.is_some_and(char::is_lowercase));

        if boundary {
            words.push(&s[begin..idx]);
            start = Some(idx);
        }
    }

    if let Some(begin) = start {
        words.push(&s[begin..]);
    }
    words
}

fn join_lower(s: &str, separator: &str) -> String {
    words(s)
        .into_iter()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Converts to `snake_case`.
///
/// ```ignore
/// assert_eq!(to_snake_case("bookShelf"), "book_shelf");
/// ```
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    join_lower(s, "_")
}

/// Converts to `kebab-case`.
#[must_use]
pub fn to_kebab_case(s: &str) -> String {
    join_lower(s, "-")
}

/// Converts to `lowerCamelCase`.
///
/// A word directly after a lone capital keeps a lowercase head unless its
/// second character is lowercase, so the output never contains an uppercase
/// run that `words` would read back as one word (`a_b_c` → `aBc`).
#[must_use]
pub fn to_lower_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_lone_capital = false;
    for (i, word) in words(s).into_iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        let Some(first) = chars.next() else {
            continue;
        };
        let rest = chars.as_str();
        let capitalize =
            !after_lone_capital || rest.chars().next().is_some_and(char::is_lowercase);
        if capitalize {
            out.extend(first.to_uppercase());
        } else {
            out.push(first);
        }
        out.push_str(rest);
        after_lone_capital = capitalize && first.is_lowercase() && rest.is_empty();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_case_and_separators() {
        assert_eq!(words("bookShelf"), vec!["book", "Shelf"]);
        assert_eq!(words("book_shelf-item x"), vec!["book", "shelf", "item", "x"]);
        assert_eq!(words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(words("v1Beta"), vec!["v1", "Beta"]);
        assert_eq!(words("__"), Vec::<&str>::new());
        assert_eq!(words("a.B"), vec!["a.", "B"]);
    }

    #[test]
    fn snake_case() {
        assert_eq!(to_snake_case("bookShelf"), "book_shelf");
        assert_eq!(to_snake_case("BookShelf"), "book_shelf");
        assert_eq!(to_snake_case("book-id"), "book_id");
        assert_eq!(to_snake_case("bookID"), "book_id");
        assert_eq!(to_snake_case("book_shelf"), "book_shelf");
    }

    #[test]
    fn kebab_case() {
        assert_eq!(to_kebab_case("Book"), "book");
        assert_eq!(to_kebab_case("MyBook"), "my-book");
        assert_eq!(to_kebab_case("my_book"), "my-book");
        assert_eq!(to_kebab_case("book-edition"), "book-edition");
    }

    #[test]
    fn lower_camel_case() {
        assert_eq!(to_lower_camel_case("book_shelves"), "bookShelves");
        assert_eq!(to_lower_camel_case("BookShelves"), "bookShelves");
        assert_eq!(to_lower_camel_case("book-shelves"), "bookShelves");
        assert_eq!(to_lower_camel_case("HTTPServer"), "httpServer");
        assert_eq!(to_lower_camel_case("publishers"), "publishers");
    }

    #[test]
    fn lower_camel_case_of_single_letter_words() {
        assert_eq!(to_lower_camel_case("a_b_c"), "aBc");
        assert_eq!(to_lower_camel_case("x_y"), "xY");
        assert_eq!(to_lower_camel_case("user_a_b"), "userAb");
        assert_eq!(to_lower_camel_case("a_b_c_d"), "aBcD");
        assert_eq!(to_lower_camel_case("a_b_c1"), "aBc1");
        assert_eq!(to_lower_camel_case("a_b_cd"), "aBCd");
        assert_eq!(to_lower_camel_case("aBC"), "aBc");
    }

    #[test]
    fn unrecognized_characters_pass_through() {
        assert_eq!(to_snake_case("{book}"), "{book}");
        assert_eq!(to_kebab_case("library.example.com"), "library.example.com");
        assert_eq!(to_lower_camel_case("*"), "*");
    }

    #[test]
    fn conversions_are_idempotent() {
        for input in [
            "bookShelf", "HTTPServer", "book_id", "My-Book", "v1Beta2", "a", "", "a_b_c", "x_y",
            "user_a_b", "a_b_c_d", "a_b_c1", "a_b_cd", "a._b", "a_1_b", "q_r_s_t_u",
        ] {
            let snake = to_snake_case(input);
            assert_eq!(to_snake_case(&snake), snake, "snake of {input}");
            let kebab = to_kebab_case(input);
            assert_eq!(to_kebab_case(&kebab), kebab, "kebab of {input}");
            let camel = to_lower_camel_case(input);
            assert_eq!(to_lower_camel_case(&camel), camel, "camel of {input}");
        }
    }
}
