use std::sync::LazyLock;

use regex::Regex;

/// Strings this short or shorter are never ingredients.
pub const MIN_REJECTED_CHARS: usize = 1;
/// Strings this long or longer are recipe prose.
pub const MAX_REJECTED_CHARS: usize = 200;

static INSTRUCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:pasos?|step|steps|instrucciones|instructions|preparaci[oó]n|preparar|prepare|cocinar|cook|hervir|boil|servir|serve)\b",
    )
    .expect("instruction pattern")
});

static CHECKBOX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\[\]✓\s]+").expect("checkbox pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    TooShort,
    TooLong,
    Instruction,
}

/// Removes the checkbox decoration the list labels carry ("[ ] arroz", "✓ arroz").
pub fn clean_label(text: &str) -> &str {
    let text = text.trim();
    match CHECKBOX_RE.find(text) {
        Some(m) => text[m.end()..].trim(),
        None => text,
    }
}

/// Checks that an extracted string looks like an ingredient and not like
/// recipe prose or a stray heading fragment.
pub fn check_ingredient(text: &str) -> Result<(), Rejection> {
    let chars = text.trim().chars().count();

    if chars <= MIN_REJECTED_CHARS {
        return Err(Rejection::TooShort);
    }

    if chars >= MAX_REJECTED_CHARS {
        return Err(Rejection::TooLong);
    }

    if INSTRUCTION_RE.is_match(text) {
        return Err(Rejection::Instruction);
    }

    Ok(())
}

pub fn is_valid_ingredient(text: &str) -> bool {
    check_ingredient(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert_eq!(check_ingredient("a"), Err(Rejection::TooShort));
        assert_eq!(check_ingredient(" "), Err(Rejection::TooShort));
        assert_eq!(check_ingredient("ajo"), Ok(()));
        assert_eq!(check_ingredient(&"x".repeat(199)), Ok(()));
        assert_eq!(check_ingredient(&"x".repeat(200)), Err(Rejection::TooLong));
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        assert_eq!(check_ingredient("ñ"), Err(Rejection::TooShort));
        assert_eq!(check_ingredient("ñú"), Ok(()));
    }

    #[test]
    fn test_instructional_text_rejected() {
        assert_eq!(
            check_ingredient("Paso 1: hervir el agua"),
            Err(Rejection::Instruction)
        );
        assert_eq!(
            check_ingredient("Cocinar a fuego lento 20 minutos"),
            Err(Rejection::Instruction)
        );
        assert_eq!(check_ingredient("Servir caliente"), Err(Rejection::Instruction));
        assert_eq!(check_ingredient("Preparación"), Err(Rejection::Instruction));
        assert_eq!(check_ingredient("Step 2 boil"), Err(Rejection::Instruction));
    }

    #[test]
    fn test_keyword_inside_word_is_fine() {
        assert!(is_valid_ingredient("pasas de uva"));
        assert!(is_valid_ingredient("cookies de avena"));
        assert!(is_valid_ingredient("servilletas"));
    }

    #[test]
    fn test_clean_label() {
        assert_eq!(clean_label("[ ] arroz blanco"), "arroz blanco");
        assert_eq!(clean_label("✓ tomate"), "tomate");
        assert_eq!(clean_label("  fideos "), "fideos");
    }
}
