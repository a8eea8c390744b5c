/// Lowercase and trim a string for comparison
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Either string contains the other
pub fn contains_either(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Split text into the word tokens the index builder stores on documents:
/// runs of ASCII letters, digits and æ/ø/å after lowercasing.
pub fn tokenize(s: &str) -> Vec<String> {
    s.to_lowercase()
        .split(|c: char| !is_token_char(c))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, 'æ' | 'ø' | 'å')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Tabell  "), "tabell");
        assert_eq!(normalize("ØKONOMI"), "økonomi");
        assert_eq!(normalize("\t\n"), "");
    }

    #[test]
    fn test_contains_either() {
        assert!(contains_either("knapp", "neste-knapp"));
        assert!(contains_either("neste-knapp", "knapp"));
        assert!(contains_either("knapp", "knapp"));
        assert!(!contains_either("tabell med sortering", "redigerbar tabell"));
        assert!(!contains_either("knapp", "lenke"));
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Neste-knapp: Før og Etter 2 (é)"),
            vec!["neste", "knapp", "før", "og", "etter", "2"]
        );
        assert!(tokenize("  --  ").is_empty());
    }
}
