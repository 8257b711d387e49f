//! Single-line CSV field splitting.
//!
//! Deliberately looser than RFC 4180: a `"` only toggles quote mode, and
//! doubled quotes are not unescaped. Unbalanced quotes never fail; they just
//! keep the rest of the line in one field.

/// Split one line into trimmed fields.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields.into_iter().map(|f| clean_field(&f)).collect()
}

fn clean_field(raw: &str) -> String {
    let s = raw.strip_prefix('"').unwrap_or(raw);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        assert_eq!(
            split_line("1/5/2025,Deposit,Pay,3500.00,5200.00"),
            vec!["1/5/2025", "Deposit", "Pay", "3500.00", "5200.00"]
        );
    }

    #[test]
    fn test_quoted_comma_is_kept() {
        assert_eq!(
            split_line(r#"1/5/2025,Deposit,"Pay, bonus","$1,200.00",5200"#),
            vec!["1/5/2025", "Deposit", "Pay, bonus", "$1,200.00", "5200"]
        );
    }

    #[test]
    fn test_whitespace_trimmed_and_empty_fields() {
        assert_eq!(split_line("  a , ,b  ,"), vec!["a", "", "b", ""]);
        assert_eq!(split_line(""), vec![""]);
    }

    #[test]
    fn test_unbalanced_quote_degrades() {
        assert_eq!(split_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_carriage_return_trimmed() {
        assert_eq!(split_line("a,b\r"), vec!["a", "b"]);
    }
}
