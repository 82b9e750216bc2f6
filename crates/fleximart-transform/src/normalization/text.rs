//! Text normalization.

/// Title-case a label: the first letter of every run of letters is upper
/// case, the rest lower case. Non-letters pass through and end a run, so
/// `"home & KITCHEN"` becomes `"Home & Kitchen"`.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case("electronics"), "Electronics");
        assert_eq!(title_case("home & KITCHEN"), "Home & Kitchen");
        assert_eq!(title_case("sports-outdoor"), "Sports-Outdoor");
        assert_eq!(title_case(""), "");
    }
}
