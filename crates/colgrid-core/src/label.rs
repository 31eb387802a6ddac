///
/// derive_label
///
/// Turn a camelCase field identifier into a display label.
///
/// A space is inserted before every ASCII upper-case character and the first
/// character of the result is upper-cased. Nothing else changes, so runs of
/// capitals are split (`userID` becomes `User I D`) and a leading capital
/// keeps its leading space.
///

#[must_use]
pub fn derive_label(field: &str) -> String {
    let mut label = String::with_capacity(field.len() + field.len() / 2);

    for c in field.chars() {
        if c.is_ascii_uppercase() {
            label.push(' ');
        }
        label.push(c);
    }

    // ucfirst
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }

    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_camel_case() {
        assert_eq!(derive_label("firstName"), "First Name");
        assert_eq!(derive_label("createdAtUtc"), "Created At Utc");
    }

    #[test]
    fn single_word_is_capitalized() {
        assert_eq!(derive_label("id"), "Id");
        assert_eq!(derive_label("email"), "Email");
    }

    #[test]
    fn capital_runs_are_not_merged() {
        assert_eq!(derive_label("userID"), "User I D");
    }

    #[test]
    fn leading_capital_keeps_its_space() {
        assert_eq!(derive_label("Name"), " Name");
    }

    #[test]
    fn empty_and_non_ascii_inputs_pass_through() {
        assert_eq!(derive_label(""), "");
        assert_eq!(derive_label("élan"), "élan");
        assert_eq!(derive_label("snake_case"), "Snake_case");
    }

    proptest! {
        #[test]
        fn only_spaces_are_added(field in "[a-zA-Z0-9_]{0,24}") {
            let label = derive_label(&field);
            let stripped: String = label.chars().filter(|c| *c != ' ').collect();

            prop_assert_eq!(stripped.to_ascii_lowercase(), field.to_ascii_lowercase());
            prop_assert_eq!(
                label.len(),
                field.len() + field.chars().filter(char::is_ascii_uppercase).count()
            );
        }

        #[test]
        fn deterministic(field in "\\PC{0,16}") {
            prop_assert_eq!(derive_label(&field), derive_label(&field));
        }
    }
}
