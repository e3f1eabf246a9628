//! Go identifier derivation from database names.
//!
//! Database identifiers are typically snake_case while generated Go
//! struct and field names must be exported, so every derived name starts
//! with a capital letter. Only ASCII case folding is applied; bytes
//! outside ASCII pass through untouched.

use crate::error::DbScribeError;

/// Naming style applied to table and column names when deriving Go
/// identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStyle {
    /// `user_id` becomes `UserId`
    Camel,
    /// `user_id` becomes `User_id`
    Title,
}

impl NamingStyle {
    /// Applies the style to a database identifier.
    pub fn apply(self, name: &str) -> String {
        match self {
            NamingStyle::Camel => camel_case(name),
            NamingStyle::Title => title_case(name),
        }
    }
}

impl std::str::FromStr for NamingStyle {
    type Err = DbScribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "camel" => Ok(NamingStyle::Camel),
            "title" => Ok(NamingStyle::Title),
            other => Err(DbScribeError::configuration(format!(
                "Unsupported naming style '{other}' (expected camel or title)"
            ))),
        }
    }
}

/// Capitalizes the first character and leaves the rest of the name,
/// underscores included, untouched.
pub fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut result = String::with_capacity(name.len());
            result.push(first.to_ascii_uppercase());
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}

/// Converts a snake_case identifier to CamelCase.
///
/// Each underscore-delimited segment is lower-cased and then
/// capitalized. A name without underscores only has its first character
/// capitalized, so already camel-cased input passes through unchanged.
pub fn camel_case(name: &str) -> String {
    if !name.contains('_') {
        return title_case(name);
    }

    name.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| title_case(&segment.to_ascii_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_basic() {
        assert_eq!(camel_case("user_id"), "UserId");
        assert_eq!(camel_case("email"), "Email");
        assert_eq!(camel_case("created_at_ts"), "CreatedAtTs");
    }

    #[test]
    fn test_camel_case_folds_uppercase_segments() {
        assert_eq!(camel_case("USER_ID"), "UserId");
        assert_eq!(camel_case("users_PK"), "UsersPk");
    }

    #[test]
    fn test_camel_case_is_idempotent() {
        for name in ["user_id", "UserId", "order_line_item", "HTTPStatus"] {
            let once = camel_case(name);
            assert_eq!(camel_case(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn test_camel_case_skips_empty_segments() {
        assert_eq!(camel_case("_id"), "Id");
        assert_eq!(camel_case("id_"), "Id");
        assert_eq!(camel_case("user__id"), "UserId");
        assert_eq!(camel_case("__"), "");
    }

    #[test]
    fn test_title_case_preserves_underscores() {
        assert_eq!(title_case("user_id"), "User_id");
        assert_eq!(title_case("email"), "Email");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_is_idempotent() {
        assert_eq!(title_case("User_id"), "User_id");
    }

    #[test]
    fn test_apply_dispatches_on_style() {
        assert_eq!(NamingStyle::Camel.apply("user_id"), "UserId");
        assert_eq!(NamingStyle::Title.apply("user_id"), "User_id");
    }

    #[test]
    fn test_parse_naming_style() {
        assert_eq!("camel".parse::<NamingStyle>().ok(), Some(NamingStyle::Camel));
        assert_eq!("Title".parse::<NamingStyle>().ok(), Some(NamingStyle::Title));
        assert!("snake".parse::<NamingStyle>().is_err());
    }
}
