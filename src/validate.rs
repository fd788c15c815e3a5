use std::sync::LazyLock;

use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NAME_LEN: usize = 50;
pub const MIN_HANDLE_LEN: usize = 3;
pub const MAX_HANDLE_LEN: usize = 20;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+([._][a-z0-9]+)?@\w+\.\w{2,3}$").expect("email pattern compiles")
});

pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Only the length is checked, so six spaces is a valid password.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

pub fn validate_name(name: &str) -> bool {
    !name.trim().is_empty() && name.chars().count() <= MAX_NAME_LEN
}

pub fn validate_handle(handle: &str) -> bool {
    let len = handle.trim().chars().count();
    (MIN_HANDLE_LEN..=MAX_HANDLE_LEN).contains(&len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_emails() {
        for email in [
            "",
            "abcgmail.com",
            "TESTING@GMAIL.COM",
            "TESTING@gmail.com",
            "@ndrew@gm@il.com",
            "5#$%@gmail.com",
            "domain@email.long",
            "shouldbevalid@yahoo.com.au",
            "@gmail.com",
            "d.o.t@double.com",
            "invalid@invalid.invalid",
            "ew9ijifewji90ejwiffjiifji1j2j@",
            "@.com",
            "          ",
        ] {
            assert!(!validate_email(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn accepts_plain_emails() {
        for email in [
            "a@gmail.com",
            "abcdefghijklmnopqrstuvwxyz@gmail.com",
            "abc@alsdkjfhadslkfhsdajkfasdfdsadfadsadfdsf.com",
            "email@example.co",
            "5py@unitedstates.ru",
            "dot.dot@dot.com",
            "sc_re@under.com",
        ] {
            assert!(validate_email(email), "{email:?} should be accepted");
        }
    }

    #[test]
    fn password_length_is_the_only_rule() {
        assert!(!validate_password("12345"));
        assert!(!validate_password("1234 "));
        assert!(!validate_password(""));
        assert!(validate_password("123456"));
        assert!(validate_password("      "));
    }

    #[test]
    fn names_are_trimmed_and_capped() {
        assert!(!validate_name(""));
        assert!(!validate_name("   "));
        assert!(!validate_name(&"a".repeat(51)));
        assert!(validate_name("c"));
        assert!(validate_name(&"c".repeat(50)));
    }

    #[test]
    fn handle_bounds() {
        assert!(!validate_handle("h"));
        assert!(!validate_handle("hi"));
        assert!(!validate_handle("   "));
        assert!(!validate_handle("thisistwentyonechars!"));
        assert!(validate_handle("dog"));
        assert!(validate_handle("twentycharacterslong"));
        assert!(validate_handle("Real Bruce Lee"));
    }
}
