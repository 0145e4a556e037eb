pub const MIN_PASSWORD_LENGTH: usize = 6;

/// 密碼長度至少 6 個字元，沒有其他組成規則
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

pub fn is_username_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

/// 使用者名稱只允許小寫字母、數字與 '-'
pub fn validate_username_format(name: &str) -> bool {
    name.chars().all(is_username_char)
}

pub fn validate_email_format(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_length_boundary() {
        assert!(!validate_password(""));
        assert!(!validate_password("abcde"));
        assert!(validate_password("abcdef"));
        assert!(validate_password("p@ssw0rd!"));
    }

    #[test]
    fn test_validate_password_counts_characters_not_bytes() {
        // 5 個字元，但超過 6 bytes
        assert!(!validate_password("ééééé"));
        assert!(validate_password("éééééé"));
    }

    #[test]
    fn test_validate_username_format() {
        assert!(validate_username_format("a-user"));
        assert!(validate_username_format("student42"));
        assert!(!validate_username_format("A-User"));
        assert!(!validate_username_format("a.user"));
        assert!(!validate_username_format("a_user"));
        assert!(!validate_username_format("a user"));
        assert!(!validate_username_format("ü"));
    }

    #[test]
    fn test_validate_email_format() {
        assert!(validate_email_format("a.user@galaxy.ac.uk"));
        assert!(!validate_email_format("a.user"));
        assert!(!validate_email_format("@galaxy.ac.uk"));
        assert!(!validate_email_format("a.user@"));
        assert!(!validate_email_format("a@b@c"));
        assert!(!validate_email_format("a user@galaxy.ac.uk"));
    }
}
