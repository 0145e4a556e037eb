use crate::core::credentials::is_username_char;
use crate::utils::error::{ProvisionError, Result};
use std::ops::RangeInclusive;

pub const PLACEHOLDER: char = '#';

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// 由 email 的 local part 產生使用者名稱，不合法字元一律換成 '-'
pub fn derive_username_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    local
        .to_lowercase()
        .chars()
        .map(|c| if is_username_char(c) { c } else { '-' })
        .collect()
}

/// A template email address such as `student#@galaxy.ac.uk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    local_part: String,
    domain: String,
}

impl EmailTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        let malformed = || ProvisionError::MalformedTemplate {
            template: template.to_string(),
        };

        let (local_part, domain) = template.split_once('@').ok_or_else(malformed)?;
        if domain.contains('@')
            || local_part.matches(PLACEHOLDER).count() != 1
            || domain.contains(PLACEHOLDER)
        {
            return Err(malformed());
        }

        Ok(Self {
            local_part: local_part.to_string(),
            domain: domain.to_string(),
        })
    }

    pub fn render(&self, index: u64) -> String {
        format!(
            "{}@{}",
            self.local_part.replace(PLACEHOLDER, &index.to_string()),
            self.domain
        )
    }

    /// `end` 省略時只產生 `start` 一筆
    pub fn expand(&self, start: u64, end: Option<u64>) -> Result<TemplateExpansion> {
        let end = end.unwrap_or(start);
        if start > end {
            return Err(ProvisionError::malformed_input(format!(
                "Invalid index range: start {} is greater than end {}",
                start, end
            )));
        }
        Ok(TemplateExpansion {
            template: self.clone(),
            indices: start..=end,
        })
    }
}

/// Lazy, restartable sequence of emails generated from an [`EmailTemplate`].
#[derive(Debug, Clone)]
pub struct TemplateExpansion {
    template: EmailTemplate,
    indices: RangeInclusive<u64>,
}

impl Iterator for TemplateExpansion {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.indices.next().map(|i| self.template.render(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

pub fn expand_template(template: &str, start: u64, end: Option<u64>) -> Result<TemplateExpansion> {
    EmailTemplate::parse(template)?.expand(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::credentials::validate_username_format;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A.User@Galaxy.AC.uk \n"), "a.user@galaxy.ac.uk");
    }

    #[test]
    fn test_derive_username_from_email() {
        assert_eq!(derive_username_from_email("a.user@galaxy.ac.uk"), "a-user");
        assert_eq!(derive_username_from_email("Student_01@x.org"), "student-01");
        assert_eq!(derive_username_from_email("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn test_derived_username_always_valid() {
        let emails = [
            "a.user@galaxy.ac.uk",
            "ÉLODIE+tag@example.com",
            "weird!#$%&'*/=?^`{|}~@x.org",
            "",
            "@domain.only",
            "İstanbul@x.org",
        ];
        for email in emails {
            let name = derive_username_from_email(email);
            assert!(validate_username_format(&name), "{:?} -> {:?}", email, name);
        }
    }

    #[test]
    fn test_expand_template_range() {
        let emails: Vec<String> = expand_template("student#@x.org", 1, Some(3)).unwrap().collect();
        assert_eq!(emails, vec!["student1@x.org", "student2@x.org", "student3@x.org"]);
    }

    #[test]
    fn test_expand_template_end_defaults_to_start() {
        let emails: Vec<String> = expand_template("student#@x.org", 7, None).unwrap().collect();
        assert_eq!(emails, vec!["student7@x.org"]);
    }

    #[test]
    fn test_expansion_is_restartable() {
        let expansion = expand_template("user#@x.org", 10, Some(12)).unwrap();
        let first: Vec<String> = expansion.clone().collect();
        let second: Vec<String> = expansion.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_malformed_templates() {
        for template in ["a##@x.org", "a@##x.org", "a@#x.org", "a@x.org", "a#x.org", "a#@b@c"] {
            assert!(
                matches!(
                    expand_template(template, 1, Some(2)),
                    Err(ProvisionError::MalformedTemplate { .. })
                ),
                "{} should be rejected",
                template
            );
        }
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        assert!(matches!(
            expand_template("student#@x.org", 5, Some(2)),
            Err(ProvisionError::MalformedInput { .. })
        ));
    }
}
