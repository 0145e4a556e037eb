use crate::core::credentials::{validate_email_format, validate_password, validate_username_format};
use crate::core::identity::{derive_username_from_email, normalize_email};
use crate::domain::model::{AccountRequest, BatchRecord};
use crate::utils::error::{ProvisionError, Result};
use std::collections::HashSet;
use std::io::Read;

/// 讀取 TSV 名冊：`email<TAB>password[<TAB>name]`
///
/// 空白行與 `#` 開頭的行會被略過，欄位前後空白會被去除。
pub fn read_records<R: Read>(reader: R) -> Result<Vec<BatchRecord>> {
    let mut tsv = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in tsv.records() {
        let row = row?;
        let field = |i: usize| row.get(i).filter(|v| !v.is_empty()).map(str::to_string);

        let Some(email) = field(0) else {
            // 只有空白的行
            if row.iter().all(str::is_empty) {
                continue;
            }
            let line = row.position().map_or(0, |p| p.line());
            return Err(ProvisionError::malformed_input(format!(
                "line {}: no email supplied",
                line
            )));
        };
        records.push(BatchRecord {
            email: normalize_email(&email),
            password: field(1),
            name: field(2),
        });
    }

    Ok(records)
}

/// 檢查名冊內容並轉成建立請求。
///
/// 重複的 email、缺少或不合規的密碼、不合法的名稱都會讓整批失敗。
pub fn prepare_requests(records: Vec<BatchRecord>) -> Result<Vec<AccountRequest>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut requests = Vec::with_capacity(records.len());

    for record in records {
        let BatchRecord {
            email,
            password,
            name,
        } = record;

        if !seen.insert(email.clone()) {
            return Err(ProvisionError::malformed_input(format!(
                "{}: appears multiple times",
                email
            )));
        }
        if !validate_email_format(&email) {
            return Err(ProvisionError::malformed_input(format!(
                "{}: invalid email address",
                email
            )));
        }

        let password = password.ok_or_else(|| {
            ProvisionError::malformed_input(format!("{}: no password supplied", email))
        })?;
        if !validate_password(&password) {
            return Err(ProvisionError::policy(format!("{}: invalid password", email)));
        }

        let name = match name {
            Some(name) if !validate_username_format(&name) => {
                return Err(ProvisionError::policy(format!(
                    "{}: invalid name '{}': must contain only lower-case letters, numbers and '-'",
                    email, name
                )));
            }
            Some(name) => name,
            None => derive_username_from_email(&email),
        };

        requests.push(AccountRequest {
            email,
            name,
            password: Some(password),
        });
    }

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<AccountRequest>> {
        prepare_requests(read_records(content.as_bytes())?)
    }

    #[test]
    fn test_read_records_skips_blank_and_comment_lines() {
        let content = "# roster for course\n\
                       a.user@galaxy.ac.uk\tp@ssw0rd\ta-user\n\
                       \n\
                       \t  \n\
                       B.User@Galaxy.ac.uk\tsecret99\n";
        let records = read_records(content.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name.as_deref(), Some("a-user"));
        assert_eq!(records[1].email, "b.user@galaxy.ac.uk");
        assert_eq!(records[1].name, None);
    }

    #[test]
    fn test_row_without_email_is_fatal() {
        let err = read_records("a@x.org\tpassword1\n\tpassword2\tbee\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ProvisionError::MalformedInput { .. }));
        assert_eq!(err.to_string(), "line 2: no email supplied");
    }

    #[test]
    fn test_password_quotes_are_literal() {
        let records = read_records("a@x.org\t\"quoted\"pw\n".as_bytes()).unwrap();
        assert_eq!(records[0].password.as_deref(), Some("\"quoted\"pw"));
    }

    #[test]
    fn test_prepare_derives_missing_names() {
        let requests = parse("first.last@x.org\tpassword1\n").unwrap();
        assert_eq!(requests[0].name, "first-last");
        assert_eq!(requests[0].password.as_deref(), Some("password1"));
    }

    #[test]
    fn test_duplicate_email_is_fatal() {
        let err = parse("dup@x.org\tpassword1\nDUP@x.org\tpassword2\n").unwrap_err();
        assert!(matches!(err, ProvisionError::MalformedInput { .. }));
        assert!(err.to_string().contains("appears multiple times"));
    }

    #[test]
    fn test_missing_password_is_fatal() {
        let err = parse("a@x.org\n").unwrap_err();
        assert!(err.to_string().contains("no password supplied"));
    }

    #[test]
    fn test_short_password_is_fatal() {
        let err = parse("a@x.org\tabc\n").unwrap_err();
        assert!(matches!(err, ProvisionError::PolicyViolation { .. }));
    }

    #[test]
    fn test_invalid_explicit_name_is_fatal() {
        let err = parse("a@x.org\tpassword1\tA_User\n").unwrap_err();
        assert!(matches!(err, ProvisionError::PolicyViolation { .. }));
    }
}
