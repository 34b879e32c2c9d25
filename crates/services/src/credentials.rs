use topics_core::model::UserKey;

/// A single entry in the fixed credential set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    key: UserKey,
    password: String,
    display_name: String,
}

impl CredentialRecord {
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            key: UserKey::new(email),
            password: password.into(),
            display_name: display_name.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &UserKey {
        &self.key
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Fixed set of known accounts, queried by exact email and password match.
///
/// This is a demo lookup, not a security boundary; there is no hashing and
/// no partial or fuzzy matching.
#[derive(Debug, Clone)]
pub struct CredentialDirectory {
    records: Vec<CredentialRecord>,
}

impl CredentialDirectory {
    #[must_use]
    pub fn new(records: Vec<CredentialRecord>) -> Self {
        Self { records }
    }

    /// The two built-in test accounts.
    #[must_use]
    pub fn demo() -> Self {
        Self::new(vec![
            CredentialRecord::new("john@example.com", "john123", "John"),
            CredentialRecord::new("jane@example.com", "jane123", "Jane"),
        ])
    }

    /// Look up a record matching both email and password exactly.
    #[must_use]
    pub fn verify(&self, email: &str, password: &str) -> Option<&CredentialRecord> {
        self.records
            .iter()
            .find(|r| r.key.as_str() == email && r.password == password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_returns_the_record() {
        let directory = CredentialDirectory::demo();
        let record = directory.verify("john@example.com", "john123").unwrap();
        assert_eq!(record.display_name(), "John");
    }

    #[test]
    fn wrong_password_is_no_match() {
        let directory = CredentialDirectory::demo();
        assert!(directory.verify("john@example.com", "jane123").is_none());
    }

    #[test]
    fn unknown_email_is_no_match() {
        let directory = CredentialDirectory::demo();
        assert!(directory.verify("nobody@example.com", "john123").is_none());
    }

    #[test]
    fn matching_is_case_sensitive() {
        let directory = CredentialDirectory::demo();
        assert!(directory.verify("John@example.com", "john123").is_none());
    }
}
