//! The in-memory account → secret map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Mapping of account names to secret values.
///
/// Backed by a `BTreeMap` so that iteration order, and therefore the
/// serialized form, depends only on the contents and never on the order
/// entries were inserted in.  Secret values are wiped when they are
/// replaced, removed, or when the vault is dropped.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vault {
    entries: BTreeMap<String, String>,
}

impl Vault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the secret for `account`.
    ///
    /// Returns `true` if an existing secret was replaced.
    pub fn insert(&mut self, account: &str, secret: &str) -> bool {
        match self.entries.insert(account.to_string(), secret.to_string()) {
            Some(mut previous) => {
                previous.zeroize();
                true
            }
            None => false,
        }
    }

    /// Look up the secret for `account` by exact name.
    pub fn get(&self, account: &str) -> Option<&str> {
        self.entries.get(account).map(String::as_str)
    }

    /// Remove `account`, returning whether it was present.
    pub fn remove(&mut self, account: &str) -> bool {
        match self.entries.remove(account) {
            Some(mut secret) => {
                secret.zeroize();
                true
            }
            None => false,
        }
    }

    /// Returns `true` if the vault holds a secret for `account`.
    pub fn contains(&self, account: &str) -> bool {
        self.entries.contains_key(account)
    }

    /// All account names, in ascending order.
    pub fn accounts(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for Vault {
    fn drop(&mut self) {
        for secret in self.entries.values_mut() {
            secret.zeroize();
        }
    }
}

impl fmt::Debug for Vault {
    // Account names only; secrets never reach logs or panic messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_overwrite() {
        let mut vault = Vault::new();
        assert!(!vault.insert("email", "one"));
        assert!(vault.insert("email", "two"));
        assert_eq!(vault.get("email"), Some("two"));
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn lookups_are_exact() {
        let mut vault = Vault::new();
        vault.insert("Email", "pw");
        assert_eq!(vault.get("email"), None);
        assert_eq!(vault.get("Email "), None);
        assert_eq!(vault.get("Email"), Some("pw"));
    }

    #[test]
    fn remove_missing_is_false() {
        let mut vault = Vault::new();
        assert!(!vault.remove("nobody"));
        vault.insert("bank", "123");
        assert!(vault.remove("bank"));
        assert!(vault.is_empty());
    }

    #[test]
    fn accounts_are_sorted() {
        let mut vault = Vault::new();
        vault.insert("zeta", "1");
        vault.insert("alpha", "2");
        vault.insert("mid", "3");
        assert_eq!(vault.accounts(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn debug_hides_secrets() {
        let mut vault = Vault::new();
        vault.insert("email", "hunter2");
        let shown = format!("{vault:?}");
        assert!(shown.contains("email"));
        assert!(!shown.contains("hunter2"));
    }
}
