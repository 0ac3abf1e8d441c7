use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::constants::MAX_CREDENTIAL_LENGTH;

/// One record of the credential file.
#[derive(Debug, Clone)]
struct UserRecord {
    username: String,
    password: String,
}

/// Read-only credential store, loaded once at startup.
///
/// The backing file is a two-column CSV, one `username,password` record per
/// line with no header. A trailing CR is tolerated. Empty and malformed lines
/// are skipped. Duplicate usernames keep the first record.
#[derive(Debug, Default)]
pub struct UserStore {
    users: Vec<UserRecord>,
}

impl UserStore {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open user file: {}", path.display()))?;
        let store = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} user(s) from {}",
            store.users.len(),
            path.display()
        );
        Ok(store)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut users = Vec::new();
        for (lineno, line) in reader.lines().enumerate() {
            let line = line.context("Failed to read user file")?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            match parse_record(line) {
                Some(record) => users.push(record),
                None => warn!("Skipping malformed user record on line {}", lineno + 1),
            }
        }
        Ok(Self { users })
    }

    /// Looks up the password of `username`. First match wins.
    pub fn lookup(&self, username: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|record| record.username == username)
            .map(|record| record.password.as_str())
    }

    /// Exact byte comparison of both columns.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.lookup(username) == Some(password)
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

fn parse_record(line: &str) -> Option<UserRecord> {
    let mut fields = line.split(',');
    let username = fields.next()?;
    let password = fields.next()?;
    if username.is_empty() || password.is_empty() {
        return None;
    }
    if username.len() > MAX_CREDENTIAL_LENGTH || password.len() > MAX_CREDENTIAL_LENGTH {
        return None;
    }
    Some(UserRecord {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn store(data: &str) -> UserStore {
        UserStore::from_reader(Cursor::new(data.to_string())).unwrap()
    }

    #[test]
    fn parses_two_column_records() {
        let store = store("alice,wonderland\nbob,builder\n");
        assert_eq!(store.lookup("alice"), Some("wonderland"));
        assert_eq!(store.lookup("bob"), Some("builder"));
        assert_eq!(store.lookup("carol"), None);
    }

    #[test]
    fn tolerates_crlf_line_endings() {
        let store = store("alice,wonderland\r\nbob,builder\r\n");
        assert!(store.verify("alice", "wonderland"));
        assert!(store.verify("bob", "builder"));
    }

    #[test]
    fn skips_empty_and_malformed_lines() {
        let store = store("\nalice,wonderland\nno-comma-here\n,missinguser\nmissingpass,\n");
        assert!(store.verify("alice", "wonderland"));
        assert_eq!(store.lookup("no-comma-here"), None);
        assert_eq!(store.lookup(""), None);
        assert_eq!(store.lookup("missingpass"), None);
    }

    #[test]
    fn first_duplicate_wins() {
        let store = store("alice,first\nalice,second\n");
        assert_eq!(store.lookup("alice"), Some("first"));
        assert!(store.verify("alice", "first"));
        assert!(!store.verify("alice", "second"));
    }

    #[test]
    fn verify_is_exact() {
        let store = store("alice,wonderland\n");
        assert!(!store.verify("alice", "Wonderland"));
        assert!(!store.verify("Alice", "wonderland"));
        assert!(!store.verify("alice", "wonderland "));
    }

    #[test]
    fn rejects_overlong_fields() {
        let long = "x".repeat(50);
        let store = store(&format!("{},pw\nok,{}\nalice,wonderland\n", long, long));
        assert_eq!(store.lookup(&long), None);
        assert_eq!(store.lookup("ok"), None);
        assert!(store.verify("alice", "wonderland"));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let store = store("alice,wonderland,extra\n");
        assert_eq!(store.lookup("alice"), Some("wonderland"));
    }
}
