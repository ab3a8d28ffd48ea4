//! The verification pass: list the namespace, compare against the manifest.
//!
//! Read-only. Found secrets are marked OK or EXTRA in store order, expected
//! names that were not found are appended as MISSING. The aggregate result is
//! count-based: the pass succeeds iff the number of secrets found under the
//! prefix equals the number of expected names, regardless of which names
//! matched. A renamed secret plus an absent expected one can therefore still
//! report success; the listing makes the drift visible, the aggregate does
//! not.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::output;
use crate::store::SecretStore;

/// Per-name verification status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Found in the store and expected by the manifest.
    Ok,
    /// Found in the store but not expected.
    Extra,
    /// Expected by the manifest but not found.
    Missing,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "OK"),
            Status::Extra => write!(f, "EXTRA"),
            Status::Missing => write!(f, "MISSING"),
        }
    }
}

/// One row of the verification listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub status: Status,
}

/// Result of one verification run.
#[derive(Debug, Clone)]
pub struct Verification {
    /// Found secrets in store order, then missing names in sorted order.
    pub items: Vec<Item>,
    /// Number of secrets found under the prefix.
    pub found: usize,
    /// Number of names the manifest expects.
    pub expected: usize,
}

impl Verification {
    /// Count-based success criterion: found exactly as many as expected.
    pub fn passed(&self) -> bool {
        self.found == self.expected
    }
}

/// List all secrets under `prefix` and compare against `expected`.
///
/// # Errors
///
/// Returns the store error if the listing fails; there is no per-item error
/// path on the read side.
pub fn run(
    store: &dyn SecretStore,
    expected: &BTreeSet<String>,
    prefix: &str,
) -> Result<Verification> {
    let records = store.list(prefix)?;
    let found = records.len();
    debug!(prefix, found, expected = expected.len(), "verifying secrets");

    let mut items: Vec<Item> = Vec::with_capacity(found);
    let mut seen = BTreeSet::new();

    for record in records {
        let status = if expected.contains(&record.name) {
            Status::Ok
        } else {
            Status::Extra
        };
        seen.insert(record.name.clone());
        items.push(Item {
            name: record.name,
            status,
        });
    }

    for name in expected {
        if !seen.contains(name) {
            items.push(Item {
                name: name.clone(),
                status: Status::Missing,
            });
        }
    }

    Ok(Verification {
        items,
        found,
        expected: expected.len(),
    })
}

/// Print the verification banner, the numbered listing, and the final
/// SUCCESS/WARNING line.
pub fn print_report(verification: &Verification, prefix: &str) {
    output::banner(
        &format!("{} SECRETS - VERIFICATION", prefix.to_uppercase()),
        80,
    );

    println!(
        "Total Secrets Found: {}/{}\n",
        verification.found, verification.expected
    );
    println!("AWS Secrets Manager Contents:\n");

    for (i, item) in verification.items.iter().enumerate() {
        output::listing_row(i + 1, &item.name, &item.status.to_string());
    }

    println!();
    output::rule(80);
    if verification.passed() {
        output::success(&format!(
            "SUCCESS: All {} {} secrets are present in AWS!",
            verification.expected, prefix
        ));
    } else {
        output::warn(&format!(
            "WARNING: Found {}/{} secrets",
            verification.found, verification.expected
        ));
    }
    output::rule(80);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fake::FakeStore;

    fn expected(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn all_expected_secrets_present_passes() {
        let store = FakeStore::with_secrets(&[
            ("socialclub/a", "1"),
            ("socialclub/b", "2"),
        ]);
        let names = expected(&["socialclub/a", "socialclub/b"]);

        let v = run(&store, &names, "socialclub").unwrap();

        assert!(v.passed());
        assert_eq!(v.found, 2);
        assert_eq!(v.expected, 2);
        assert!(v.items.iter().all(|i| i.status == Status::Ok));
    }

    #[test]
    fn missing_secret_fails_and_is_listed() {
        let store = FakeStore::with_secrets(&[("socialclub/a", "1")]);
        let names = expected(&["socialclub/a", "socialclub/b"]);

        let v = run(&store, &names, "socialclub").unwrap();

        assert!(!v.passed());
        assert_eq!(v.found, 1);
        assert_eq!(
            v.items,
            vec![
                Item {
                    name: "socialclub/a".to_string(),
                    status: Status::Ok,
                },
                Item {
                    name: "socialclub/b".to_string(),
                    status: Status::Missing,
                },
            ]
        );
    }

    #[test]
    fn unexpected_secret_is_marked_extra() {
        let store = FakeStore::with_secrets(&[
            ("socialclub/a", "1"),
            ("socialclub/rogue", "?"),
        ]);
        let names = expected(&["socialclub/a"]);

        let v = run(&store, &names, "socialclub").unwrap();

        let rogue = v
            .items
            .iter()
            .find(|i| i.name == "socialclub/rogue")
            .unwrap();
        assert_eq!(rogue.status, Status::Extra);
    }

    #[test]
    fn listing_is_scoped_to_the_prefix() {
        let store = FakeStore::with_secrets(&[
            ("socialclub/a", "1"),
            ("otherapp/a", "1"),
        ]);
        let names = expected(&["socialclub/a"]);

        let v = run(&store, &names, "socialclub").unwrap();

        assert_eq!(v.found, 1);
        assert!(v.items.iter().all(|i| i.name != "otherapp/a"));
    }

    #[test]
    fn matching_count_passes_even_when_names_drift() {
        // One expected name is absent and one unexpected extra takes its
        // place: the count still matches, so the aggregate reports success.
        let store = FakeStore::with_secrets(&[
            ("socialclub/a", "1"),
            ("socialclub/renamed", "2"),
        ]);
        let names = expected(&["socialclub/a", "socialclub/b"]);

        let v = run(&store, &names, "socialclub").unwrap();

        assert!(v.passed());
        let statuses: Vec<Status> = v.items.iter().map(|i| i.status).collect();
        assert!(statuses.contains(&Status::Extra));
        assert!(statuses.contains(&Status::Missing));
    }

    #[test]
    fn list_failure_propagates() {
        let store = FakeStore::empty().deny("socialclub", "access denied");
        let names = expected(&["socialclub/a"]);

        assert!(run(&store, &names, "socialclub").is_err());
    }
}
