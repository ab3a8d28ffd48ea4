//! The upsert pass: describe → update-or-create over the manifest.
//!
//! Best-effort by design. Every entry is independent: a failure is counted
//! and reported, never retried or rolled back, and the remaining entries are
//! still attempted. The process exits 0 even when some entries failed; the
//! tally is the record of what happened.

use tracing::debug;

use crate::error::Result;
use crate::manifest::ManifestEntry;
use crate::output;
use crate::store::SecretStore;

/// Outcome counts for one upsert run.
///
/// `created + updated + failed` always equals the number of manifest entries
/// processed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Upsert every manifest entry into the store, in manifest order.
///
/// For each entry: if the secret exists its value is overwritten, otherwise
/// it is created with value and description. `NotFound` from describe is the
/// expected create-path signal; any other store error on any call marks the
/// entry failed and moves on. Emits a `[CREATE]`/`[UPDATE]`/`[FAILED]` line
/// per entry.
pub fn run(store: &dyn SecretStore, entries: &[ManifestEntry]) -> Tally {
    let mut tally = Tally::default();

    for entry in entries {
        match upsert_entry(store, entry) {
            Ok(Outcome::Created) => {
                output::created(&entry.name);
                tally.created += 1;
            }
            Ok(Outcome::Updated) => {
                output::updated(&entry.name);
                tally.updated += 1;
            }
            Err(e) => {
                output::failed(&entry.name, &e.to_string());
                tally.failed += 1;
            }
        }
    }

    debug!(
        created = tally.created,
        updated = tally.updated,
        failed = tally.failed,
        "upsert pass complete"
    );
    tally
}

enum Outcome {
    Created,
    Updated,
}

fn upsert_entry(store: &dyn SecretStore, entry: &ManifestEntry) -> Result<Outcome> {
    match store.describe(&entry.name) {
        Ok(_) => {
            store.update(&entry.name, &entry.value)?;
            Ok(Outcome::Updated)
        }
        Err(e) if e.is_not_found() => {
            store.create(&entry.name, &entry.value, &entry.description)?;
            Ok(Outcome::Created)
        }
        Err(e) => Err(e),
    }
}

/// Print the closing banner, the tally, and the post-provisioning hints.
pub fn print_summary(tally: &Tally) {
    output::banner("SECRETS CREATION COMPLETE", 88);
    println!("Results:");
    output::kv("Created", tally.created);
    output::kv("Updated", tally.updated);
    output::kv("Failed", tally.failed);
    println!();
    println!("Next Steps:");
    output::hint("1. Update all placeholder values with your actual AWS resource IDs");
    output::hint("2. Go to AWS Secrets Manager console to edit each secret");
    output::hint("3. Add secrets to GitHub Actions repository settings");
    println!();
}
