//! Provision and verify the SocialClub deployment secrets in AWS Secrets Manager.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── bin/
//! │   ├── create_secrets   # Upsert the manifest into the store
//! │   └── verify_secrets   # Verify the store against the manifest
//! ├── manifest             # Manifest of expected secrets (built-in or JSON file)
//! ├── store                # SecretStore trait + AWS Secrets Manager backend
//! ├── upsert               # describe → update-or-create pass with tally
//! ├── verify               # list + compare pass with OK/EXTRA/MISSING report
//! └── output               # Terminal output helpers
//! ```
//!
//! # Behavior
//!
//! - Upsert is best-effort: a failing entry is counted and reported, the
//!   remaining entries are still attempted, and the process exits 0.
//! - Verification success is count-based: it passes iff the number of secrets
//!   found under the namespace prefix equals the number of expected names.

pub mod error;
pub mod manifest;
pub mod output;
pub mod store;
pub mod upsert;
pub mod verify;
