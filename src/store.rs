//! Secret store boundary.
//!
//! `SecretStore` abstracts the external secrets-management service so the
//! upsert and verify passes can run against either AWS Secrets Manager or an
//! in-memory fake in tests. The store owns atomicity per individual call;
//! nothing here imposes a cross-call transaction.
//!
//! `AwsStore` drives the async AWS SDK from a current-thread tokio runtime,
//! with region and credentials resolved by the SDK's default provider chain
//! (AWS_ACCESS_KEY_ID, shared config, instance metadata, etc.).

use tracing::debug;

use crate::error::{Error, Result};

/// The slice of a stored secret this system consumes.
///
/// The store owns the full record (value, metadata, versions); we only ever
/// look at names and descriptions, and never hold a record beyond the scope
/// of a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    pub name: String,
    pub description: Option<String>,
}

/// External secret store operations.
pub trait SecretStore {
    /// Look up an existing secret by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` when no secret with that name exists, and
    /// `Error::Store` for any other service failure.
    fn describe(&self, name: &str) -> Result<SecretRecord>;

    /// Create a new secret with an initial value and description.
    fn create(&self, name: &str, value: &str, description: &str) -> Result<()>;

    /// Overwrite the value of an existing secret.
    fn update(&self, name: &str, value: &str) -> Result<()>;

    /// List all secrets whose name matches the given prefix.
    fn list(&self, prefix: &str) -> Result<Vec<SecretRecord>>;
}

/// AWS Secrets Manager backend.
pub struct AwsStore {
    client: aws_sdk_secretsmanager::Client,
    runtime: tokio::runtime::Runtime,
}

impl AwsStore {
    /// Connect using the ambient AWS configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Runtime` if the tokio runtime cannot be built. Missing
    /// credentials surface later, on the first store call.
    pub fn connect() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Runtime(format!("failed to create runtime: {}", e)))?;

        let client = runtime.block_on(async {
            let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            aws_sdk_secretsmanager::Client::new(&config)
        });

        Ok(Self { client, runtime })
    }
}

/// Map an SDK failure onto the local error taxonomy.
///
/// `ResourceNotFoundException` is the expected miss on the upsert describe
/// path; everything else (permissions, throttling, transport) is a plain
/// store error.
fn classify<E>(
    op: &str,
    subject: &str,
    err: &aws_sdk_secretsmanager::error::SdkError<E>,
) -> Error
where
    E: aws_sdk_secretsmanager::error::ProvideErrorMetadata,
{
    use aws_sdk_secretsmanager::error::ProvideErrorMetadata;

    match err.code() {
        Some("ResourceNotFoundException") => Error::NotFound(subject.to_string()),
        Some(code) => Error::Store(format!(
            "{} {}: {}: {}",
            op,
            subject,
            code,
            err.message().unwrap_or("request failed")
        )),
        None => Error::Store(format!("{} {}: {}", op, subject, err)),
    }
}

impl SecretStore for AwsStore {
    fn describe(&self, name: &str) -> Result<SecretRecord> {
        debug!(name, "describing secret");

        self.runtime.block_on(async {
            let out = self
                .client
                .describe_secret()
                .secret_id(name)
                .send()
                .await
                .map_err(|e| classify("describe", name, &e))?;

            Ok(SecretRecord {
                name: out.name().unwrap_or(name).to_string(),
                description: out.description().map(String::from),
            })
        })
    }

    fn create(&self, name: &str, value: &str, description: &str) -> Result<()> {
        debug!(name, "creating secret");

        self.runtime.block_on(async {
            self.client
                .create_secret()
                .name(name)
                .description(description)
                .secret_string(value)
                .send()
                .await
                .map_err(|e| classify("create", name, &e))?;

            Ok(())
        })
    }

    fn update(&self, name: &str, value: &str) -> Result<()> {
        debug!(name, "updating secret");

        self.runtime.block_on(async {
            self.client
                .update_secret()
                .secret_id(name)
                .secret_string(value)
                .send()
                .await
                .map_err(|e| classify("update", name, &e))?;

            Ok(())
        })
    }

    fn list(&self, prefix: &str) -> Result<Vec<SecretRecord>> {
        use aws_sdk_secretsmanager::types::{Filter, FilterNameStringType};

        debug!(prefix, "listing secrets");

        self.runtime.block_on(async {
            let mut records = Vec::new();
            let mut next_token: Option<String> = None;

            loop {
                let mut req = self.client.list_secrets().filters(
                    Filter::builder()
                        .key(FilterNameStringType::Name)
                        .values(prefix)
                        .build(),
                );
                if let Some(token) = &next_token {
                    req = req.next_token(token);
                }

                let out = req.send().await.map_err(|e| classify("list", prefix, &e))?;

                for entry in out.secret_list() {
                    if let Some(name) = entry.name() {
                        records.push(SecretRecord {
                            name: name.to_string(),
                            description: entry.description().map(String::from),
                        });
                    }
                }

                match out.next_token() {
                    Some(token) => next_token = Some(token.to_string()),
                    None => break,
                }
            }

            debug!(prefix, count = records.len(), "listed secrets");
            Ok(records)
        })
    }
}

#[cfg(test)]
pub mod fake {
    //! In-memory store fake for unit tests.

    use std::cell::RefCell;
    use std::collections::BTreeMap;

    use super::{SecretRecord, SecretStore};
    use crate::error::{Error, Result};

    /// One recorded store call, by operation and subject.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Describe(String),
        Create(String),
        Update(String),
        List(String),
    }

    #[derive(Default)]
    struct Inner {
        secrets: BTreeMap<String, (String, Option<String>)>,
        deny: BTreeMap<String, String>,
        calls: Vec<Call>,
    }

    /// Records every call and serves injected state and failures.
    #[derive(Default)]
    pub struct FakeStore {
        inner: RefCell<Inner>,
    }

    impl FakeStore {
        pub fn empty() -> Self {
            Self::default()
        }

        /// Pre-populate secrets as `(name, value)` pairs.
        pub fn with_secrets(secrets: &[(&str, &str)]) -> Self {
            let store = Self::empty();
            for (name, value) in secrets {
                store.inner.borrow_mut().secrets.insert(
                    (*name).to_string(),
                    ((*value).to_string(), None),
                );
            }
            store
        }

        /// Make every operation touching `name` fail with `message`.
        pub fn deny(self, name: &str, message: &str) -> Self {
            self.inner
                .borrow_mut()
                .deny
                .insert(name.to_string(), message.to_string());
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.inner.borrow().calls.clone()
        }

        pub fn value_of(&self, name: &str) -> Option<String> {
            self.inner
                .borrow()
                .secrets
                .get(name)
                .map(|(value, _)| value.clone())
        }

        fn check_denied(&self, name: &str) -> Result<()> {
            if let Some(message) = self.inner.borrow().deny.get(name) {
                return Err(Error::Store(format!("{}: {}", name, message)));
            }
            Ok(())
        }
    }

    impl SecretStore for FakeStore {
        fn describe(&self, name: &str) -> Result<SecretRecord> {
            self.inner
                .borrow_mut()
                .calls
                .push(Call::Describe(name.to_string()));
            self.check_denied(name)?;

            let inner = self.inner.borrow();
            match inner.secrets.get(name) {
                Some((_, description)) => Ok(SecretRecord {
                    name: name.to_string(),
                    description: description.clone(),
                }),
                None => Err(Error::NotFound(name.to_string())),
            }
        }

        fn create(&self, name: &str, value: &str, description: &str) -> Result<()> {
            self.inner
                .borrow_mut()
                .calls
                .push(Call::Create(name.to_string()));
            self.check_denied(name)?;

            self.inner.borrow_mut().secrets.insert(
                name.to_string(),
                (value.to_string(), Some(description.to_string())),
            );
            Ok(())
        }

        fn update(&self, name: &str, value: &str) -> Result<()> {
            self.inner
                .borrow_mut()
                .calls
                .push(Call::Update(name.to_string()));
            self.check_denied(name)?;

            let mut inner = self.inner.borrow_mut();
            match inner.secrets.get_mut(name) {
                Some((stored, _)) => {
                    *stored = value.to_string();
                    Ok(())
                }
                None => Err(Error::NotFound(name.to_string())),
            }
        }

        fn list(&self, prefix: &str) -> Result<Vec<SecretRecord>> {
            self.inner
                .borrow_mut()
                .calls
                .push(Call::List(prefix.to_string()));
            self.check_denied(prefix)?;

            let inner = self.inner.borrow();
            Ok(inner
                .secrets
                .iter()
                .filter(|(name, _)| name.starts_with(prefix))
                .map(|(name, (_, description))| SecretRecord {
                    name: name.clone(),
                    description: description.clone(),
                })
                .collect())
        }
    }
}
