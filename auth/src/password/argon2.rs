use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Argon2 cost parameters.
///
/// Every hash embeds the parameters it was produced with, so raising the work
/// factor only affects new hashes; existing hashes keep verifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkFactor {
    /// Memory cost in KiB (Argon2 `m_cost`)
    pub memory_kib: u32,
    /// Number of passes (Argon2 `t_cost`)
    pub iterations: u32,
    /// Degree of parallelism (Argon2 `p_cost`)
    pub parallelism: u32,
}

impl Default for WorkFactor {
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// Hashing and verification are deliberately expensive; async callers should
/// run them on a blocking thread.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    work_factor: WorkFactor,
    max_password_bytes: usize,
}

impl PasswordHasher {
    /// Longest accepted password, in bytes.
    pub const DEFAULT_MAX_PASSWORD_BYTES: usize = 128;

    // Fixed salt ("somesaltsomesalt") and all-zero output for the placeholder hash
    const PLACEHOLDER_SALT: &'static str = "c29tZXNhbHRzb21lc2FsdA";
    const PLACEHOLDER_OUTPUT: &'static str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with Argon2id default costs
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            work_factor: WorkFactor::default(),
            max_password_bytes: Self::DEFAULT_MAX_PASSWORD_BYTES,
        }
    }

    /// Create a password hasher with an explicit work factor.
    ///
    /// # Arguments
    /// * `work_factor` - Argon2 memory, iteration and parallelism costs
    ///
    /// # Errors
    /// * `InvalidWorkFactor` - Costs are outside the ranges Argon2 accepts
    pub fn with_work_factor(work_factor: WorkFactor) -> Result<Self, PasswordError> {
        let params = Params::new(
            work_factor.memory_kib,
            work_factor.iterations,
            work_factor.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidWorkFactor(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            work_factor,
            max_password_bytes: Self::DEFAULT_MAX_PASSWORD_BYTES,
        })
    }

    /// Override the maximum accepted password length.
    pub fn with_max_password_bytes(mut self, max_password_bytes: usize) -> Self {
        self.max_password_bytes = max_password_bytes;
        self
    }

    /// Maximum accepted password length in bytes.
    pub fn max_password_bytes(&self) -> usize {
        self.max_password_bytes
    }

    /// Work factor new hashes are produced with.
    pub fn work_factor(&self) -> WorkFactor {
        self.work_factor
    }

    /// A well-formed hash that no password matches.
    ///
    /// Carries this hasher's work factor, so verifying against it costs the
    /// same as verifying against a freshly stored hash.
    pub fn placeholder_hash(&self) -> String {
        format!(
            "$argon2id$v=19$m={},t={},p={}${}${}",
            self.work_factor.memory_kib,
            self.work_factor.iterations,
            self.work_factor.parallelism,
            Self::PLACEHOLDER_SALT,
            Self::PLACEHOLDER_OUTPUT,
        )
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation, so hashing the same password
    /// twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `PasswordTooLong` - Password exceeds the accepted input length
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > self.max_password_bytes {
            return Err(PasswordError::PasswordTooLong {
                max: self.max_password_bytes,
                actual: password.len(),
            });
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Costs and salt are read from the stored hash, not from this hasher.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash cannot be parsed or uses unsupported parameters
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
