use serde::{Deserialize, Serialize};

/// An answer provider as advertised by the provider service's listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    name: String,
    #[serde(default)]
    default_system_prompt: String,
}

impl Provider {
    pub fn new(name: impl Into<String>, default_system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_system_prompt: default_system_prompt.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_system_prompt(&self) -> &str {
        &self.default_system_prompt
    }

    /// Whether `candidate_hash` is a hash of this provider's name.
    ///
    /// Accepts the crypt-style bcrypt strings (`$2y$`, `$2b$`, ...) issued by
    /// existing callers, and the SHA-256 hex digest from
    /// [`compute_provider_hash`].
    pub fn matches_hash(&self, candidate_hash: &str) -> bool {
        let candidate_hash = candidate_hash.trim();
        if candidate_hash.starts_with("$2") {
            return bcrypt::verify(&self.name, candidate_hash).unwrap_or(false);
        }
        compute_provider_hash(&self.name).eq_ignore_ascii_case(candidate_hash)
    }
}

/// Computes the SHA-256 hex digest that identifies a provider by name.
pub fn compute_provider_hash(name: &str) -> String {
    use sha2::{Digest, Sha256};
    let hash = Sha256::digest(name.as_bytes());
    format!("{:x}", hash)
}

/// Picks the first provider whose name hashes to `candidate_hash`.
pub fn select_by_hash<'a>(providers: &'a [Provider], candidate_hash: &str) -> Option<&'a Provider> {
    providers.iter().find(|p| p.matches_hash(candidate_hash))
}
