use std::fmt;

use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Privileged-signup credential derived from `(email, role, secret)`.
///
/// Stateless: nothing is stored. The digest handed out is the hash of
/// `"{email}-{role}-{secret}"`; verification rebuilds the string and checks
/// it against the digest the registrant supplies.
pub struct ProductKeyScheme {
    hasher: PasswordHasher,
    secret: String,
}

impl ProductKeyScheme {
    pub fn new(hasher: PasswordHasher, secret: impl Into<String>) -> Self {
        Self {
            hasher,
            secret: secret.into(),
        }
    }

    fn material(&self, email: &str, role: &str) -> String {
        format!("{}-{}-{}", email, role, self.secret)
    }

    /// Produce a product key for `email` registering as `role`.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn generate(&self, email: &str, role: &str) -> Result<String, PasswordError> {
        self.hasher.hash(&self.material(email, role))
    }

    /// Check a supplied product key for `(email, role)`.
    pub fn verify(&self, email: &str, role: &str, supplied: &str) -> bool {
        self.hasher.verify(&self.material(email, role), supplied)
    }
}

impl fmt::Debug for ProductKeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductKeyScheme")
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::HashingCost;

    fn scheme(secret: &str) -> ProductKeyScheme {
        let hasher = PasswordHasher::with_cost(HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        ProductKeyScheme::new(hasher, secret)
    }

    #[test]
    fn test_generate_then_verify() {
        let scheme = scheme("pk-secret");

        let key = scheme.generate("realtor@example.com", "REALTOR").unwrap();

        assert!(scheme.verify("realtor@example.com", "REALTOR", &key));
    }

    #[test]
    fn test_independent_generations_both_verify() {
        let scheme = scheme("pk-secret");

        let first = scheme.generate("a@example.com", "ADMIN").unwrap();
        let second = scheme.generate("a@example.com", "ADMIN").unwrap();

        assert_ne!(first, second);
        assert!(scheme.verify("a@example.com", "ADMIN", &first));
        assert!(scheme.verify("a@example.com", "ADMIN", &second));
    }

    #[test]
    fn test_changed_email_or_role_invalidates() {
        let scheme = scheme("pk-secret");
        let key = scheme.generate("realtor@example.com", "REALTOR").unwrap();

        assert!(!scheme.verify("other@example.com", "REALTOR", &key));
        assert!(!scheme.verify("realtor@example.com", "ADMIN", &key));
        assert!(!scheme.verify("Realtor@example.com", "REALTOR", &key));
    }

    #[test]
    fn test_other_secret_invalidates() {
        let key = scheme("pk-secret")
            .generate("realtor@example.com", "REALTOR")
            .unwrap();

        assert!(!scheme("rotated").verify("realtor@example.com", "REALTOR", &key));
    }

    #[test]
    fn test_garbage_key_is_false() {
        let scheme = scheme("pk-secret");
        assert!(!scheme.verify("realtor@example.com", "REALTOR", "not-a-key"));
    }
}
