use anyhow::Result;
use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminUser {
    pub id: Option<i64>,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl AdminUser {
    /// Create a new admin user with a hashed password
    pub fn new(username: String, password: &str) -> Result<Self> {
        Self::validate_username(&username)
            .map_err(|e| anyhow::anyhow!("Invalid username: {}", e))?;

        let password_hash = Self::hash_password(password)?;

        Ok(Self {
            id: None,
            username,
            password_hash,
            created_at: Utc::now(),
        })
    }

    /// Hash a password using Argon2
    pub fn hash_password(password: &str) -> Result<String> {
        use argon2::password_hash::rand_core::OsRng;

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
            .to_string();
        Ok(password_hash)
    }

    /// Set a new password for the user
    pub fn set_password(&mut self, password: &str) -> Result<()> {
        self.password_hash = Self::hash_password(password)?;
        Ok(())
    }

    /// Verify a password against the stored hash
    pub fn verify_password(&self, password: &str) -> Result<bool> {
        use argon2::password_hash::{PasswordHash, PasswordVerifier};

        let parsed_hash = PasswordHash::new(&self.password_hash)
            .map_err(|e| anyhow::anyhow!("Invalid password hash format: {}", e))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(_) => Ok(false),
        }
    }

    /// Validate username format
    pub fn validate_username(username: &str) -> Result<(), String> {
        if username.is_empty() {
            return Err("Username cannot be empty".to_string());
        }

        if username.len() < 3 {
            return Err("Username must be at least 3 characters".to_string());
        }

        if username.len() > 50 {
            return Err("Username cannot exceed 50 characters".to_string());
        }

        // Username must start with letter, can contain letters, numbers, underscore, hyphen
        let username_regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$")
            .map_err(|e| format!("Failed to compile username regex: {}", e))?;

        if !username_regex.is_match(username) {
            return Err("Username must start with a letter and contain only letters, numbers, underscores, and hyphens".to_string());
        }

        Ok(())
    }

    /// Validate all user fields
    pub fn is_valid(&self) -> Result<(), String> {
        Self::validate_username(&self.username)?;

        if self.password_hash.is_empty() {
            return Err("Password hash cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_admin_user() {
        let user = AdminUser::new("admin".to_string(), "admin123").unwrap();

        assert!(user.id.is_none());
        assert_eq!(user.username, "admin");
        assert_ne!(user.password_hash, "admin123"); // Should be hashed
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[test]
    fn test_hash_password_salted() {
        let hash1 = AdminUser::hash_password("password123").unwrap();
        let hash2 = AdminUser::hash_password("password123").unwrap();

        // Same password should produce different hashes (due to salt)
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let user = AdminUser::new("admin".to_string(), "correct_password").unwrap();
        assert!(user.verify_password("correct_password").unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let user = AdminUser::new("admin".to_string(), "correct_password").unwrap();
        assert!(!user.verify_password("wrong_password").unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let mut user = AdminUser::new("admin".to_string(), "password").unwrap();
        user.password_hash = "invalid_hash".to_string();

        assert!(user.verify_password("password").is_err());
    }

    #[test]
    fn test_set_password() {
        let mut user = AdminUser::new("admin".to_string(), "old_password").unwrap();

        user.set_password("new_password").unwrap();

        assert!(user.verify_password("new_password").unwrap());
        assert!(!user.verify_password("old_password").unwrap());
    }

    #[test]
    fn test_validate_username_valid() {
        assert!(AdminUser::validate_username("admin").is_ok());
        assert!(AdminUser::validate_username("Admin123").is_ok());
        assert!(AdminUser::validate_username("admin_user").is_ok());
        assert!(AdminUser::validate_username("admin-user").is_ok());
    }

    #[test]
    fn test_validate_username_invalid() {
        assert!(AdminUser::validate_username("").is_err());
        assert!(AdminUser::validate_username("ab").is_err()); // Too short
        assert!(AdminUser::validate_username("123admin").is_err()); // Starts with number
        assert!(AdminUser::validate_username("_admin").is_err()); // Starts with underscore
        assert!(AdminUser::validate_username("admin user").is_err()); // Contains space
        assert!(AdminUser::validate_username(&"a".repeat(51)).is_err()); // Too long
    }

    #[test]
    fn test_new_with_invalid_username() {
        let result = AdminUser::new("ab".to_string(), "password");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid username"));
    }

    #[test]
    fn test_is_valid_empty_password_hash() {
        let mut user = AdminUser::new("admin".to_string(), "password").unwrap();
        user.password_hash = String::new();

        let result = user.is_valid();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Password hash cannot be empty"));
    }
}
