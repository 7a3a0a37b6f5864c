// src/services/password.rs

use std::sync::Arc;

use bcrypt::{hash, verify};

use crate::common::error::AppError;

// O bcrypt ignora tudo depois do 72º byte
const BCRYPT_MAX_INPUT: usize = 72;

// bcrypt sobre (senha + salt da configuração). O salt global funciona como
// "pepper"; o bcrypt já gera o seu próprio salt por hash.
#[derive(Clone)]
pub struct PasswordHasher {
    pepper: Arc<str>,
    cost: u32,
}

impl PasswordHasher {
    pub fn new(pepper: String, cost: u32) -> Self {
        Self { pepper: Arc::from(pepper), cost }
    }

    fn peppered(&self, password: &str) -> String {
        format!("{password}{}", self.pepper)
    }

    // Executa o hashing em um thread separado
    pub async fn hash(&self, password: &str) -> Result<String, AppError> {
        let input = self.peppered(password);
        if input.len() > BCRYPT_MAX_INPUT {
            return Err(AppError::BadRequest("A senha é longa demais.".into()));
        }
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || hash(input, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    // A comparação é feita pelo próprio bcrypt (tempo constante)
    pub async fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        let input = self.peppered(password);
        if input.len() > BCRYPT_MAX_INPUT {
            return Ok(false);
        }
        let stored = password_hash.to_owned();
        let is_valid = tokio::task::spawn_blocking(move || verify(input, &stored))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
        Ok(is_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn correct_password_verifies_and_wrong_one_does_not() {
        let hasher = PasswordHasher::new("pepper".into(), 4);
        let digest = hasher.hash("correct horse").await.unwrap();

        assert!(hasher.verify("correct horse", &digest).await.unwrap());
        assert!(!hasher.verify("battery staple", &digest).await.unwrap());
    }

    #[tokio::test]
    async fn pepper_is_part_of_the_digest() {
        let digest = PasswordHasher::new("pepper-a".into(), 4).hash("secret").await.unwrap();
        let other = PasswordHasher::new("pepper-b".into(), 4);

        assert!(!other.verify("secret", &digest).await.unwrap());
    }

    #[tokio::test]
    async fn input_past_the_bcrypt_limit_is_never_truncated() {
        let hasher = PasswordHasher::new("pepper".into(), 4);
        let base = "a".repeat(BCRYPT_MAX_INPUT - "pepper".len());
        let digest = hasher.hash(&base).await.unwrap();

        let longer = format!("{base}extra");
        assert!(matches!(hasher.hash(&longer).await, Err(AppError::BadRequest(_))));
        assert!(!hasher.verify(&longer, &digest).await.unwrap());
        assert!(hasher.verify(&base, &digest).await.unwrap());
    }
}
