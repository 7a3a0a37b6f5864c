// src/test_support.rs
//
// Utilitários compartilhados pelos testes que usam banco.

use sqlx::PgPool;
use uuid::Uuid;

// Insere um usuário direto na tabela, sem passar pelo bcrypt
pub(crate) async fn insert_user(pool: &PgPool, username: &str, role: &str) -> Uuid {
    sqlx::query_scalar(
        r#"
        INSERT INTO users (username, email, phone_number, password_hash, role)
        VALUES ($1, $1 || '@example.com', $1 || '-phone', 'not-a-hash', $2)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(role)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub(crate) async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}
