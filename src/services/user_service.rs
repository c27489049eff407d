// src/services/user_service.rs

use bcrypt::hash;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::user::{CreateUserPayload, Role, User},
};

// Administração de usuários. Invariante central: a loja nunca fica sem
// gerente — rebaixar ou excluir o último gerente é recusado.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    pool: PgPool,
}

impl UserService {
    pub fn new(user_repo: UserRepository, pool: PgPool) -> Self {
        Self { user_repo, pool }
    }

    pub async fn create_user(&self, payload: &CreateUserPayload) -> Result<User, AppError> {
        // Hashing fora da thread async (bcrypt é caro)
        let password_clone = payload.password.clone();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = self
            .user_repo
            .create(&payload.username, &payload.email, &hashed_password, payload.role)
            .await?;

        tracing::info!(username = %user.username, role = ?user.role, "Usuário criado");
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list().await
    }

    pub async fn update_role(&self, id: Uuid, new_role: Role) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let current_role = self
            .user_repo
            .get_role_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        // Rebaixar o último gerente deixaria a loja sem administração
        if current_role == Role::Gerente && new_role == Role::Funcionario {
            let managers = self.user_repo.count_managers(&mut *tx).await?;
            if managers <= 1 {
                return Err(AppError::LastManager);
            }
        }

        let user = self.user_repo.update_role(&mut *tx, id, new_role).await?;
        tx.commit().await?;

        Ok(user)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let role = self
            .user_repo
            .get_role_for_update(&mut *tx, id)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if role == Role::Gerente {
            let managers = self.user_repo.count_managers(&mut *tx).await?;
            if managers <= 1 {
                return Err(AppError::LastManager);
            }
        }

        self.user_repo.delete(&mut *tx, id).await?;
        tx.commit().await?;

        tracing::info!(user_id = %id, "Usuário excluído");
        Ok(())
    }

    /// Bootstrap: garante que exista ao menos um gerente. Com a tabela
    /// vazia, cria o usuário 'admin' com a senha de ADMIN_PASSWORD.
    pub async fn ensure_default_manager(&self) -> Result<(), AppError> {
        if !self.user_repo.list().await?.is_empty() {
            return Ok(());
        }

        let password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "trocar-esta-senha".to_string());

        let payload = CreateUserPayload {
            username: "admin".to_string(),
            email: "admin@acougue.local".to_string(),
            password,
            role: Role::Gerente,
        };
        self.create_user(&payload).await?;

        tracing::warn!("Nenhum usuário encontrado; gerente 'admin' criado. Troque a senha.");
        Ok(())
    }
}
