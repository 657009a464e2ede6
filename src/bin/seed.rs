use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_repairshop_api::{config::AppConfig, db::create_pool};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let branch_id = ensure_branch(&pool, "Main Branch").await?;
    let admin_id = ensure_user(&pool, "admin@example.com", "admin123", "admin", branch_id).await?;
    let staff_id = ensure_user(
        &pool,
        "staff@example.com",
        "staff123",
        "branch_staff",
        branch_id,
    )
    .await?;
    seed_catalog(&pool).await?;

    println!("Seed completed. Branch: {branch_id}, Admin: {admin_id}, Staff: {staff_id}");
    Ok(())
}

async fn ensure_branch(pool: &sqlx::PgPool, name: &str) -> anyhow::Result<Uuid> {
    sqlx::query(
        r#"
        INSERT INTO branches (id, name, address, phone_number, email, manager)
        VALUES ($1, $2, '123 Main St', '123-456-7890', 'main@example.com', 'John Doe')
        ON CONFLICT (name) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .execute(pool)
    .await?;

    let (id,): (Uuid,) = sqlx::query_as("SELECT id FROM branches WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await?;

    println!("Ensured branch {name}");
    Ok(id)
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
    branch_id: Uuid,
) -> anyhow::Result<Uuid> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let name = email.split('@').next().unwrap_or(email);
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, branch_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(branch_id)
    .execute(pool)
    .await?;

    let (user_id,): (Uuid,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user_id)
}

async fn seed_catalog(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let brands = [
        ("Apple", vec!["iPhone 12", "iPhone 13", "iPhone 14"]),
        ("Samsung", vec!["Galaxy S21", "Galaxy S22"]),
        ("Dell", vec!["XPS 15", "Inspiron 15"]),
    ];

    for (brand_name, models) in brands {
        sqlx::query(
            r#"
            INSERT INTO brands (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(brand_name)
        .execute(pool)
        .await?;

        let (brand_id,): (Uuid,) = sqlx::query_as("SELECT id FROM brands WHERE name = $1")
            .bind(brand_name)
            .fetch_one(pool)
            .await?;

        for model_name in models {
            sqlx::query(
                r#"
                INSERT INTO device_models (id, name, brand_id)
                VALUES ($1, $2, $3)
                ON CONFLICT (brand_id, name) DO NOTHING
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(model_name)
            .bind(brand_id)
            .execute(pool)
            .await?;
        }
    }

    let parts = [
        ("Screen Replacement", 150_i64, 25_i32),
        ("Battery", 80, 50),
        ("Charging Port", 60, 30),
        ("Keyboard Replacement", 90, 20),
    ];

    for (name, price, stock) in parts {
        sqlx::query(
            r#"
            INSERT INTO parts (id, name, price, stock)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(price)
        .bind(stock)
        .execute(pool)
        .await?;
    }

    println!("Seeded catalog");
    Ok(())
}
