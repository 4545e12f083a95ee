//! 回收资格校验集成测试
//!
//! 纯求值逻辑由单元测试覆盖；这里验证仓储层把数据库里的
//! 区域配置、历史回收与规则正确装配进上下文。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test eligibility_flow_test -- --ignored
//! ```

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use sqlx::PgPool;

use canje_service::repository::{CatalogRepository, CollectionRepository, UserRepository};
use canje_service::service::EligibilityService;

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

fn setup_service(pool: &PgPool) -> EligibilityService {
    EligibilityService::new(
        Arc::new(UserRepository::new(pool.clone())),
        Arc::new(CatalogRepository::new(pool.clone())),
        Arc::new(CollectionRepository::new(pool.clone())),
    )
}

async fn seed_user(pool: &PgPool, user_id: i64, locality_id: i64) {
    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, points, active, locality_id)
        VALUES ($1, 'Eligibility User', 'elig_' || $1 || '@test.local', 0, true, $2)
        ON CONFLICT (id) DO UPDATE SET locality_id = $2
        "#,
    )
    .bind(user_id)
    .bind(locality_id)
    .execute(pool)
    .await
    .expect("插入测试用户失败");
}

async fn seed_waste_type(pool: &PgPool, type_id: i64, base_points: i32, max_weight_kg: f64) {
    sqlx::query(
        r#"
        INSERT INTO waste_types (id, name, base_points, max_weight_kg, active)
        VALUES ($1, 'Integ Type ' || $1, $2, $3, true)
        ON CONFLICT (id) DO UPDATE SET base_points = $2, max_weight_kg = $3
        "#,
    )
    .bind(type_id)
    .bind(base_points)
    .bind(max_weight_kg)
    .execute(pool)
    .await
    .expect("插入废弃物类型失败");
}

async fn seed_collection(
    pool: &PgPool,
    user_id: i64,
    type_id: i64,
    requested_at: chrono::DateTime<Utc>,
) {
    sqlx::query(
        r#"
        INSERT INTO collections (user_id, waste_type_id, weight_kg, requested_at,
                                 points_awarded, state)
        VALUES ($1, $2, 3.0, $3, 16, 'Recolectado')
        "#,
    )
    .bind(user_id)
    .bind(type_id)
    .bind(requested_at)
    .execute(pool)
    .await
    .expect("插入回收记录失败");
}

async fn cleanup(pool: &PgPool, user_id: i64, type_id: i64) {
    sqlx::query("DELETE FROM collections WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("清理回收记录失败");
    sqlx::query("DELETE FROM validation_rules WHERE waste_type_id = $1")
        .bind(type_id)
        .execute(pool)
        .await
        .expect("清理规则失败");
    sqlx::query("DELETE FROM zone_configs WHERE waste_type_id = $1")
        .bind(type_id)
        .execute(pool)
        .await
        .expect("清理区域配置失败");
    sqlx::query("DELETE FROM waste_types WHERE id = $1")
        .bind(type_id)
        .execute(pool)
        .await
        .expect("清理废弃物类型失败");
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(pool)
        .await
        .expect("清理用户失败");
}

/// 无区域配置、无历史：基础分 + 重量分
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_evaluate_without_zone_config() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let user_id = 94001;
    let type_id = 94001;

    cleanup(&pool, user_id, type_id).await;
    seed_user(&pool, user_id, 10).await;
    seed_waste_type(&pool, type_id, 10, 50.0).await;

    let svc = setup_service(&pool);
    let result = svc
        .evaluate(user_id, type_id, None, Some(5.0), Utc::now())
        .await
        .unwrap();

    assert!(result.is_valid(), "errors: {:?}", result.errors);
    // 10 + floor(5.0 * 2) = 20
    assert_eq!(result.points_awarded, 20);

    cleanup(&pool, user_id, type_id).await;
}

/// 频率限制：数据库里的最近同类型回收被正确读出
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_evaluate_frequency_from_db_history() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let user_id = 94002;
    let type_id = 94002;
    let now = Utc::now();

    cleanup(&pool, user_id, type_id).await;
    seed_user(&pool, user_id, 10).await;
    seed_waste_type(&pool, type_id, 10, 50.0).await;
    // 2 天前刚回收过，默认间隔 7 天
    seed_collection(&pool, user_id, type_id, now - Duration::days(2)).await;

    let svc = setup_service(&pool);
    let result = svc
        .evaluate(user_id, type_id, None, Some(5.0), now)
        .await
        .unwrap();

    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.contains("5 天")), "errors: {:?}", result.errors);

    cleanup(&pool, user_id, type_id).await;
}

/// 数据库里的高频规则参与加分
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_evaluate_frequency_rule_bonus() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let user_id = 94003;
    let type_id = 94003;
    let other_type_id = 94004;
    let now = Utc::now();

    cleanup(&pool, user_id, type_id).await;
    cleanup(&pool, user_id, other_type_id).await;
    seed_user(&pool, user_id, 10).await;
    seed_waste_type(&pool, type_id, 10, 50.0).await;
    seed_waste_type(&pool, other_type_id, 8, 30.0).await;

    // 近 30 天 4 次其它类型的回收，不触发本类型的频率限制
    for days in [25, 20, 15, 10] {
        seed_collection(&pool, user_id, other_type_id, now - Duration::days(days)).await;
    }

    sqlx::query(
        r#"
        INSERT INTO validation_rules (name, condition, bonus_points, waste_type_id, active)
        VALUES ('Bonus frecuencia', $1, 8, $2, true)
        "#,
    )
    .bind(json!({"kind": "FREQUENCY", "minCollections": 4}))
    .bind(type_id)
    .execute(&pool)
    .await
    .expect("插入规则失败");

    let svc = setup_service(&pool);
    let result = svc
        .evaluate(user_id, type_id, None, Some(5.0), now)
        .await
        .unwrap();

    assert!(result.is_valid(), "errors: {:?}", result.errors);
    // 10 + 10 + 8
    assert_eq!(result.points_awarded, 28);

    cleanup(&pool, user_id, type_id).await;
    cleanup(&pool, user_id, other_type_id).await;
}

/// 未知用户以错误列表而非异常返回
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_evaluate_unknown_user() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let svc = setup_service(&pool);

    let result = svc
        .evaluate(999999999, 1, None, Some(5.0), Utc::now())
        .await
        .unwrap();

    assert!(!result.is_valid());
    assert_eq!(result.points_awarded, 0);
}
