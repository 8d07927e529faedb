mod common;

use common::{seed, setup_db};
use jadida_backend::config::PrizeSeed;
use jadida_backend::entities::{PrizeKind, prize_entity as prizes};
use jadida_backend::services::{PrizeService, SeedService};
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

async fn all_prizes(db: &DatabaseConnection) -> Vec<prizes::Model> {
    prizes::Entity::find()
        .order_by_asc(prizes::Column::DisplayKey)
        .all(db)
        .await
        .unwrap()
}

fn base_seeds() -> Vec<PrizeSeed> {
    vec![
        seed(1, "Air Fryer", 1, 10.0),
        seed(2, "A la Prochaine", 999_999, 60.0),
        seed(3, "Frying Pan", 50, 30.0),
    ]
}

#[tokio::test]
async fn test_reconcile_inserts_fresh_store() {
    let db = setup_db().await;
    let service = SeedService::new(db.clone(), base_seeds());

    let summary = service.reconcile().await.unwrap();
    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.updated, 0);
    assert_eq!(summary.purged, 0);

    let rows = all_prizes(&db).await;
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows.iter().map(|p| p.display_key).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    // 名称标记推断类别
    assert_eq!(rows[0].kind, PrizeKind::Prize);
    assert_eq!(rows[1].kind, PrizeKind::Consolation);
    assert!(rows.iter().all(|p| p.created_at.is_some()));
}

#[tokio::test]
async fn test_reconcile_is_idempotent() {
    let db = setup_db().await;
    let service = SeedService::new(db.clone(), base_seeds());

    service.reconcile().await.unwrap();
    let second = service.reconcile().await.unwrap();

    assert_eq!(second.inserted, 0);
    assert_eq!(second.updated, 0);
    assert_eq!(second.purged, 0);
}

#[tokio::test]
async fn test_reconcile_updates_in_place_preserving_remaining() {
    let db = setup_db().await;
    SeedService::new(db.clone(), base_seeds())
        .reconcile()
        .await
        .unwrap();

    // 运营期间库存被消耗
    let air_fryer_id = all_prizes(&db).await[0].id;
    PrizeService::new(db.clone())
        .set_remaining(air_fryer_id, 0)
        .await
        .unwrap();

    // 配置改了权重与名称
    let mut changed = base_seeds();
    changed[0].name = "Air Fryer XL".to_string();
    changed[0].weight = 15.0;

    let summary = SeedService::new(db.clone(), changed).reconcile().await.unwrap();
    assert_eq!(summary.inserted, 0);
    assert_eq!(summary.updated, 1);
    assert_eq!(summary.purged, 0);

    let rows = all_prizes(&db).await;
    assert_eq!(rows[0].name, "Air Fryer XL");
    assert_eq!(rows[0].weight, 15.0);
    // remaining 保留存储值, 不被播种重置
    assert_eq!(rows[0].remaining, 0);
    // 同一行就地更新, id 不变
    assert_eq!(rows[0].id, air_fryer_id);
}

#[tokio::test]
async fn test_reconcile_purges_unknown_display_keys() {
    let db = setup_db().await;
    SeedService::new(db.clone(), base_seeds())
        .reconcile()
        .await
        .unwrap();

    let trimmed = vec![base_seeds().remove(1)];
    let summary = SeedService::new(db.clone(), trimmed).reconcile().await.unwrap();
    assert_eq!(summary.purged, 2);
    assert_eq!(summary.inserted, 0);

    let rows = all_prizes(&db).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].display_key, 2);
}

#[tokio::test]
async fn test_reload_resets_remaining() {
    let db = setup_db().await;
    let service = SeedService::new(db.clone(), base_seeds());
    service.reconcile().await.unwrap();

    let pan_id = all_prizes(&db).await[2].id;
    PrizeService::new(db.clone())
        .set_remaining(pan_id, 7)
        .await
        .unwrap();

    let summary = service.reload().await.unwrap();
    assert_eq!(summary.purged, 3);
    assert_eq!(summary.inserted, 3);

    let rows = all_prizes(&db).await;
    assert_eq!(rows.len(), 3);
    // 重载回到配置里的初始库存
    assert_eq!(rows[2].remaining, 50);
}

#[tokio::test]
async fn test_duplicate_display_key_last_write_wins() {
    let db = setup_db().await;
    let seeds = vec![seed(1, "First", 5, 10.0), seed(1, "Second", 9, 20.0)];

    SeedService::new(db.clone(), seeds.clone())
        .reconcile()
        .await
        .unwrap();
    let rows = all_prizes(&db).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Second");
    assert_eq!(rows[0].weight, 20.0);

    // reload 同样后写覆盖先写
    SeedService::new(db.clone(), seeds).reload().await.unwrap();
    let rows = all_prizes(&db).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Second");
    assert_eq!(rows[0].remaining, 9);
}

#[tokio::test]
async fn test_admin_weight_total_is_advisory() {
    let db = setup_db().await;
    let mut seeds = base_seeds();
    seeds[2].weight = 15.0; // 合计 85, 不强制为 100
    SeedService::new(db.clone(), seeds).reconcile().await.unwrap();

    let list = PrizeService::new(db.clone()).list_all().await.unwrap();
    assert!((list.weight_total - 85.0).abs() < 1e-9);
    assert_eq!(list.prizes.len(), 3);
}
