use super::*;

/// Tests creating a global linked entitlement.
///
/// Expected: Ok with a user-scoped row and no guild
#[tokio::test]
async fn creates_global_entitlement() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    let expires_at = Utc::now().duration_trunc(Duration::seconds(1)).unwrap() + Duration::days(30);

    let repo = EntitlementRepository::new(db);
    let result = repo
        .create(CreateLinkedEntitlementParam {
            guild_id: None,
            user_id: 123456789,
            sku_id: sku.id,
            source: PATREON_SOURCE.to_string(),
            expires_at: Some(expires_at),
        })
        .await;

    assert!(result.is_ok());
    let linked = result.unwrap();
    assert!(linked.is_global());
    assert_eq!(linked.user_id, Some(123456789));
    assert_eq!(linked.source, PATREON_SOURCE);
    assert_eq!(linked.expires_at, Some(expires_at));

    let stored = entity::prelude::Entitlement::find_by_id(linked.id)
        .one(db)
        .await?
        .unwrap();
    assert!(stored.guild_id.is_none());
    assert_eq!(stored.user_id.as_deref(), Some("123456789"));

    Ok(())
}

/// Tests creating a guild-scoped linked entitlement.
///
/// Expected: Ok with both guild and user stored
#[tokio::test]
async fn creates_guild_scoped_entitlement() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;

    let repo = EntitlementRepository::new(db);
    let linked = repo
        .create(CreateLinkedEntitlementParam {
            guild_id: Some(555555555),
            user_id: 123456789,
            sku_id: sku.id,
            source: PATREON_SOURCE.to_string(),
            expires_at: None,
        })
        .await?;

    assert_eq!(linked.guild_id, Some(555555555));

    let found = repo.find_by_id(linked.id).await?;
    assert_eq!(found, Some(linked));

    Ok(())
}

/// Tests that every created entitlement gets a distinct ID.
///
/// Expected: Ok with two rows stored
#[tokio::test]
async fn creates_distinct_ids() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_entitlement_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let sku = factory::create_sku(db).await?;
    let param = CreateLinkedEntitlementParam {
        guild_id: None,
        user_id: 123456789,
        sku_id: sku.id,
        source: PATREON_SOURCE.to_string(),
        expires_at: None,
    };

    let repo = EntitlementRepository::new(db);
    let first = repo.create(param.clone()).await?;
    let second = repo.create(param).await?;

    assert_ne!(first.id, second.id);
    assert_eq!(entity::prelude::Entitlement::find().count(db).await?, 2);

    Ok(())
}
