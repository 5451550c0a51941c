use std::env;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use calamine::Data;

use sb_importer::db::Database;
use sb_importer::import;
use sb_importer::store::{ImportStore, PgImportStore};

/// Integration smoke test for the reconciliation loop against Postgres.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn reconcile_rows_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))?;

    let db = Database::new(&db_url).await?;
    let store = PgImportStore::new(db.pool.clone());

    // Unique account number so repeated runs exercise both branches.
    let account_number = format!("SB-{}", uuid::Uuid::new_v4().simple());
    let rows = vec![vec![
        Data::String("Integration Test User".to_string()),
        Data::String(account_number.clone()),
        Data::Float(100.0),
        Data::Empty,
        Data::Float(150.0),
    ]];

    let first = import::import_rows(&store, rows.iter().map(|r| r.as_slice())).await?;
    assert_eq!(first.created, 1);
    assert!(first.errors.is_empty());

    // Re-running the same row must not duplicate anything.
    let second = import::import_rows(&store, rows.iter().map(|r| r.as_slice())).await?;
    assert_eq!(second.created, 0);
    assert_eq!(second.unchanged, 1);

    let stored = store.find_account(&account_number).await?;
    assert_eq!(stored.map(|a| a.balance), Some(BigDecimal::from_str("150")?));

    db.pool.close().await;
    Ok(())
}
