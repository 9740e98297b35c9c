//! Integration-Tests fuer AppRepository und App-Provisionierung

use sso_core::AppId;
use sso_db::{AppRepository, DbError, SqliteDb};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

#[tokio::test]
async fn app_provisionieren_und_laden() {
    let db = db().await;

    db.app_provisionieren(AppId(1), "portal", "geheimnis")
        .await
        .expect("Provisionierung fehlgeschlagen");

    let app = AppRepository::get_by_id(&db, AppId(1))
        .await
        .unwrap()
        .expect("App sollte gefunden werden");

    assert_eq!(app.id, AppId(1));
    assert_eq!(app.name, "portal");
    assert_eq!(app.secret, "geheimnis");
}

#[tokio::test]
async fn unbekannte_app_liefert_none() {
    let db = db().await;

    let app = AppRepository::get_by_id(&db, AppId(77)).await.unwrap();
    assert!(app.is_none());
}

#[tokio::test]
async fn provisionieren_ist_idempotent_und_aktualisiert() {
    let db = db().await;

    db.app_provisionieren(AppId(2), "shop", "alt").await.unwrap();
    db.app_provisionieren(AppId(2), "shop", "neu").await.unwrap();

    let app = AppRepository::get_by_id(&db, AppId(2)).await.unwrap().unwrap();
    assert_eq!(app.secret, "neu");
}

#[tokio::test]
async fn app_name_unique() {
    let db = db().await;

    db.app_provisionieren(AppId(3), "wiki", "s1").await.unwrap();
    let err = db.app_provisionieren(AppId(4), "wiki", "s2").await.unwrap_err();
    assert!(err.ist_eindeutigkeit());
}

#[tokio::test]
async fn provisionieren_ohne_secret_abgelehnt() {
    let db = db().await;

    let err = db.app_provisionieren(AppId(5), "leer", "").await.unwrap_err();
    assert!(matches!(err, DbError::UngueltigeDaten(_)));

    let err = db.app_provisionieren(AppId(0), "null", "s").await.unwrap_err();
    assert!(matches!(err, DbError::UngueltigeDaten(_)));

    let err = db.app_provisionieren(AppId(-3), "negativ", "s").await.unwrap_err();
    assert!(matches!(err, DbError::UngueltigeDaten(_)));
}

#[tokio::test]
async fn negative_app_id_wird_nicht_gefunden() {
    let db = db().await;
    assert!(db.get_by_id(AppId(-1)).await.unwrap().is_none());
}
