//! Integration tests for file-backed storage and the app on top of it.

use std::fs;

use beiramar_config::{Config, DelayConfig};
use beiramar_protocol::user::{ADMIN_EMAIL, ADMIN_PASSWORD};
use beiramar_protocol::{
    Booking, BookingStatus, Language, Message, PaymentDetails, PaymentMethod, Role, Stay,
    catalog,
};
use beiramar_store::{Storage, StoreError};
use beiramar_tui::{App, Route};
use chrono::Utc;
use tempfile::TempDir;

fn pending_booking(user_id: u64) -> Booking {
    let hotel = catalog::find(1).unwrap();
    let room = &hotel.rooms[0];
    let stay = Stay::from_strings("2025-06-12", "2025-06-15").unwrap();
    Booking::pending(&hotel, room, stay, 2, user_id, Utc::now())
}

#[test]
fn session_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let storage = Storage::open(dir.path().to_path_buf()).unwrap();
    let user = storage
        .register("Rita Sousa", "rita@example.com", "secret1", Utc::now())
        .unwrap();
    drop(storage);

    let storage = Storage::open(dir.path().to_path_buf()).unwrap();
    assert_eq!(storage.current_user().unwrap(), Some(user));
    assert!(matches!(
        storage.register("Rita", "rita@example.com", "other12", Utc::now()),
        Err(StoreError::EmailTaken)
    ));
}

#[test]
fn bookings_are_written_as_json() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::open(dir.path().to_path_buf()).unwrap();
    let user = storage
        .register("Rita", "rita@example.com", "secret1", Utc::now())
        .unwrap();

    let confirmed = storage
        .confirm_booking(
            pending_booking(user.id),
            PaymentDetails::new(PaymentMethod::Card, "4242 4242 4242 4242"),
        )
        .unwrap();
    assert!(storage.cancel_booking(&confirmed.id).unwrap());

    let raw = fs::read_to_string(dir.path().join("luxe_bookings.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["id"], confirmed.id.as_str());
    assert_eq!(entries[0]["status"], "cancelled");
    assert_eq!(entries[0]["nights"], 3);

    let reopened = Storage::open(dir.path().to_path_buf()).unwrap();
    let bookings = reopened.user_bookings(user.id).unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].status, BookingStatus::Cancelled);
}

#[test]
fn corrupt_booking_file_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("luxe_bookings.json"), "[{").unwrap();

    let storage = Storage::open(dir.path().to_path_buf()).unwrap();
    assert!(matches!(storage.all_bookings(), Err(StoreError::Json { .. })));
}

#[test]
fn app_restores_admin_session_and_language() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        language: Language::Pt,
        storage_dir: Some(dir.path().to_path_buf()),
        delays: DelayConfig::none(),
    };

    let storage = Storage::open(config.storage_dir().unwrap()).unwrap();
    let mut app = App::new(config.clone(), storage);
    app.update(Message::OpenLogin);
    for ch in ADMIN_EMAIL.chars() {
        app.update(Message::Input { ch });
    }
    app.update(Message::Select);
    for ch in ADMIN_PASSWORD.chars() {
        app.update(Message::Input { ch });
    }
    app.update(Message::Select);
    app.update(Message::CycleLanguage);
    assert_eq!(app.state().route, Route::Admin);
    drop(app);

    let storage = Storage::open(config.storage_dir().unwrap()).unwrap();
    let app = App::new(config, storage);
    let user = app.state().user.clone().unwrap();
    assert_eq!(user.role, Role::Admin);
    assert_eq!(app.state().language, Language::En);
}
