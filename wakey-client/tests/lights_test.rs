use wakey_api::models::*;
use wakey_client::controller::View;
use wakey_client::views::Phase;
use wakey_mock::state::Backend;

mod common;
use common::mock_app::MockApp;

#[tokio::test]
async fn test_load_rooms_with_scenes() {
    let mut app = MockApp::new().await;

    app.controller.show(View::Lights).await.unwrap();

    let lights = app.controller.lights();
    assert_eq!(lights.rooms.len(), 2);
    assert_eq!(lights.scenes["1"].len(), 2);
    assert_eq!(lights.scenes["2"].len(), 1);
    assert_eq!(lights.phase, Phase::Active);
    assert!(lights.room("2").unwrap().is_on());
    assert_eq!(lights.room("2").unwrap().brightness_percent(), 100);
}

#[tokio::test]
async fn test_half_brightness_sends_127_and_marks_on() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Lights).await.unwrap();
    assert!(!app.controller.lights().room("1").unwrap().is_on());

    app.controller.set_room_brightness("1", 50).await.unwrap();

    let room = app.controller.lights().room("1").unwrap();
    assert!(room.is_on());
    assert_eq!(room.brightness_percent(), 50);

    let stored = &app.backend().await.rooms[0];
    assert_eq!(stored.brightness, Some(127));
    assert_eq!(stored.on, Some(true));
}

#[tokio::test]
async fn test_warmth_maps_to_mired() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Lights).await.unwrap();

    app.controller.set_room_warmth("2", 100).await.unwrap();

    assert_eq!(app.backend().await.rooms[1].color_temp, Some(500));
    assert_eq!(app.controller.lights().room("2").unwrap().warmth_percent(), 100);
}

#[tokio::test]
async fn test_server_wins_on_sync() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Lights).await.unwrap();

    app.controller.set_room_power("1", true).await.unwrap();
    assert!(app.controller.lights().room("1").unwrap().is_on());

    app.state().backend.write().await.rooms[0].on = Some(false);
    app.controller.sync_lights().await.unwrap();

    assert!(!app.controller.lights().room("1").unwrap().is_on());
}

#[tokio::test]
async fn test_scene_activation_refetches_rooms() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Lights).await.unwrap();

    app.controller.activate_scene("1", "s-relax").await.unwrap();

    let room = app.controller.lights().room("1").unwrap();
    assert!(room.is_on());
    assert_eq!(room.brightness_percent(), 79);
    assert_eq!(app.hits("/api/hue/rooms").await, 2);
}

#[tokio::test]
async fn test_unknown_scene_shows_server_error() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Lights).await.unwrap();

    assert!(app.controller.activate_scene("1", "s-missing").await.is_err());

    assert_eq!(app.controller.lights().notice.text, "Unknown scene");
}

#[tokio::test]
async fn test_unconfigured_bridge_has_no_rooms() {
    let backend = Backend {
        config: AppConfig::default(),
        ..Default::default()
    };
    let mut app = MockApp::with_backend(backend).await;

    app.controller.show(View::Lights).await.unwrap();

    let lights = app.controller.lights();
    assert!(lights.rooms.is_empty());
    assert_eq!(lights.phase, Phase::Idle);
    assert!(!lights.notice.is_empty());
}
