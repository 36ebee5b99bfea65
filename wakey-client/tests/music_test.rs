use wakey_client::controller::{MusicTab, View};
use wakey_client::views::Phase;

mod common;
use common::mock_app::{MockApp, settle};

const SPOTIFY_STATUS: &str = "/api/spotify/status";

async fn open_spotify(app: &mut MockApp) {
    app.controller.show(View::Music).await.unwrap();
    app.controller.select_music_tab(MusicTab::Spotify).await.unwrap();
}

#[tokio::test]
async fn test_spotify_poller_released_when_leaving() {
    let mut app = MockApp::new().await;

    app.controller.show(View::Music).await.unwrap();
    assert_eq!(app.controller.live_subscriptions(), 0);

    app.controller.select_music_tab(MusicTab::Spotify).await.unwrap();
    assert!(app.controller.spotify_polling());
    assert_eq!(app.controller.live_subscriptions(), 1);

    settle(120).await;
    assert!(app.hits(SPOTIFY_STATUS).await >= 3);

    app.controller.show(View::Main).await.unwrap();
    assert!(!app.controller.spotify_polling());
    assert_eq!(app.controller.live_subscriptions(), 0);

    settle(50).await;
    let seen = app.hits(SPOTIFY_STATUS).await;
    settle(150).await;
    assert_eq!(app.hits(SPOTIFY_STATUS).await, seen);
}

#[tokio::test]
async fn test_spotify_status_fetched_once_on_entry() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Music).await.unwrap();

    app.controller.select_music_tab(MusicTab::Spotify).await.unwrap();

    assert_eq!(app.hits(SPOTIFY_STATUS).await, 1);
}

#[tokio::test]
async fn test_transport_refresh_dropped_when_leaving() {
    let mut app = MockApp::new().await;
    open_spotify(&mut app).await;

    app.controller.spotify_next().await.unwrap();
    app.controller.show(View::Main).await.unwrap();
    settle(5).await;
    let seen = app.hits(SPOTIFY_STATUS).await;

    settle(150).await;
    assert_eq!(app.hits(SPOTIFY_STATUS).await, seen);
    assert_eq!(app.controller.live_subscriptions(), 0);
}

#[tokio::test]
async fn test_repeated_enter_exit_never_doubles_poller() {
    let mut app = MockApp::new().await;

    for _ in 0..5 {
        open_spotify(&mut app).await;
        app.controller.select_music_tab(MusicTab::Spotify).await.unwrap();
        assert_eq!(app.controller.live_subscriptions(), 1);

        app.controller.select_music_tab(MusicTab::Radio).await.unwrap();
        assert_eq!(app.controller.live_subscriptions(), 0);

        app.controller.select_music_tab(MusicTab::Spotify).await.unwrap();
        app.controller.show(View::Music).await.unwrap();
        assert_eq!(app.controller.live_subscriptions(), 1);

        app.controller.show(View::Lights).await.unwrap();
        assert_eq!(app.controller.live_subscriptions(), 0);
    }

    settle(50).await;
    let seen = app.hits(SPOTIFY_STATUS).await;
    settle(150).await;
    assert_eq!(app.hits(SPOTIFY_STATUS).await, seen);
}

#[tokio::test]
async fn test_selected_station_survives_view_change() {
    let mut app = MockApp::new().await;

    app.controller.show(View::Music).await.unwrap();
    assert_eq!(app.controller.radio().selected.as_deref(), Some("npo_radio_1"));

    app.controller.select_station("npo_3fm").await.unwrap();
    app.controller.show(View::Main).await.unwrap();
    app.controller.show(View::Music).await.unwrap();

    assert_eq!(app.controller.radio().selected.as_deref(), Some("npo_3fm"));
    assert_eq!(
        app.controller.radio().selected_station().map(|s| s.name.as_str()),
        Some("NPO 3FM")
    );
    assert_eq!(app.hits("/api/config/test-radio").await, 0);
}

#[tokio::test]
async fn test_reselect_while_playing_switches_station() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Music).await.unwrap();

    app.controller.play_radio().await.unwrap();
    assert_eq!(app.controller.radio().phase, Phase::Active);
    assert_eq!(app.controller.radio().notice.text, "Playing NPO Radio 1");

    app.controller.select_station("qmusic").await.unwrap();

    let backend = app.backend().await;
    assert!(backend.radio.playing);
    assert_eq!(backend.radio.station.as_deref(), Some("qmusic"));
    assert_eq!(app.controller.radio().notice.text, "Playing Qmusic");
}

#[tokio::test]
async fn test_playback_state_read_on_entry() {
    let mut app = MockApp::new().await;
    app.api.play_radio("qmusic", 40).await.unwrap();

    app.controller.show(View::Music).await.unwrap();

    assert!(app.controller.radio().playing);
    assert_eq!(app.controller.radio().selected.as_deref(), Some("qmusic"));
}

#[tokio::test]
async fn test_volume_pushed_only_while_playing() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Music).await.unwrap();

    app.controller.set_radio_volume(30).await.unwrap();
    assert_eq!(app.hits("/api/config/test-radio/volume").await, 0);

    app.controller.play_radio().await.unwrap();
    assert_eq!(app.backend().await.radio_volume, 30);

    app.controller.set_radio_volume(45).await.unwrap();
    assert_eq!(app.hits("/api/config/test-radio/volume").await, 1);
    assert_eq!(app.backend().await.radio_volume, 45);

    app.controller.stop_radio().await.unwrap();
    assert!(!app.controller.radio().playing);
    assert!(!app.backend().await.radio.playing);
}

#[tokio::test]
async fn test_unknown_station_shows_server_error() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Music).await.unwrap();

    app.controller.select_station("bogus").await.unwrap();
    assert!(app.controller.play_radio().await.is_err());

    assert_eq!(app.controller.radio().notice.text, "Unknown station");
    assert!(!app.controller.radio().playing);
}

#[tokio::test]
async fn test_play_preset_resets_radio_display() {
    let mut app = MockApp::new().await;
    app.controller.show(View::Music).await.unwrap();
    app.controller.play_radio().await.unwrap();

    app.controller.select_music_tab(MusicTab::Spotify).await.unwrap();
    app.controller
        .add_preset("Morning", "spotify:playlist:morning")
        .await
        .unwrap();
    let preset_id = app.controller.spotify().presets[0].id.clone();

    app.controller.play_preset(&preset_id).await.unwrap();

    assert!(app.controller.spotify().status().playing);
    assert!(!app.controller.radio().playing);
    assert_ne!(app.controller.radio().phase, Phase::Active);
    assert!(!app.backend().await.radio.playing);
}

#[tokio::test]
async fn test_radio_play_resets_spotify_display() {
    let mut app = MockApp::new().await;
    open_spotify(&mut app).await;
    app.controller
        .add_preset("Morning", "spotify:playlist:morning")
        .await
        .unwrap();
    let preset_id = app.controller.spotify().presets[0].id.clone();
    app.controller.play_preset(&preset_id).await.unwrap();

    app.controller.select_music_tab(MusicTab::Radio).await.unwrap();
    app.controller.play_radio().await.unwrap();

    assert!(!app.controller.spotify().status().playing);
    assert!(app.controller.radio().playing);
    assert!(!app.backend().await.spotify.playing);
}

#[tokio::test]
async fn test_presets_add_and_delete() {
    let mut app = MockApp::new().await;
    open_spotify(&mut app).await;

    assert!(app.controller.add_preset(" ", "spotify:album:x").await.is_err());
    assert_eq!(app.controller.spotify().notice.text, "Name and URI required");
    assert!(app.backend().await.presets.is_empty());

    assert!(app.controller.add_preset("Jazz", "http://example.com").await.is_err());
    assert_eq!(
        app.controller.spotify().notice.text,
        "Name and spotify: URI required"
    );

    app.controller.add_preset("Jazz", "spotify:album:x").await.unwrap();
    let preset_id = app.controller.spotify().presets[0].id.clone();
    app.controller.delete_preset(&preset_id).await.unwrap();

    assert!(app.controller.spotify().presets.is_empty());
    assert!(app.backend().await.presets.is_empty());
}

#[tokio::test]
async fn test_shuffle_and_repeat_send_opposite_of_shown() {
    let mut app = MockApp::new().await;
    open_spotify(&mut app).await;

    app.controller.toggle_shuffle().await.unwrap();
    assert!(app.backend().await.spotify.shuffle);

    app.controller.toggle_repeat().await.unwrap();
    assert!(app.backend().await.spotify.repeat);

    settle(60).await;
    app.controller.toggle_shuffle().await.unwrap();
    assert!(!app.backend().await.spotify.shuffle);
}

#[tokio::test]
async fn test_transport_shows_up_after_repoll() {
    let mut app = MockApp::new().await;
    open_spotify(&mut app).await;

    app.controller.spotify_play_pause().await.unwrap();
    app.controller.spotify_next().await.unwrap();
    settle(100).await;

    let status = app.controller.spotify().status();
    assert!(status.playing);
    assert_eq!(status.track.as_deref(), Some("Morning Has Broken"));

    app.controller.spotify_previous().await.unwrap();
    settle(100).await;
    assert_eq!(
        app.controller.spotify().status().track.as_deref(),
        Some("Here Comes the Sun")
    );
}
