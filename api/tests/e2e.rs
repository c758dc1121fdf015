use std::{env, sync::Arc, time::Duration};

use dotenv::dotenv;
use httpmock::prelude::*;
use hystats_api::{ClientConfig, HypixelApiClient, types::ApiError};
use hystats_shared::{
    IdentityKey, MemoryCredentialStore,
    traits::api::{HypixelApiFull, IdentityApi, StatsApi},
};
use serde_json::json;

const KEY: &str = "069a79f444e94726a5befca90e38aaf5";
const API_KEY: &str = "test-api-key";

fn key() -> IdentityKey {
    IdentityKey::parse(KEY).unwrap()
}

fn client(server: &MockServer, credential: Option<&str>) -> HypixelApiClient {
    let config = ClientConfig::default()
        .with_identity_base_url(server.base_url())
        .with_stats_base_url(server.url("/v2"));
    let store = MemoryCredentialStore::new(credential.map(str::to_string));

    HypixelApiClient::new(config, Arc::new(store)).unwrap()
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn fetch_profile_sends_key_and_credential() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v2/player")
                    .query_param("uuid", KEY)
                    .header("API-Key", API_KEY);
                then.status(200).json_body(json!({
                    "success": true,
                    "player": {
                        "uuid": KEY,
                        "displayname": "Notch",
                        "prefix": "§c[OWNER]",
                        "newPackageRank": "MVP_PLUS",
                        "networkExp": 37501
                    }
                }));
            })
            .await;

        let api = client(&server, Some(API_KEY));
        let player = api.fetch_profile(&key()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(player.display_name, "Notch");
        assert_eq!(player.effective_rank(), "[OWNER]");
        assert_eq!(player.network_level(), 4.0);
        assert_eq!(api.metrics().total(), 1);
    }

    #[tokio::test]
    async fn successful_response_without_player_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/player");
                then.status(200).json_body(json!({ "success": true, "player": null }));
            })
            .await;

        let err = client(&server, Some(API_KEY))
            .fetch_profile(&key())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(ref q) if q == &format!("UUID: {KEY}")));
    }

    #[tokio::test]
    async fn invalid_key_cause_is_credential_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/player");
                then.status(200)
                    .json_body(json!({ "success": false, "cause": "Invalid API key" }));
            })
            .await;

        let err = client(&server, Some(API_KEY))
            .fetch_profile(&key())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::CredentialMissing(Some(_))));
    }

    #[tokio::test]
    async fn malformed_player_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/player");
                then.status(200).json_body(json!({
                    "success": true,
                    "player": { "uuid": KEY, "displayname": "Notch", "karma": "lots" }
                }));
            })
            .await;

        let err = client(&server, Some(API_KEY))
            .fetch_profile(&key())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode { endpoint: "player", .. }));
        assert_eq!(err.path(), Some("player.karma"));
        assert!(err.line().is_some());
    }

    #[tokio::test]
    async fn nested_stats_mismatch_reports_field_path() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/player");
                then.status(200).json_body(json!({
                    "success": true,
                    "player": {
                        "uuid": KEY,
                        "displayname": "Notch",
                        "stats": { "Bedwars": { "wins_bedwars": "many" } }
                    }
                }));
            })
            .await;

        let err = client(&server, Some(API_KEY))
            .fetch_profile(&key())
            .await
            .unwrap_err();

        assert_eq!(err.path(), Some("player.stats.Bedwars.wins_bedwars"));
        assert!(err.to_string().contains("player.stats.Bedwars.wins_bedwars"));
    }
}

mod http_status {
    use super::*;

    async fn status_error(code: u16) -> ApiError {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/status");
                then.status(code).body("{\"success\":false}");
            })
            .await;

        client(&server, Some(API_KEY))
            .fetch_status(&key())
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn forbidden_and_rate_limited_are_distinguished() {
        assert!(matches!(status_error(403).await, ApiError::Forbidden));
        assert!(matches!(status_error(429).await, ApiError::RateLimited));
        assert!(matches!(status_error(400).await, ApiError::HttpStatus(400)));
        assert!(matches!(status_error(502).await, ApiError::HttpStatus(502)));
    }
}

mod status {
    use super::*;

    #[tokio::test]
    async fn missing_session_is_offline() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/status").query_param("uuid", KEY);
                then.status(200).json_body(json!({ "success": true, "uuid": KEY }));
            })
            .await;

        let session = client(&server, Some(API_KEY))
            .fetch_status(&key())
            .await
            .unwrap();

        assert!(!session.online);
        assert_eq!(session.summary(), "Offline");
    }

    #[tokio::test]
    async fn online_session_is_decoded() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/status");
                then.status(200).json_body(json!({
                    "success": true,
                    "uuid": KEY,
                    "session": {
                        "online": true,
                        "gameType": "BEDWARS",
                        "mode": "BEDWARS_EIGHT_ONE",
                        "map": "Lighthouse"
                    }
                }));
            })
            .await;

        let session = client(&server, Some(API_KEY))
            .fetch_status(&key())
            .await
            .unwrap();

        assert!(session.online);
        assert_eq!(session.map.as_deref(), Some("Lighthouse"));
    }

    #[tokio::test]
    async fn unknown_player_cause_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/status");
                then.status(200)
                    .json_body(json!({ "success": false, "cause": "Player does not exist" }));
            })
            .await;

        let err = client(&server, Some(API_KEY))
            .fetch_status(&key())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }
}

mod recent_games {
    use super::*;

    #[tokio::test]
    async fn missing_games_is_empty() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/recentgames").query_param("uuid", KEY);
                then.status(200).json_body(json!({ "success": true, "uuid": KEY }));
            })
            .await;

        let games = client(&server, Some(API_KEY))
            .fetch_recent_games(&key())
            .await
            .unwrap();

        assert!(games.is_empty());
    }

    #[tokio::test]
    async fn games_keep_upstream_order() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/recentgames");
                then.status(200).json_body(json!({
                    "success": true,
                    "uuid": KEY,
                    "games": [
                        { "date": 3000, "gameType": "DUELS", "mode": "DUELS_UHC", "map": "Arena" },
                        { "date": 2000, "gameType": "BEDWARS", "ended": 2500 },
                        { "date": 2000, "gameType": "BEDWARS", "ended": 2500 }
                    ]
                }));
            })
            .await;

        let games = client(&server, Some(API_KEY))
            .fetch_recent_games(&key())
            .await
            .unwrap();

        assert_eq!(games.len(), 3);
        assert_eq!(games[0].date, 3000);
        assert!(games[0].is_ongoing());
        assert_eq!(games[1], games[2]);
        assert_eq!(games[1].duration_ms(), Some(500));
    }

    #[tokio::test]
    async fn unknown_cause_is_upstream_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/recentgames");
                then.status(200)
                    .json_body(json!({ "success": false, "cause": "Service unavailable" }));
            })
            .await;

        let err = client(&server, Some(API_KEY))
            .fetch_recent_games(&key())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Upstream(ref c) if c == "Service unavailable"));
    }
}

mod credential {
    use super::*;

    #[tokio::test]
    async fn every_operation_requires_a_credential() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;

        for credential in [None, Some(""), Some("  ")] {
            let api = client(&server, credential);

            let profile = api.fetch_profile(&key()).await;
            let status = api.fetch_status(&key()).await;
            let games = api.fetch_recent_games(&key()).await;
            let lookup = api.lookup_player("Notch").await;

            assert!(matches!(profile, Err(ApiError::CredentialMissing(None))));
            assert!(matches!(status, Err(ApiError::CredentialMissing(None))));
            assert!(matches!(games, Err(ApiError::CredentialMissing(None))));
            assert!(matches!(lookup, Err(ApiError::CredentialMissing(None))));
            assert_eq!(api.metrics().total(), 0);
        }

        mock.assert_hits_async(0).await;
    }
}

mod identity {
    use super::*;

    #[tokio::test]
    async fn lookup_resolves_display_name_then_fetches_profile() {
        let server = MockServer::start_async().await;
        let identity = server
            .mock_async(|when, then| {
                when.method(GET).path("/users/profiles/minecraft/Notch");
                then.status(200).json_body(json!({ "id": KEY, "name": "Notch" }));
            })
            .await;
        let profile = server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/player").query_param("uuid", KEY);
                then.status(200).json_body(json!({
                    "success": true,
                    "player": { "uuid": KEY, "displayname": "Notch" }
                }));
            })
            .await;

        let api = client(&server, Some(API_KEY));
        assert_eq!(api.identity_route(), server.base_url());

        let player = api.lookup_player("  Notch ").await.unwrap();

        identity.assert_async().await;
        profile.assert_async().await;
        assert_eq!(player.identity_key, key());
        assert_eq!(player.effective_rank(), "Non-Ranked");
    }

    #[tokio::test]
    async fn lookup_with_identity_key_skips_resolution() {
        let server = MockServer::start_async().await;
        let identity = server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/users/profiles");
                then.status(500);
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/player");
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;

        let err = client(&server, Some(API_KEY))
            .lookup_player(&KEY.to_uppercase())
            .await
            .unwrap_err();

        identity.assert_hits_async(0).await;
        // Not found errors carry what the user typed.
        assert!(matches!(err, ApiError::NotFound(ref q) if q == &KEY.to_uppercase()));
    }

    #[tokio::test]
    async fn unknown_name_is_not_found() {
        for code in [204, 404] {
            let server = MockServer::start_async().await;
            server
                .mock_async(|when, then| {
                    when.method(GET).path("/users/profiles/minecraft/Nobody_123");
                    then.status(code);
                })
                .await;

            let api = client(&server, Some(API_KEY));
            let err = api
                .resolve_identity(&hystats_shared::DisplayName::parse("Nobody_123").unwrap())
                .await
                .unwrap_err();

            assert!(matches!(err, ApiError::NotFound(ref q) if q == "Nobody_123"));
        }
    }

    #[tokio::test]
    async fn identity_server_error_is_http_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/profiles/minecraft/Notch");
                then.status(503);
            })
            .await;

        let err = client(&server, Some(API_KEY))
            .resolve("Notch")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::HttpStatus(503)));
    }

    #[tokio::test]
    async fn malformed_identity_body_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/profiles/minecraft/Notch");
                then.status(200).json_body(json!({ "name": "Notch" }));
            })
            .await;

        let err = client(&server, Some(API_KEY))
            .resolve("Notch")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode { endpoint: "identity profile", .. }));
        assert!(err.to_string().contains("missing field `id`"));
        assert_eq!(err.path(), Some("."));
    }

    #[tokio::test]
    async fn unrecognized_input_fails_fast() {
        let server = MockServer::start_async().await;
        let any = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200);
            })
            .await;

        let api = client(&server, Some(API_KEY));

        let err = api.lookup_player("not a name!").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref q) if q == "not a name!"));

        let err = api.lookup_player("   ").await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));

        any.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn unreachable_identity_api_is_transport_error() {
        let config = ClientConfig::default().with_identity_base_url("http://127.0.0.1:1");
        let store = MemoryCredentialStore::new(Some(API_KEY.to_string()));
        let api = HypixelApiClient::new(config, Arc::new(store)).unwrap();

        let err = api.resolve("Notch").await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
    }
}

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn operations_run_in_parallel_on_one_client() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/player");
                then.status(200).json_body(json!({
                    "success": true,
                    "player": { "uuid": KEY, "displayname": "Notch" }
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/status");
                then.status(200).json_body(json!({ "success": true }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/recentgames");
                then.status(429);
            })
            .await;

        let api = Arc::new(client(&server, Some(API_KEY)));
        let key = key();

        let (profile, status, games) = tokio::join!(
            api.fetch_profile(&key),
            api.fetch_status(&key),
            api.fetch_recent_games(&key)
        );

        // One failing call does not affect the others.
        assert_eq!(profile.unwrap().display_name, "Notch");
        assert!(!status.unwrap().online);
        assert!(matches!(games, Err(ApiError::RateLimited)));
        assert_eq!(api.metrics().total(), 3);
    }

    #[tokio::test]
    async fn cancelled_call_does_not_affect_others() {
        let server = MockServer::start_async().await;
        let profile_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/player");
                then.status(200).json_body(json!({
                    "success": true,
                    "player": { "uuid": KEY, "displayname": "Notch" }
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/status");
                then.status(200)
                    .delay(Duration::from_secs(5))
                    .json_body(json!({ "success": true }));
            })
            .await;

        let api = client(&server, Some(API_KEY));
        let key = key();

        // The status future is dropped when the timeout fires.
        let (profile, status) = tokio::join!(
            api.fetch_profile(&key),
            tokio::time::timeout(Duration::from_millis(200), api.fetch_status(&key))
        );

        assert!(status.is_err());
        assert_eq!(profile.unwrap().display_name, "Notch");

        // The client stays usable after the cancellation.
        let again = api.fetch_profile(&key).await.unwrap();
        assert_eq!(again.identity_key, key);
        profile_mock.assert_hits_async(2).await;
    }
}

mod live {
    use super::*;

    fn live_client() -> HypixelApiClient {
        dotenv().ok();
        let key = env::var("HYPIXEL_API_KEY").expect("HYPIXEL_API_KEY not set");
        let store = MemoryCredentialStore::new(Some(key));
        HypixelApiClient::new(ClientConfig::default(), Arc::new(store)).unwrap()
    }

    #[tokio::test]
    #[ignore = "API Key required"]
    async fn lookup_player_returns_expected_profile() {
        let api = live_client();

        let player = api.lookup_player("Notch").await.unwrap();

        assert_eq!(player.identity_key.as_str(), KEY);
        assert!(!player.effective_rank().is_empty());
    }

    #[tokio::test]
    #[ignore = "API Key required"]
    async fn status_and_recent_games_do_not_error() {
        let api = live_client();

        let status = api.fetch_status(&key()).await.unwrap();
        let games = api.fetch_recent_games(&key()).await.unwrap();

        assert!(!status.summary().is_empty());
        for game in &games {
            assert!(game.date > 0);
        }
    }
}
