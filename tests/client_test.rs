mod common;

use common::{BASE, ScriptedTransport, page, uris};
use monthsync::{
    Error,
    spotify::{Library, Method, RemoteLibraryClient},
    types::NewPlaylist,
};
use regex::Regex;
use serde_json::json;

fn client(transport: ScriptedTransport) -> RemoteLibraryClient<ScriptedTransport> {
    RemoteLibraryClient::new(transport, format!("{}/", BASE))
}

#[tokio::test]
async fn test_current_user_id() {
    let client = client(ScriptedTransport::new().on(
        Method::Get,
        &format!("{BASE}/me"),
        200,
        json!({ "id": "listener", "display_name": "Listener" }),
    ));

    assert_eq!(client.current_user_id().await.unwrap(), "listener");
}

#[tokio::test]
async fn test_saved_tracks_follow_pagination() {
    let second = format!("{BASE}/me/tracks?offset=50&limit=50");
    let client = client(
        ScriptedTransport::new()
            .on(
                Method::Get,
                &format!("{BASE}/me/tracks?limit=50"),
                200,
                page(
                    json!([{
                        "added_at": "2024-03-02T08:00:00Z",
                        "track": { "uri": "spotify:track:b", "name": "B" }
                    }]),
                    Some(second.as_str()),
                ),
            )
            .on(
                Method::Get,
                &second,
                200,
                page(
                    json!([{
                        "added_at": "2024-01-15T10:00:00Z",
                        "track": { "uri": "spotify:track:a" }
                    }]),
                    None,
                ),
            ),
    );

    let saved = client.saved_tracks().await.unwrap();

    assert_eq!(
        saved.iter().map(|s| s.track.uri.as_str()).collect::<Vec<_>>(),
        vec!["spotify:track:b", "spotify:track:a"]
    );
    assert_eq!(saved[0].track.name.as_deref(), Some("B"));
}

#[tokio::test]
async fn test_saved_track_without_added_at_fails_the_listing() {
    let client = client(ScriptedTransport::new().on(
        Method::Get,
        &format!("{BASE}/me/tracks?limit=50"),
        200,
        page(
            json!([
                { "added_at": "2024-01-15T10:00:00Z", "track": { "uri": "spotify:track:a" } },
                { "track": { "uri": "spotify:track:b" } }
            ]),
            None,
        ),
    ));

    match client.saved_tracks().await {
        Err(Error::Decode { message, .. }) => assert!(message.contains("added_at"), "{}", message),
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_saved_track_without_uri_fails_the_listing() {
    let client = client(ScriptedTransport::new().on(
        Method::Get,
        &format!("{BASE}/me/tracks?limit=50"),
        200,
        page(
            json!([{ "added_at": "2024-01-15T10:00:00Z", "track": { "name": "no uri" } }]),
            None,
        ),
    ));

    assert!(matches!(
        client.saved_tracks().await,
        Err(Error::Decode { .. })
    ));
}

#[tokio::test]
async fn test_get_playlist_reads_every_page_and_skips_unavailable_items() {
    let next = format!("{BASE}/playlists/p1/tracks?offset=100&limit=100");
    let client = client(
        ScriptedTransport::new()
            .on(
                Method::Get,
                &format!("{BASE}/playlists/p1"),
                200,
                json!({
                    "id": "p1",
                    "name": "January '24",
                    "tracks": {
                        "items": [
                            { "track": { "uri": "spotify:track:a" } },
                            { "track": null }
                        ],
                        "next": next
                    }
                }),
            )
            .on(
                Method::Get,
                &next,
                200,
                page(json!([{ "track": { "uri": "spotify:track:b" } }]), None),
            ),
    );

    let playlist = client.get_playlist("p1").await.unwrap();

    assert_eq!(playlist.id, "p1");
    assert_eq!(playlist.name, "January '24");
    assert_eq!(playlist.track_uris.len(), 2);
    assert!(playlist.track_uris.contains("spotify:track:a"));
    assert!(playlist.track_uris.contains("spotify:track:b"));
}

#[tokio::test]
async fn test_get_playlist_not_found_is_a_remote_error() {
    let client = client(ScriptedTransport::new());

    match client.get_playlist("missing").await {
        Err(Error::Remote {
            status, message, ..
        }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not found.");
        }
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_playlist_posts_settings_for_owner() {
    let url = format!("{BASE}/users/listener/playlists");
    let client = client(ScriptedTransport::new().on(
        Method::Post,
        &url,
        201,
        json!({ "id": "new-id", "name": "April '24", "public": true }),
    ));

    let created = client
        .create_playlist("listener", &NewPlaylist::public("April '24"))
        .await
        .unwrap();

    assert_eq!(created.id, "new-id");
    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, url);
    assert_eq!(
        requests[0].body,
        Some(json!({
            "name": "April '24",
            "public": true,
            "collaborative": false,
            "description": ""
        }))
    );
}

#[tokio::test]
async fn test_create_playlist_failure_is_not_swallowed() {
    let client = client(ScriptedTransport::new().on_raw(
        Method::Post,
        &format!("{BASE}/users/listener/playlists"),
        403,
        "Forbidden",
    ));

    match client
        .create_playlist("listener", &NewPlaylist::public("April '24"))
        .await
    {
        Err(Error::Remote {
            status, message, ..
        }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_append_nothing_sends_no_request() {
    let client = client(ScriptedTransport::new());

    client.append_tracks("p1", &[]).await.unwrap();

    assert!(client.transport().requests().is_empty());
}

#[tokio::test]
async fn test_append_sends_uris_in_order() {
    let url = format!("{BASE}/playlists/p1/tracks");
    let client = client(ScriptedTransport::new().on(
        Method::Post,
        &url,
        201,
        json!({ "snapshot_id": "s1" }),
    ));

    client
        .append_tracks("p1", &uris(&["spotify:track:c", "spotify:track:d"]))
        .await
        .unwrap();

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].body,
        Some(json!({ "uris": ["spotify:track:c", "spotify:track:d"] }))
    );
}

#[tokio::test]
async fn test_append_splits_large_batches() {
    let url = format!("{BASE}/playlists/p1/tracks");
    let client = client(ScriptedTransport::new().on(
        Method::Post,
        &url,
        201,
        json!({ "snapshot_id": "s1" }),
    ));
    let many: Vec<String> = (0..250).map(|i| format!("spotify:track:{i}")).collect();

    client.append_tracks("p1", &many).await.unwrap();

    let sizes: Vec<usize> = client
        .transport()
        .requests()
        .iter()
        .map(|r| r.body.as_ref().unwrap()["uris"].as_array().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    let first = client.transport().requests()[0].body.clone().unwrap();
    assert_eq!(first["uris"][0], "spotify:track:0");
}

#[tokio::test]
async fn test_append_failure_is_a_remote_error() {
    let client = client(ScriptedTransport::new().on(
        Method::Post,
        &format!("{BASE}/playlists/p1/tracks"),
        500,
        json!({ "error": { "status": 500, "message": "Server error" } }),
    ));

    assert!(matches!(
        client.append_tracks("p1", &uris(&["spotify:track:a"])).await,
        Err(Error::Remote { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_delete_playlist_unfollows() {
    let url = format!("{BASE}/playlists/p1/followers");
    let client = client(ScriptedTransport::new().on_raw(Method::Delete, &url, 200, ""));

    client.delete_playlist("p1").await.unwrap();

    assert_eq!(client.transport().requests()[0].url, url);
}

#[tokio::test]
async fn test_delete_playlists_matching_only_touches_matches() {
    let client = client(
        ScriptedTransport::new()
            .on(
                Method::Get,
                &format!("{BASE}/me/playlists?limit=50"),
                200,
                page(
                    json!([
                        { "id": "p1", "name": "January '24" },
                        { "id": "p2", "name": "Road trip" },
                        { "id": "p3", "name": "February '24" }
                    ]),
                    None,
                ),
            )
            .on_raw(Method::Delete, &format!("{BASE}/playlists/p1/followers"), 200, "")
            .on_raw(Method::Delete, &format!("{BASE}/playlists/p3/followers"), 200, ""),
    );
    let pattern = Regex::new(monthsync::utils::MONTH_LABEL_PATTERN).unwrap();

    let deleted = client.delete_playlists_matching(&pattern).await.unwrap();

    assert_eq!(
        deleted.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        vec!["p1", "p3"]
    );
    assert_eq!(client.transport().count(Method::Delete), 2);
}
