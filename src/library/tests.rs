use super::*;
use crate::config::TrackDisplayField;
use pretty_assertions::assert_eq;

fn t(id: &str, title: &str, artists: &[&str], album: Option<&str>, length: u32) -> Track {
    let mut track = Track::new(id, title);
    track.artists = artists.iter().map(|a| a.to_string()).collect();
    track.album = album.map(str::to_string);
    track.length = Some(length);
    track
}

#[test]
fn display_from_fields_can_format_artist_title() {
    let mut track = t("1", "Song", &["Artist"], None, 0);
    track.filepath = Some("/tmp/Song File.mp3".into());

    assert_eq!(
        display_from_fields(&track, &[TrackDisplayField::Artist, TrackDisplayField::Title], " - "),
        "Artist - Song"
    );
    assert_eq!(
        display_from_fields(&track, &[TrackDisplayField::Filename], " - "),
        "Song File"
    );

    track.artists = vec!["  ".into()];
    assert_eq!(
        display_from_fields(&track, &[TrackDisplayField::Artist, TrackDisplayField::Title], " - "),
        "Song"
    );
    assert_eq!(display_from_fields(&track, &[TrackDisplayField::Album], " - "), "Song");
}

#[test]
fn display_joins_multiple_artists_in_order() {
    let track = t("1", "Don't Give Up", &["Peter Gabriel", "Kate Bush"], None, 0);
    assert_eq!(
        display_from_fields(&track, &[TrackDisplayField::Display], " - "),
        "Peter Gabriel, Kate Bush - Don't Give Up"
    );
}

#[test]
fn format_seconds_short_and_long() {
    assert_eq!(format_seconds(0, false), "0:00");
    assert_eq!(format_seconds(65, false), "1:05");
    assert_eq!(format_seconds(3723, false), "1:02:03");
    assert_eq!(format_seconds(42, true), "42 sec");
    assert_eq!(format_seconds(200, true), "3 min 20 sec");
    assert_eq!(format_seconds(3900, true), "1 hr 5 min");
}

#[test]
fn put_commas_groups_thousands() {
    assert_eq!(put_commas(0), "0");
    assert_eq!(put_commas(999), "999");
    assert_eq!(put_commas(1000), "1,000");
    assert_eq!(put_commas(1234567), "1,234,567");
}

#[test]
fn album_hash_keeps_lowercase_alphanumerics() {
    assert_eq!(album_hash("So (Remastered)", "Peter Gabriel"), "soremasteredpetergabriel");
    assert_eq!(album_hash("", ""), "");
}

#[test]
fn albums_group_by_title_and_artist() {
    let tracks = vec![
        t("1", "Red Rain", &["Peter Gabriel"], Some("So"), 340),
        t("2", "Sledgehammer", &["Peter Gabriel"], Some("So"), 300),
        t("3", "Loose", &["Someone"], None, 100),
        t("4", "Biko", &["Peter Gabriel"], Some("Peter Gabriel 3"), 450),
    ];

    let albums = albums_from_tracks(&tracks);
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0].title, "So");
    assert_eq!(albums[0].artist, "Peter Gabriel");
    assert_eq!(albums[0].count, 2);
    assert_eq!(albums[0].duration, 640);
    assert!(!albums[0].is_single);
    assert_eq!(albums[1].count, 1);
    assert!(albums[1].is_single);
}

#[test]
fn artists_are_unique_case_insensitively() {
    let tracks = vec![
        t("1", "a", &["Kate Bush", "Peter Gabriel"], None, 0),
        t("2", "b", &["kate bush"], None, 0),
        t("3", "c", &[" "], None, 0),
    ];
    let names: Vec<String> = artists_from_tracks(&tracks).into_iter().map(|a| a.name).collect();
    assert_eq!(names, vec!["Kate Bush", "Peter Gabriel"]);
}

#[test]
fn sort_by_track_no_orders_disc_then_track() {
    let mut tracks = vec![
        t("a", "a", &[], None, 0),
        t("b", "b", &[], None, 0),
        t("c", "c", &[], None, 0),
    ];
    tracks[0].disknumber = Some(2);
    tracks[0].tracknumber = Some(1);
    tracks[1].disknumber = Some(1);
    tracks[1].tracknumber = Some(9);
    tracks[2].disknumber = Some(1);
    tracks[2].tracknumber = Some(2);

    reindex(&mut tracks);

    sort_by_track_no(&mut tracks);
    let order: Vec<(&str, Option<usize>)> = tracks.iter().map(|t| (t.trackid.as_str(), t.index)).collect();
    assert_eq!(order, vec![("c", Some(0)), ("b", Some(1)), ("a", Some(2))]);
}

#[test]
fn move_track_recomputes_indices() {
    let mut tracks = vec![t("a", "a", &[], None, 0), t("b", "b", &[], None, 0), t("c", "c", &[], None, 0)];
    reindex(&mut tracks);

    assert!(move_track(&mut tracks, 2, 0));
    let order: Vec<(&str, Option<usize>)> = tracks.iter().map(|t| (t.trackid.as_str(), t.index)).collect();
    assert_eq!(order, vec![("c", Some(0)), ("a", Some(1)), ("b", Some(2))]);

    assert!(!move_track(&mut tracks, 3, 0));
}

#[test]
fn playlist_count_prefers_loaded_tracks() {
    let mut playlist = Playlist {
        playlistid: "p1".into(),
        name: "Mix".into(),
        description: None,
        tracks: None,
        count: Some(7),
        last_updated: None,
        image: None,
        thumb: None,
    };
    assert_eq!(playlist.track_count(), 7);

    playlist.tracks = Some(vec![t("1", "a", &[], None, 0)]);
    assert_eq!(playlist.track_count(), 1);

    playlist.tracks = None;
    playlist.count = None;
    assert_eq!(playlist.track_count(), 0);
}

#[test]
fn track_with_missing_optionals_deserializes() {
    let track: Track = serde_json::from_str(r#"{"trackid":"x","title":"Only"}"#).unwrap();
    assert_eq!(track, Track::new("x", "Only"));

    let json = serde_json::to_string(&track).unwrap();
    assert!(!json.contains("album"));
    assert!(!json.contains("null"));
}

#[test]
fn library_from_tracks_derives_albums_and_artists() {
    let library = Library::from_tracks(vec![t("1", "Biko", &["Peter Gabriel"], Some("III"), 10)]);
    assert_eq!(library.albums.len(), 1);
    assert_eq!(library.artists.len(), 1);
    assert!(!library.is_empty());
    assert!(Library::default().is_empty());
}
