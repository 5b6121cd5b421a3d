use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::UTC;
use rink_board::agenda::games_for;
use rink_board::{
    build_events, classify, clean_team_name, expand_lockers, extract_locker, parse_csv,
    BoardConfig, Layout, LockerEntry, LockerText,
};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, hour, minute, 0)
        .single()
        .expect("valid instant")
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn public_skate_is_on_ice_with_default_rink() {
    let rows = vec![row(&[
        "2025-06-01T16:00:00Z",
        "2025-06-01T17:00:00Z",
        "Public Skate",
        "",
        "Rooms: 1, 3 (Red)",
    ])];
    let events = build_events(&rows, UTC, BoardConfig::default().default_rink);
    let sections = classify(&events, at(16, 30), UTC);

    assert_eq!(sections.on_ice.len(), 1);
    assert!(sections.up_next.is_none());
    assert!(sections.upcoming.is_empty());

    let event = &sections.on_ice[0];
    assert_eq!(event.locker, LockerText::Assigned("1, 3 (Red)".to_string()));
    assert_eq!(event.rink, 'C');
    assert_eq!(event.team, "Public Skate");
}

#[test]
fn two_future_events_split_into_up_next_and_upcoming() {
    let rows = vec![
        row(&["2025-06-01T19:00:00Z", "2025-06-01T20:00:00Z", "Hawks U14"]),
        row(&["2025-06-01T18:00:00Z", "2025-06-01T19:00:00Z", "Hawks U12"]),
    ];
    let events = build_events(&rows, UTC, 'C');
    let sections = classify(&events, at(15, 0), UTC);

    assert!(sections.on_ice.is_empty());
    assert_eq!(sections.layout(), Layout::TwoSection);
    assert_eq!(
        sections.up_next.as_ref().map(|event| event.start),
        Some(at(18, 0))
    );
    assert_eq!(
        sections
            .upcoming
            .iter()
            .map(|event| event.start)
            .collect::<Vec<_>>(),
        vec![at(19, 0)]
    );
}

#[test]
fn csv_feed_end_to_end() {
    let payload = "Start,End,Event Title,Custom Title,Description,Local\r\n\
        2025-06-01T16:00:00Z,2025-06-01T17:30:00Z,Rental,\"Bantam Tournament - Locker Rooms\",\"Locker Rooms: 2 (Red, White), 4 (Bantam A)\",12:00\r\n\
        2025-06-01T17:00:00Z,2025-06-01T18:00:00Z,\"Mites \"\"A\"\" && Mites B\",,\"LR 1 && LR 3\",13:00\r\n";
    let rows = parse_csv(payload);
    assert_eq!(rows.len(), 3);

    let config = BoardConfig::default();
    let events = build_events(&rows, UTC, config.default_rink);
    assert_eq!(events.len(), 2);

    let sections = classify(&events, at(17, 15), UTC);
    let titles = sections
        .on_ice
        .iter()
        .map(|event| event.team.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Bantam Tournament", "Mites \"A\" && Mites B"]);

    assert_eq!(
        expand_lockers(&sections.on_ice[0], &config),
        vec![
            LockerEntry::new("2", Some("Red, White".to_string())),
            LockerEntry::new("4", Some("Bantam A".to_string())),
        ]
    );

    let games = games_for(&sections.on_ice[1]);
    assert_eq!(
        games
            .iter()
            .map(|game| (game.title.as_str(), game.rooms.as_str()))
            .collect::<Vec<_>>(),
        vec![("Mites \"A\"", "1"), ("Mites B", "3")]
    );
}

#[test]
fn decoder_unescapes_quotes_and_commas() {
    assert_eq!(parse_csv("\"a,b\"\"c\""), vec![vec!["a,b\"c".to_string()]]);
}

#[test]
fn home_away_takes_priority() {
    assert_eq!(
        extract_locker("Home: 2 Away: 4").as_deref(),
        Some("2 (Home), 4 (Away)")
    );
}

#[test]
fn team_cleaning_is_idempotent() {
    let samples = [
        "Hawks U12 - Locker 3",
        "Learn to Skate – Rink Program",
        "Stick & Puck (Wings Ice Rink) — LR 2",
        "A - Rink Program - Rink Program (wings ice rink)",
        "Mites && Squirts",
        "- Locker",
        "(Wings Ice Rink)",
        "",
    ];
    for sample in samples {
        let once = clean_team_name(sample);
        assert_eq!(clean_team_name(&once), once, "{sample:?}");
    }
}
