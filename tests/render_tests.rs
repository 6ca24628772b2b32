use chrono::{TimeZone, Utc};
use chrono_tz::Tz;

use race_schedule::model::channel::Channel;
use race_schedule::model::race::Race;
use race_schedule::render::{render_page, render_table};

fn sample_race() -> Race {
    Race {
        datetime: Some("2023-03-04T23:30:00Z".to_string()),
        runners: vec!["Oatsngoats".to_string(), "Eriror".to_string()],
        channel: Some(Channel {
            name: "SpeedGaming".to_string(),
            url: "https://www.twitch.tv/speedgaming".to_string(),
        }),
        commentary: Some(vec!["matrick".to_string(), "kipp".to_string()]),
        tracking: Some(vec!["restream".to_string()]),
    }
}

fn new_york() -> Tz {
    "America/New_York".parse().unwrap()
}

#[test]
fn renders_all_six_columns_for_a_full_record() {
    let now = Utc.with_ymd_and_hms(2023, 3, 4, 0, 0, 0).unwrap();
    let html = render_table(&[sample_race()], new_york(), now);

    assert!(html.contains("Mar 4, 6:30 pm"), "html was: {}", html);
    assert!(html.contains("Oatsngoats vs Eriror"), "html was: {}", html);
    assert!(
        html.contains("<a href=\"https://www.twitch.tv/speedgaming\""),
        "html was: {}",
        html
    );
    assert!(html.contains("SpeedGaming"), "html was: {}", html);
    assert!(html.contains("matrick, kipp"), "html was: {}", html);
    assert!(html.contains("restream"), "html was: {}", html);
}

#[test]
fn live_badge_appears_only_when_now_is_past_the_start() {
    let race = sample_race();

    let before = Utc.with_ymd_and_hms(2023, 3, 4, 23, 0, 0).unwrap();
    let html = render_table(&[race.clone()], new_york(), before);
    assert!(!html.contains("class=\"live\""), "html was: {}", html);

    let after = Utc.with_ymd_and_hms(2023, 3, 5, 0, 0, 0).unwrap();
    let html = render_table(&[race], new_york(), after);
    assert!(html.contains("<span class=\"live\">Live</span>"), "html was: {}", html);
}

#[test]
fn missing_channel_renders_the_placeholder_not_an_empty_cell() {
    let mut race = sample_race();
    race.channel = None;
    let now = Utc.with_ymd_and_hms(2023, 3, 4, 0, 0, 0).unwrap();
    let html = render_table(&[race], new_york(), now);

    assert!(
        html.contains("<td class=\"column_channel\"><span class=\"dash\">&mdash;</span></td>"),
        "html was: {}",
        html
    );
}

#[test]
fn absent_or_empty_optional_fields_fall_back_to_the_placeholder() {
    let race = Race {
        datetime: Some("not-a-date".to_string()),
        runners: Vec::new(),
        channel: None,
        commentary: Some(Vec::new()),
        tracking: None,
    };
    let now = Utc.with_ymd_and_hms(2023, 3, 4, 0, 0, 0).unwrap();
    let html = render_table(&[race], new_york(), now);

    // Unparseable datetime degrades the time cell and the live flag together
    assert!(
        html.contains("<td class=\"column_time\"><span class=\"dash\">&mdash;</span></td>"),
        "html was: {}",
        html
    );
    assert!(!html.contains("class=\"live\""), "html was: {}", html);
    for column in ["column_players", "column_commentary", "column_tracking"] {
        assert!(
            html.contains(&format!(
                "<td class=\"{}\"><span class=\"dash\">&mdash;</span></td>",
                column
            )),
            "missing placeholder in {}. html was: {}",
            column,
            html
        );
    }
}

#[test]
fn missing_datetime_field_degrades_like_a_parse_failure() {
    let mut race = sample_race();
    race.datetime = None;
    let now = Utc.with_ymd_and_hms(2023, 3, 5, 0, 0, 0).unwrap();
    let html = render_table(&[race], new_york(), now);

    assert!(
        html.contains("<td class=\"column_time\"><span class=\"dash\">&mdash;</span></td>"),
        "html was: {}",
        html
    );
    assert!(!html.contains("class=\"live\""), "html was: {}", html);
}

#[test]
fn interpolated_text_is_html_escaped() {
    let mut race = sample_race();
    race.runners = vec!["<script>alert(1)</script>".to_string(), "A & B".to_string()];
    race.channel = Some(Channel {
        name: "\"quoted\"".to_string(),
        url: "https://example.com/?a=1&b=2".to_string(),
    });
    let now = Utc.with_ymd_and_hms(2023, 3, 4, 0, 0, 0).unwrap();
    let html = render_table(&[race], new_york(), now);

    assert!(!html.contains("<script>"), "html was: {}", html);
    assert!(html.contains("&lt;script&gt;"), "html was: {}", html);
    assert!(html.contains("A &amp; B"), "html was: {}", html);
    assert!(html.contains("https://example.com/?a=1&amp;b=2"), "html was: {}", html);
    assert!(html.contains("&quot;quoted&quot;"), "html was: {}", html);
}

#[test]
fn table_header_keeps_the_hidden_live_column() {
    let now = Utc.with_ymd_and_hms(2023, 3, 4, 0, 0, 0).unwrap();
    let html = render_table(&[], new_york(), now);

    assert!(
        html.contains("<th class=\"heading_live\"><span>Live</span></th>"),
        "html was: {}",
        html
    );
    assert!(html.contains("<th>Time</th>"), "html was: {}", html);
    assert!(html.contains("<th>Tracking</th>"), "html was: {}", html);
}

#[test]
fn page_wraps_the_table_with_the_schedule_heading() {
    let now = Utc.with_ymd_and_hms(2023, 3, 4, 0, 0, 0).unwrap();
    let html = render_page(&[sample_race()], new_york(), now);

    assert!(html.starts_with("<!DOCTYPE html>"), "html was: {}", html);
    assert!(html.contains("2022 Schedule"), "html was: {}", html);
    assert!(html.contains("<table>"), "html was: {}", html);
}
