use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::live::is_live;
use crate::localize::local_race_time;
use crate::model::race::Race;

/// Fallback placeholder rendered for missing or unparseable fields.
const DASH: &str = "<span class=\"dash\">&mdash;</span>";

const PAGE_TITLE: &str = "Super Metroid Choozo Randomizer<br />2022 Schedule";

/// Minimal HTML escaping for text and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Comma-join an optional name list, falling back to the placeholder when
/// the list is absent or empty.
fn joined_or_dash(names: Option<&Vec<String>>) -> String {
    match names {
        Some(names) if !names.is_empty() => {
            let joined = names.join(", ");
            escape(&joined)
        }
        _ => DASH.to_string(),
    }
}

fn time_cell(race: &Race, tz: Tz) -> String {
    race.datetime
        .as_deref()
        .and_then(|dt| local_race_time(dt, tz))
        .map(|t| escape(&t))
        .unwrap_or_else(|| DASH.to_string())
}

fn live_cell(race: &Race, now: DateTime<Utc>) -> String {
    let live = race
        .datetime
        .as_deref()
        .map(|dt| is_live(dt, now))
        .unwrap_or(false);
    if live {
        "<span class=\"live\">Live</span>".to_string()
    } else {
        String::new()
    }
}

fn players_cell(race: &Race) -> String {
    if race.runners.is_empty() {
        DASH.to_string()
    } else {
        let joined = race.runners.join(" vs ");
        escape(&joined)
    }
}

fn channel_cell(race: &Race) -> String {
    match &race.channel {
        Some(channel) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape(&channel.url),
            escape(&channel.name)
        ),
        None => DASH.to_string(),
    }
}

/// Render one race as a table row. Derived fields (localized time, live
/// flag) are computed here, fresh per render, since "now" moves
/// independently of data refreshes.
fn render_row(race: &Race, tz: Tz, now: DateTime<Utc>) -> String {
    format!(
        concat!(
            "<tr>",
            "<td class=\"column_time\">{}</td>",
            "<td class=\"column_live\">{}</td>",
            "<td class=\"column_players\">{}</td>",
            "<td class=\"column_channel\">{}</td>",
            "<td class=\"column_commentary\">{}</td>",
            "<td class=\"column_tracking\">{}</td>",
            "</tr>"
        ),
        time_cell(race, tz),
        live_cell(race, now),
        players_cell(race),
        channel_cell(race),
        joined_or_dash(race.commentary.as_ref()),
        joined_or_dash(race.tracking.as_ref()),
    )
}

/// Render the six-column schedule table. The "Live" header cell is present
/// for semantic parity but its label is visually hidden.
pub fn render_table(races: &[Race], tz: Tz, now: DateTime<Utc>) -> String {
    let mut table = String::from(concat!(
        "<table>",
        "<thead><tr>",
        "<th>Time</th>",
        "<th class=\"heading_live\"><span>Live</span></th>",
        "<th>Players</th>",
        "<th>Channel</th>",
        "<th>Commentary</th>",
        "<th>Tracking</th>",
        "</tr></thead>",
        "<tbody>"
    ));
    for race in races {
        table.push_str(&render_row(race, tz, now));
    }
    table.push_str("</tbody></table>");
    table
}

/// Render the full schedule page around the table.
pub fn render_page(races: &[Race], tz: Tz, now: DateTime<Utc>) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>",
            "<html lang=\"en\">",
            "<head>",
            "<meta charset=\"utf-8\" />",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />",
            "<title>Race Schedule</title>",
            "<style>",
            "body{{font-family:sans-serif;margin:2rem}}",
            "table{{border-collapse:collapse;width:100%}}",
            "th,td{{text-align:left;padding:.5rem;border-bottom:1px solid #ddd}}",
            ".heading_live span{{position:absolute;width:1px;height:1px;overflow:hidden;clip:rect(0 0 0 0)}}",
            ".live{{color:#fff;background:#c00;padding:.1rem .4rem;border-radius:.25rem}}",
            ".dash{{color:#999}}",
            "</style>",
            "</head>",
            "<body>",
            "<main class=\"container\">",
            "<h1>{}</h1>",
            "{}",
            "</main>",
            "</body>",
            "</html>"
        ),
        PAGE_TITLE,
        render_table(races, tz, now),
    )
}
