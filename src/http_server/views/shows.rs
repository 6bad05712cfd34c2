use chrono::{DateTime, Utc};

use super::{DateFormat, attr, escape, format_datetime, layout};
use crate::http_server::flash::Flash;
use crate::services::schedule::TimeWindow;
use crate::services::show::ShowListing;

pub fn index(shows: &[ShowListing], now: DateTime<Utc>, flashes: &[Flash]) -> String {
    let tiles: String = shows.iter().map(|show| show_tile(show, now)).collect();

    let body = format!(r#"<h1>Shows</h1><div class="tiles">{tiles}</div>"#);
    layout("Shows", flashes, &body)
}

fn show_tile(show: &ShowListing, now: DateTime<Utc>) -> String {
    let image = show
        .artist_image_link
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="">"#, attr(src)))
        .unwrap_or_default();
    let badge = match show.window(now) {
        TimeWindow::Past => "past",
        TimeWindow::Upcoming => "upcoming",
    };
    format!(
        r#"<div class="tile {badge}">
{image}
<h4>{when}</h4>
<h5><a href="/artists/{artist_id}">{artist}</a></h5>
<p>playing at</p>
<h5><a href="/venues/{venue_id}">{venue}</a></h5>
</div>"#,
        when = format_datetime(show.start_time, DateFormat::Medium),
        artist_id = show.artist_id,
        artist = escape(&show.artist_name),
        venue_id = show.venue_id,
        venue = escape(&show.venue_name),
    )
}
