//! Server-rendered HTML pages.

pub mod artists;
pub mod errors;
pub mod forms;
pub mod home;
pub mod shows;
pub mod venues;

use std::borrow::Cow;
use chrono::{DateTime, Utc};

use crate::http_server::flash::{Flash, Level};
use crate::services::listing::SearchResults;
use crate::services::schedule::Appearance;

pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

pub fn attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// Tuesday May, 21, 2019 at 9:30PM
    Full,
    /// Tue 05, 21, 2019 9:30PM
    Medium,
}

pub fn format_datetime(value: DateTime<Utc>, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    value.format(pattern).to_string()
}

pub fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let messages: String = flashes
        .iter()
        .map(|flash| {
            let class = match flash.level {
                Level::Info => "flash flash-info",
                Level::Error => "flash flash-error",
            };
            format!(
                r#"<div class="{class}" role="alert">{}</div>"#,
                escape(&flash.message)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Showbook</title>
    <link rel="stylesheet" href="/static/css/main.css">
</head>
<body>
    <nav class="navbar">
        <a class="brand" href="/">Showbook</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
        <span class="spacer"></span>
        <a class="button" href="/venues/create">Post a venue</a>
        <a class="button" href="/artists/create">Post an artist</a>
        <a class="button" href="/shows/create">Post a show</a>
    </nav>
    <main class="container">
        {messages}
        {body}
    </main>
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Shared by the venue and artist search pages. `base` is `/venues` or `/artists`.
pub fn search_results(base: &str, search_term: &str, results: &SearchResults) -> String {
    let items: String = results
        .data
        .iter()
        .map(|record| {
            format!(
                r#"<li><a href="{base}/{id}">{name}</a> <span class="muted">{count} upcoming shows</span></li>"#,
                id = record.id,
                name = escape(&record.name),
                count = record.num_upcoming_shows,
            )
        })
        .collect();

    format!(
        r#"<h2>Number of search results for "{term}": {count}</h2>
<ul class="items">{items}</ul>"#,
        term = escape(search_term),
        count = results.count,
    )
}

pub fn search_box(base: &str, placeholder: &str) -> String {
    format!(
        r#"<form class="search" method="post" action="{base}/search">
    <input type="search" name="search_term" placeholder="{placeholder}" aria-label="{placeholder}">
</form>"#,
        placeholder = attr(placeholder),
    )
}

/// A past or upcoming list on a detail page. `base` is where the counterpart lives.
pub fn appearances(heading: &str, base: &str, shows: &[Appearance]) -> String {
    let cards: String = shows
        .iter()
        .map(|show| {
            let image = show
                .counterpart_image_link
                .as_deref()
                .map(|src| format!(r#"<img src="{}" alt="">"#, attr(src)))
                .unwrap_or_default();
            format!(
                r#"<div class="tile">{image}<h5><a href="{base}/{id}">{name}</a></h5><h6>{when}</h6></div>"#,
                id = show.counterpart_id,
                name = escape(&show.counterpart_name),
                when = format_datetime(show.start_time, DateFormat::Full),
            )
        })
        .collect();

    format!(
        r#"<section class="shows">
    <h2>{count} {heading} {noun}</h2>
    <div class="tiles">{cards}</div>
</section>"#,
        count = shows.len(),
        heading = escape(heading),
        noun = if shows.len() == 1 { "Show" } else { "Shows" },
    )
}

pub fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|genre| format!(r#"<span class="genre">{}</span>"#, escape(genre)))
        .collect()
}

pub fn optional_link(label: &str, href: Option<&str>) -> String {
    match href {
        Some(href) => format!(
            r#"<p><span class="label">{label}</span> <a href="{}" rel="noopener">{}</a></p>"#,
            attr(href),
            escape(href)
        ),
        None => format!(r#"<p><span class="label">{label}</span> No {label}</p>"#),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_format_datetime() {
        let at = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        assert_eq!(
            format_datetime(at, DateFormat::Full),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
        assert_eq!(
            format_datetime(at, DateFormat::Medium),
            "Tue 05, 21, 2019 9:30PM"
        );

        let morning = Utc.with_ymd_and_hms(2035, 4, 1, 9, 5, 0).unwrap();
        assert_eq!(
            format_datetime(morning, DateFormat::Full),
            "Sunday April, 1, 2035 at 9:05AM"
        );
    }

    #[test]
    fn test_layout_escapes_flash_messages() {
        let page = layout(
            "Home",
            &[Flash::error("Venue <b>Hop</b> could not be listed.")],
            "<p>body</p>",
        );
        assert!(page.contains("Venue &lt;b&gt;Hop&lt;/b&gt; could not be listed."));
        assert!(page.contains("<p>body</p>"));
        assert!(page.contains("flash-error"));
    }
}
