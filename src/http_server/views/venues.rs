use super::{
    appearances, attr, escape, genre_tags, layout, optional_link, search_box, search_results,
};
use crate::http_server::flash::Flash;
use crate::services::listing::{Area, RecordSummary, SearchResults};
use crate::services::venue::VenueDetail;

pub fn index(areas: &[Area<RecordSummary>], flashes: &[Flash]) -> String {
    let groups: String = areas
        .iter()
        .map(|area| {
            let items: String = area
                .venues
                .iter()
                .map(|venue| {
                    format!(
                        r#"<li><a href="/venues/{}">{}</a> <span class="muted">{} upcoming shows</span></li>"#,
                        venue.id,
                        escape(&venue.name),
                        venue.num_upcoming_shows
                    )
                })
                .collect();
            format!(
                r#"<h3>{}, {}</h3><ul class="items">{items}</ul>"#,
                escape(&area.city),
                escape(&area.state)
            )
        })
        .collect();
    let body = format!("{}{groups}", search_box("/venues", "Find a venue"));
    layout("Venues", flashes, &body)
}

pub fn search(search_term: &str, results: &SearchResults, flashes: &[Flash]) -> String {
    let body = format!(
        "{}{}",
        search_box("/venues", "Find a venue"),
        search_results("/venues", search_term, results)
    );
    layout("Venue search", flashes, &body)
}

pub fn detail(detail: &VenueDetail, flashes: &[Flash]) -> String {
    let venue = &detail.venue;

    let seeking = if venue.seeking_talent {
        format!(
            r#"<div class="seeking"><p class="lead">Currently seeking talent</p><p>{}</p></div>"#,
            escape(venue.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        r#"<p class="not-seeking">Not currently seeking talent</p>"#.to_string()
    };

    let image = venue
        .image_link
        .as_deref()
        .map(|src| format!(r#"<img class="portrait" src="{}" alt="Venue image">"#, attr(src)))
        .unwrap_or_default();

    let body = format!(
        r#"<div class="detail">
    <div>
        <h1>{name}</h1>
        <p class="subtitle">ID: {id}</p>
        <div class="genres">{genres}</div>
        <p><span class="label">Address</span> {address}</p>
        <p><span class="label">Location</span> {city}, {state}</p>
        <p><span class="label">Phone</span> {phone}</p>
        {website}
        {facebook}
        {seeking}
    </div>
    {image}
</div>
<div class="actions">
    <a class="button" href="/venues/{id}/edit">Edit</a>
    <form method="post" action="/venues/{id}/delete">
        <input type="submit" class="button danger" value="Delete">
    </form>
</div>
{upcoming}
{past}"#,
        id = venue.id,
        name = escape(&venue.name),
        genres = genre_tags(&venue.genres),
        address = escape(&venue.address),
        city = escape(&venue.city),
        state = escape(&venue.state),
        phone = escape(venue.phone.as_deref().unwrap_or("No phone")),
        website = optional_link("Website", venue.website.as_deref()),
        facebook = optional_link("Facebook", venue.facebook_link.as_deref()),
        upcoming = appearances("Upcoming", "/artists", &detail.schedule.upcoming_shows),
        past = appearances("Past", "/artists", &detail.schedule.past_shows),
    );

    layout(&venue.name, flashes, &body)
}
