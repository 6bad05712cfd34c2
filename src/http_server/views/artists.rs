use super::{
    appearances, attr, escape, genre_tags, layout, optional_link, search_box, search_results,
};
use crate::http_server::flash::Flash;
use crate::services::artist::ArtistDetail;
use crate::services::listing::SearchResults;

pub fn index(artists: &[(i64, String)], flashes: &[Flash]) -> String {
    let items: String = artists
        .iter()
        .map(|(id, name)| format!(r#"<li><a href="/artists/{id}">{}</a></li>"#, escape(name)))
        .collect();
    let body = format!(
        r#"{}<ul class="items">{items}</ul>"#,
        search_box("/artists", "Find an artist")
    );
    layout("Artists", flashes, &body)
}

pub fn search(search_term: &str, results: &SearchResults, flashes: &[Flash]) -> String {
    let body = format!(
        "{}{}",
        search_box("/artists", "Find an artist"),
        search_results("/artists", search_term, results)
    );
    layout("Artist search", flashes, &body)
}

pub fn detail(detail: &ArtistDetail, flashes: &[Flash]) -> String {
    let artist = &detail.artist;

    let seeking = if artist.seeking_venue {
        format!(
            r#"<div class="seeking"><p class="lead">Currently seeking performance venues</p><p>{}</p></div>"#,
            escape(artist.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        r#"<p class="not-seeking">Not currently seeking performance venues</p>"#.to_string()
    };

    let image = artist
        .image_link
        .as_deref()
        .map(|src| format!(r#"<img class="portrait" src="{}" alt="Artist image">"#, attr(src)))
        .unwrap_or_default();

    let body = format!(
        r#"<div class="detail">
    <div>
        <h1>{name}</h1>
        <p class="subtitle">ID: {id}</p>
        <div class="genres">{genres}</div>
        <p><span class="label">Location</span> {city}, {state}</p>
        <p><span class="label">Phone</span> {phone}</p>
        {website}
        {facebook}
        {seeking}
    </div>
    {image}
</div>
<div class="actions">
    <a class="button" href="/artists/{id}/edit">Edit</a>
    <form method="post" action="/artists/{id}/delete">
        <input type="submit" class="button danger" value="Delete">
    </form>
</div>
{upcoming}
{past}"#,
        id = artist.id,
        name = escape(&artist.name),
        genres = genre_tags(&artist.genres),
        city = escape(&artist.city),
        state = escape(&artist.state),
        phone = escape(artist.phone.as_deref().unwrap_or("No phone")),
        website = optional_link("Website", artist.website.as_deref()),
        facebook = optional_link("Facebook", artist.facebook_link.as_deref()),
        upcoming = appearances("Upcoming", "/venues", &detail.schedule.upcoming_shows),
        past = appearances("Past", "/venues", &detail.schedule.past_shows),
    );

    layout(&artist.name, flashes, &body)
}
