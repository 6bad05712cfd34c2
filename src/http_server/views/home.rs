use super::{escape, layout};
use crate::http_server::flash::Flash;
use crate::services::artist::Artist;
use crate::services::venue::Venue;

pub fn page(venues: &[Venue], artists: &[Artist], flashes: &[Flash]) -> String {
    let recent_venues: String = venues
        .iter()
        .map(|venue| {
            format!(
                r#"<li><a href="/venues/{}">{}</a> <span class="muted">{}, {}</span></li>"#,
                venue.id,
                escape(&venue.name),
                escape(&venue.city),
                escape(&venue.state)
            )
        })
        .collect();

    let recent_artists: String = artists
        .iter()
        .map(|artist| {
            format!(
                r#"<li><a href="/artists/{}">{}</a></li>"#,
                artist.id,
                escape(&artist.name)
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Showbook</h1>
<p class="lead">Book local artists at local venues.</p>
<div class="columns">
    <section>
        <h2>Recently listed venues</h2>
        <ul class="items">{recent_venues}</ul>
    </section>
    <section>
        <h2>Recently listed artists</h2>
        <ul class="items">{recent_artists}</ul>
    </section>
</div>"#
    );

    layout("Home", flashes, &body)
}
