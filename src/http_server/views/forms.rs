use super::{attr, escape, layout};
use crate::forms::FormErrors;
use crate::forms::artist::ArtistForm;
use crate::forms::choices::{GENRES, STATES};
use crate::forms::show::ShowForm;
use crate::forms::venue::VenueForm;
use crate::http_server::flash::Flash;

fn field_errors(errors: &FormErrors, field: &str) -> String {
    errors
        .for_field(field)
        .map(|message| format!(r#"<span class="field-error">{}</span>"#, escape(message)))
        .collect()
}

fn text_field(errors: &FormErrors, name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<div class="form-group">
    <label for="{name}">{label}</label>
    <input type="text" id="{name}" name="{name}" value="{value}">
    {errors}
</div>"#,
        value = attr(value),
        errors = field_errors(errors, name),
    )
}

fn textarea_field(errors: &FormErrors, name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<div class="form-group">
    <label for="{name}">{label}</label>
    <textarea id="{name}" name="{name}">{value}</textarea>
    {errors}
</div>"#,
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

fn select_field(
    errors: &FormErrors,
    name: &str,
    label: &str,
    choices: &[&str],
    selected: &[String],
    multiple: bool,
) -> String {
    let options: String = choices
        .iter()
        .map(|choice| {
            let marker = if selected.iter().any(|s| s == choice) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{value}"{marker}>{text}</option>"#,
                value = attr(choice),
                text = escape(choice),
            )
        })
        .collect();

    format!(
        r#"<div class="form-group">
    <label for="{name}">{label}</label>
    <select id="{name}" name="{name}"{multiple}>{options}</select>
    {errors}
</div>"#,
        multiple = if multiple { " multiple" } else { "" },
        errors = field_errors(errors, name),
    )
}

fn checkbox_field(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<div class="form-group checkbox">
    <input type="checkbox" id="{name}" name="{name}" value="y"{checked}>
    <label for="{name}">{label}</label>
</div>"#,
        checked = if checked { " checked" } else { "" },
    )
}

fn form_page(
    title: &str,
    action: &str,
    submit: &str,
    fields: &str,
    flashes: &[Flash],
    errors: &FormErrors,
) -> String {
    let summary = if errors.is_empty() {
        String::new()
    } else {
        r#"<div class="form-errors">Please fix the highlighted fields.</div>"#.to_string()
    };

    let body = format!(
        r#"<div class="form-wrapper">
    <h3>{title}</h3>
    {summary}
    <form method="post" action="{action}">
        {fields}
        <input type="submit" value="{submit}" class="button">
    </form>
</div>"#,
        title = escape(title),
        action = attr(action),
        submit = attr(submit),
    );

    layout(title, flashes, &body)
}

pub fn venue_form(
    title: &str,
    action: &str,
    form: &VenueForm,
    errors: &FormErrors,
    flashes: &[Flash],
) -> String {
    let fields = [
        text_field(errors, "name", "Name", &form.name),
        text_field(errors, "city", "City", &form.city),
        select_field(errors, "state", "State", STATES, std::slice::from_ref(&form.state), false),
        text_field(errors, "address", "Address", &form.address),
        text_field(errors, "phone", "Phone", &form.phone),
        select_field(errors, "genres", "Genres", GENRES, &form.genres, true),
        text_field(errors, "image_link", "Image link", &form.image_link),
        text_field(errors, "facebook_link", "Facebook link", &form.facebook_link),
        text_field(errors, "website", "Website", &form.website),
        checkbox_field("seeking_talent", "Seeking talent", form.seeking_talent()),
        textarea_field(
            errors,
            "seeking_description",
            "Seeking description",
            &form.seeking_description,
        ),
    ]
    .concat();

    form_page(title, action, "Save venue", &fields, flashes, errors)
}

pub fn artist_form(
    title: &str,
    action: &str,
    form: &ArtistForm,
    errors: &FormErrors,
    flashes: &[Flash],
) -> String {
    let fields = [
        text_field(errors, "name", "Name", &form.name),
        text_field(errors, "city", "City", &form.city),
        select_field(errors, "state", "State", STATES, std::slice::from_ref(&form.state), false),
        text_field(errors, "phone", "Phone", &form.phone),
        select_field(errors, "genres", "Genres", GENRES, &form.genres, true),
        text_field(errors, "image_link", "Image link", &form.image_link),
        text_field(errors, "facebook_link", "Facebook link", &form.facebook_link),
        text_field(errors, "website", "Website", &form.website),
        checkbox_field("seeking_venue", "Seeking venue", form.seeking_venue()),
        textarea_field(
            errors,
            "seeking_description",
            "Seeking description",
            &form.seeking_description,
        ),
    ]
    .concat();

    form_page(title, action, "Save artist", &fields, flashes, errors)
}

pub fn show_form(form: &ShowForm, errors: &FormErrors, flashes: &[Flash]) -> String {
    let fields = [
        text_field(errors, "artist_id", "Artist ID", &form.artist_id),
        text_field(errors, "venue_id", "Venue ID", &form.venue_id),
        text_field(errors, "start_time", "Start time", &form.start_time),
    ]
    .concat();

    form_page(
        "List a new show",
        "/shows/create",
        "Create show",
        &fields,
        flashes,
        errors,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_form_keeps_submitted_values() {
        let form = VenueForm {
            name: "The \"Hop\"".into(),
            state: "CA".into(),
            genres: vec!["Jazz".into(), "Folk".into()],
            seeking_talent: Some("y".into()),
            ..Default::default()
        };
        let mut errors = FormErrors::default();
        errors.push("city", "This field is required.");

        let page = venue_form("List a new venue", "/venues/create", &form, &errors, &[]);

        assert!(page.contains(r#"value="The &quot;Hop&quot;""#));
        assert!(page.contains(r#"<option value="CA" selected>"#));
        assert!(page.contains(r#"<option value="Jazz" selected>"#));
        assert!(page.contains(r#"<option value="Blues">"#));
        assert!(page.contains(r#"name="seeking_talent" value="y" checked"#));
        assert!(page.contains("This field is required."));
    }
}
