//! Profile card markup
//!
//! Two sections: the identity block (avatar, name, login, bio, website) and
//! the statistics block (join date, social counts, stars, contact details,
//! organizations).

use super::escape_html;
use crate::data::{normalize_website, Profile};

/// Icons rendered in front of each detail line
const ICON_LINK: &str = "&#128279;";
const ICON_CALENDAR: &str = "&#128198;";
const ICON_PEOPLE: &str = "&#128101;";
const ICON_FOLDER: &str = "&#128193;";
const ICON_STAR: &str = "&#11088;";
const ICON_COMPANY: &str = "&#127970;";
const ICON_PIN: &str = "&#128205;";
const ICON_MAIL: &str = "&#9993;&#65039;";

/// Shown when the stars request failed
const UNKNOWN_COUNT: &str = "?";

/// Renders the profile as an HTML fragment
pub fn render_profile(profile: &Profile) -> String {
    let mut parts: Vec<String> = Vec::new();

    parts.push("<section>".to_string());
    parts.push(format!(
        r#"<img id="avatar" src="{}" alt="avatar">"#,
        escape_html(&profile.avatar_url)
    ));
    parts.push(format!(
        r#"<div><p id="name"><a href="{}">{}</a></p><p id="login">{}</p></div>"#,
        escape_html(&profile.user_url),
        escape_html(profile.display_name()),
        escape_html(&profile.username)
    ));

    if let Some(ref bio) = profile.bio {
        parts.push(format!(r#"<p id="bio">{}</p>"#, escape_html(bio)));
    }

    // Cached or hand-built profiles may predate normalization
    if let Some(website) = profile.website_url.as_deref().and_then(normalize_website) {
        let website = escape_html(&website);
        parts.push(content_line(
            ICON_LINK,
            &format!(r#"<a class="value" href="{0}">{0}</a>"#, website),
        ));
    }
    parts.push("</section>".to_string());

    parts.push("<section>".to_string());
    parts.push(content_line(
        ICON_CALENDAR,
        &format!("Since {}", value(&profile.created_at)),
    ));
    parts.push("<br>".to_string());

    parts.push(content_line(
        ICON_PEOPLE,
        &format!(
            "{} followers <span> • </span>{} following",
            value(&profile.followers.to_string()),
            value(&profile.following.to_string())
        ),
    ));
    parts.push(content_line(
        ICON_FOLDER,
        &format!(
            "{} repos <span> • </span>{} gists",
            value(&profile.repos.to_string()),
            value(&profile.gists.to_string())
        ),
    ));

    let stars = profile
        .stars
        .map(|count| count.to_string())
        .unwrap_or_else(|| UNKNOWN_COUNT.to_string());
    parts.push(content_line(ICON_STAR, &format!("{} stars", value(&stars))));
    parts.push("<br>".to_string());

    for (icon, field) in [
        (ICON_COMPANY, &profile.company),
        (ICON_PIN, &profile.location),
        (ICON_MAIL, &profile.email),
    ] {
        if let Some(text) = field {
            parts.push(content_line(icon, &value(text)));
        }
    }

    if !profile.orgs.is_empty() {
        parts.push("<br>".to_string());
        parts.push(r#"<p class="value">Organizations</p>"#.to_string());
        parts.push(r#"<div id="organizations">"#.to_string());
        for org in &profile.orgs {
            parts.push(format!(
                r#"<a href="{}"><img src="{}" alt="organization"></a>"#,
                escape_html(&org.org_url),
                escape_html(&org.avatar_url)
            ));
        }
        parts.push("</div>".to_string());
    }

    parts.push("</section>".to_string());

    parts.join("\n")
}

/// A `<p class="content">` line with a leading icon. `body` must already be escaped.
fn content_line(icon: &str, body: &str) -> String {
    format!(r#"<p class="content"><span>{} </span>{}</p>"#, icon, body)
}

fn value(text: &str) -> String {
    format!(r#"<span class="value">{}</span>"#, escape_html(text))
}
