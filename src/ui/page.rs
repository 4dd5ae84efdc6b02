//! Page shell and lookup error markup

use super::escape_html;

/// The single message shown for any failed lookup
pub const FETCH_ERROR_MESSAGE: &str = "Cannot reach or not found!";

const ERROR_EMOJI: &str = "&#128533;";

/// Renders the fetch-status paragraph for a failed lookup
pub fn render_error() -> String {
    format!(
        r#"<p id="fetch-status">{} {}</p>"#,
        FETCH_ERROR_MESSAGE, ERROR_EMOJI
    )
}

/// Wraps `body` in a complete HTML document
///
/// The page carries a search form prefilled with `username`; `body` goes into
/// the result container and is inserted as-is.
pub fn render_page(username: Option<&str>, body: &str) -> String {
    let username = escape_html(username.unwrap_or(""));
    let title = if username.is_empty() {
        "GitHub profile".to_string()
    } else {
        format!("{} · GitHub profile", username)
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<form method="get">
<input id="username" name="username" type="text" value="{username}" placeholder="GitHub username" autofocus>
<button type="submit">Search</button>
</form>
<div id="result">
{body}
</div>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_contains_message() {
        let html = render_error();
        assert!(html.contains("Cannot reach or not found!"));
        assert!(html.contains(r#"id="fetch-status""#));
    }

    #[test]
    fn test_render_page_prefills_search_box() {
        let html = render_page(Some("octocat"), "<section></section>");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"value="octocat""#));
        assert!(html.contains("<title>octocat · GitHub profile</title>"));
        assert!(html.contains("<section></section>"));
    }

    #[test]
    fn test_render_page_without_username() {
        let html = render_page(None, "");

        assert!(html.contains(r#"value="""#));
        assert!(html.contains("<title>GitHub profile</title>"));
    }

    #[test]
    fn test_render_page_escapes_username() {
        let html = render_page(Some(r#""><b>"#), "");
        assert!(html.contains(r#"value="&quot;&gt;&lt;b&gt;""#));
    }
}
