//! The HTML document wrapped around the server-rendered page body.

/// Listens for the `HX-Trigger` event a failed refresh raises and shows it
/// as a blocking alert.
const ALERT_LISTENER: &str = r#"<script>
        document.body.addEventListener("users-fetch-failed", function (event) {
            window.alert(event.detail.value);
        });
    </script>"#;

/// Wraps `content` in the full document.
///
/// `alert` is shown with `window.alert` once the page loads; the index
/// handler uses it when the initial user fetch fails.
pub fn html_shell(title: &str, htmx_src: &str, content: &str, alert: Option<&str>) -> String {
    let title = escape(title);
    let htmx_src = escape(htmx_src);
    let alert = alert.map(alert_script).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="User directory and AI question console">
    <title>{title}</title>

    <script src="{htmx_src}"></script>
    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="min-h-screen bg-background text-textPrimary antialiased">
    <main id="app" class="container mx-auto px-4 md:px-6">
        {content}
    </main>
    {ALERT_LISTENER}
    {alert}
</body>
</html>"#
    )
}

fn alert_script(message: &str) -> String {
    // serde_json leaves `/` alone, so `</script>` in the message would close the tag
    let literal = serde_json::to_string(message)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/");
    format!(
        r#"<script>
        window.addEventListener("load", function () {{ window.alert({literal}); }});
    </script>"#
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
