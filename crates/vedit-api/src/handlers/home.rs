//! Index page handler.

use axum::response::Html;

const INDEX_HTML: &str = r#"<html>
<head><title>Vedit</title></head>
<body>
<h1>Vedit is running</h1>
<form action="/upload" enctype="multipart/form-data" method="post">
<input name="file" type="file">
<input type="submit" value="Upload">
</form>
</body>
</html>
"#;

/// Minimal upload form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
