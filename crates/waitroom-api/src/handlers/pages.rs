//! Demo protected service and the waiting page.

use axum::Router;
use axum::response::Html;
use axum::routing::get;

/// GET /
pub async fn landing() -> Html<&'static str> {
    Html(LANDING_HTML)
}

/// GET /waiting.html
pub async fn waiting_page() -> Html<&'static str> {
    Html(WAITING_HTML)
}

/// The protected demo service plus the waiting page it redirects to.
pub fn service_routes() -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/waiting.html", get(waiting_page))
}

const LANDING_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Welcome</title></head>
<body>
  <h1>You're in</h1>
  <p>This page is served only to admitted clients.</p>
</body>
</html>
"#;

const WAITING_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Please wait</title></head>
<body>
  <h1>You're in line</h1>
  <p id="position">Checking your position...</p>
  <script>
    async function poll() {
      try {
        const res = await fetch("/api/waiting-queue/status", { credentials: "same-origin" });
        if (res.status === 400 || res.status === 401) {
          window.location.href = "/";
          return;
        }
        if (res.ok) {
          const body = await res.json();
          if (body.status === "ACTIVE") {
            window.location.href = "/";
            return;
          }
          document.getElementById("position").textContent =
            "Position " + body.rank + " of " + body.totalWaiting;
        }
      } catch (e) {}
      setTimeout(poll, 2000);
    }
    poll();
  </script>
</body>
</html>
"#;
