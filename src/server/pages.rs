//! Server-rendered HTML pages.

use crate::favorites::FavoriteEntry;
use crate::track_catalog::TrackRecord;
use crate::upload::ACCEPTED_EXTENSIONS;

pub const THEMES: &[(&str, &str)] = &[
    ("light", "Light"),
    ("dark", "Dark"),
    ("solarized", "Solarized"),
];

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Tunebox</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            line-height: 1.6;
        }}
        body.theme-dark {{ background-color: #1a1a1a; color: #e0e0e0; }}
        body.theme-solarized {{ background-color: #fdf6e3; color: #586e75; }}
        nav {{ padding: 12px 20px; border-bottom: 1px solid #ccc; }}
        nav a {{ margin-right: 16px; }}
        main {{ padding: 20px; }}
        li form {{ display: inline; }}
    </style>
    <script>
        document.addEventListener('DOMContentLoaded', function () {{
            var theme = localStorage.getItem('theme') || 'light';
            document.body.className = 'theme-' + theme;
        }});
    </script>
</head>
<body>
    <nav>
        <a href="/">Tracks</a>
        <a href="/upload">Upload</a>
        <a href="/favorites">Favorites</a>
        <a href="/themes">Themes</a>
    </nav>
    <main>
        <h1>{title}</h1>
{body}
    </main>
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}

fn add_to_favorites_form(title: &str, artist: &str) -> String {
    format!(
        r#"<form method="post" action="/add_to_favorites">
                <input type="hidden" name="track_title" value="{}">
                <input type="hidden" name="artist_name" value="{}">
                <button type="submit">Add to favorites</button>
            </form>"#,
        escape_html(title),
        escape_html(artist)
    )
}

pub fn render_index(tracks: &[TrackRecord]) -> String {
    let mut body = String::new();
    if tracks.is_empty() {
        body.push_str(r#"        <p>No tracks yet. <a href="/upload">Upload one</a>.</p>"#);
    } else {
        body.push_str("        <ul class=\"tracks\">\n");
        for track in tracks {
            body.push_str(&format!(
                r#"            <li>
                <strong>{title}</strong> by {artist}
                <audio controls preload="none" src="/{path}"></audio>
                {form}
            </li>
"#,
                title = escape_html(&track.title),
                artist = escape_html(&track.artist),
                path = escape_html(&track.path),
                form = add_to_favorites_form(&track.title, &track.artist),
            ));
        }
        body.push_str("        </ul>\n");
    }

    body.push_str(
        r#"        <h2>Add a favorite</h2>
        <form method="post" action="/add_to_favorites">
            <input type="text" name="track_title" placeholder="Track title">
            <input type="text" name="artist_name" placeholder="Artist name">
            <button type="submit">Add</button>
        </form>"#,
    );
    layout("Tracks", &body)
}

pub fn render_upload_form() -> String {
    let accept = ACCEPTED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",");
    let body = format!(
        r#"        <form method="post" action="/upload" enctype="multipart/form-data">
            <p><input type="file" name="file" accept="{accept}"></p>
            <p><input type="text" name="title" placeholder="Title"></p>
            <p><input type="text" name="artist" placeholder="Artist"></p>
            <button type="submit">Upload</button>
        </form>"#,
        accept = accept
    );
    layout("Upload a track", &body)
}

pub fn render_favorites(favorites: &[FavoriteEntry]) -> String {
    let mut body = String::new();
    if favorites.is_empty() {
        body.push_str("        <p>No favorites yet.</p>");
    } else {
        body.push_str("        <ul class=\"favorites\">\n");
        for favorite in favorites {
            body.push_str(&format!(
                r#"            <li id="favorite-{id}">
                <strong>{title}</strong> by {artist}
                <form method="post" action="/remove_from_favorites" onsubmit="return removeFavorite(event, {id});">
                    <input type="hidden" name="track_id" value="{id}">
                    <button type="submit">Remove</button>
                </form>
            </li>
"#,
                id = favorite.id,
                title = escape_html(&favorite.title),
                artist = escape_html(&favorite.artist),
            ));
        }
        body.push_str("        </ul>\n");
        // Removal answers 204, so the row is dropped client-side
        body.push_str(
            r#"        <script>
            function removeFavorite(event, id) {
                event.preventDefault();
                fetch('/remove_from_favorites', {
                    method: 'POST',
                    body: new URLSearchParams({ track_id: id })
                }).then(function (response) {
                    if (response.ok) {
                        document.getElementById('favorite-' + id).remove();
                    }
                });
                return false;
            }
        </script>"#,
        );
    }
    layout("Favorites", &body)
}

pub fn render_themes() -> String {
    let mut body = String::from("        <ul class=\"themes\">\n");
    for (key, label) in THEMES {
        body.push_str(&format!(
            r#"            <li><button type="button" onclick="localStorage.setItem('theme', '{key}'); document.body.className = 'theme-{key}';">{label}</button></li>
"#,
            key = key,
            label = label,
        ));
    }
    body.push_str("        </ul>");
    layout("Themes", &body)
}
