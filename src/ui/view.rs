//! HTML rendering of [`GenerationState`]. Every function here is pure.

use crate::{gallery::GenerationState, models::DisplayItem};

pub const PAGE_TITLE: &str = "Innovations from the Future";
pub const CARD_DESCRIPTION_LIMIT: usize = 150;

pub fn render_page(state: &GenerationState) -> String {
    let mut body = String::new();
    body.push_str(&render_header(state));

    if state.is_loading() {
        body.push_str(
            r#"<div class="loading" role="status"><div class="spinner"></div><p>Dreaming up the future...</p></div>"#,
        );
    } else if let Some(error) = state.error() {
        body.push_str(&format!(r#"<p class="error" role="alert">{}</p>"#, escape(error)));
    } else {
        body.push_str(&render_grid(state.items()));
    }

    if let Some(item) = state.selected() {
        body.push_str(&render_modal(item));
    }

    // Reload while a generation is running so the page picks up the result.
    let refresh = if state.is_loading() {
        r#"<meta http-equiv="refresh" content="2">"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}<title>{title}</title>
<style>{style}</style>
</head>
<body>
<main>
{body}
</main>
<script>{script}</script>
</body>
</html>
"#,
        refresh = refresh,
        title = PAGE_TITLE,
        style = STYLE,
        body = body,
        script = SCRIPT,
    )
}

fn render_header(state: &GenerationState) -> String {
    let (label, disabled) = if state.is_loading() {
        ("Generating...", " disabled")
    } else {
        ("Generate New Future", "")
    };
    format!(
        r#"<header><h1>{}</h1><form method="post" action="/regenerate"><button type="submit" class="regenerate"{}>{}</button></form></header>"#,
        PAGE_TITLE, disabled, label
    )
}

pub fn render_grid(items: &[DisplayItem]) -> String {
    let cards: String = items
        .iter()
        .enumerate()
        .map(|(index, item)| render_card(index, item))
        .collect();
    format!(r#"<section class="grid">{}</section>"#, cards)
}

pub fn render_card(index: usize, item: &DisplayItem) -> String {
    format!(
        r#"<form method="post" action="/cards/{index}/activate" class="card-form"><button type="submit" class="card" data-index="{index}"><img src="{src}" alt="{alt}"><h2>{title}</h2><p>{description}</p></button></form>"#,
        index = index,
        src = escape(&item.image_url),
        alt = escape(&item.title),
        title = escape(&item.title),
        description = escape(&truncate(&item.description, CARD_DESCRIPTION_LIMIT)),
    )
}

pub fn render_modal(item: &DisplayItem) -> String {
    format!(
        r#"<div class="overlay" role="dialog" aria-modal="true"><form method="post" action="/modal/overlay" class="overlay-hit"><button type="submit" aria-label="Dismiss"></button></form><div class="modal"><form method="post" action="/modal/close"><button type="submit" class="close" aria-label="Close">&times;</button></form><img src="{src}" alt="{alt}"><h2>{title}</h2><p>{description}</p></div></div>"#,
        src = escape(&item.image_url),
        alt = escape(&item.title),
        title = escape(&item.title),
        description = escape(&item.description),
    )
}

/// Cuts `text` to at most `limit` characters, adding an ellipsis when cut.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}…", cut.trim_end())
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{margin:0;background:#0b1020;color:#e6e9f2;font-family:system-ui,sans-serif}\
main{max-width:1200px;margin:0 auto;padding:2rem}\
header{display:flex;justify-content:space-between;align-items:center;gap:1rem}\
.regenerate{padding:.75rem 1.5rem;border:0;border-radius:999px;background:#6d5dfc;color:#fff;cursor:pointer}\
.regenerate[disabled]{opacity:.5;cursor:wait}\
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(320px,1fr));gap:1.5rem;margin-top:2rem}\
.card-form{margin:0}\
.card{all:unset;display:block;cursor:pointer;background:#151b30;border-radius:1rem;overflow:hidden}\
.card:focus{outline:2px solid #6d5dfc}\
.card img,.modal img{width:100%;aspect-ratio:16/9;object-fit:cover;display:block}\
.card h2,.card p{margin:.75rem 1rem}\
.loading,.error{text-align:center;margin-top:4rem}\
.error{color:#ff7b7b}\
.overlay{position:fixed;inset:0;display:flex;align-items:center;justify-content:center}\
.overlay-hit,.overlay-hit button{position:absolute;inset:0;margin:0;border:0;background:rgba(0,0,0,.7);cursor:pointer}\
.modal{position:relative;max-width:900px;width:90%;background:#151b30;border-radius:1rem;overflow:hidden}\
.modal h2,.modal p{margin:1rem 1.5rem}\
.close{position:absolute;top:.5rem;right:.75rem;border:0;background:none;color:#fff;font-size:2rem;cursor:pointer}";

// Escape is posted to the server; cards are buttons, so Enter/Space already submit them.
const SCRIPT: &str = "document.addEventListener('keydown',function(e){\
if(e.key==='Escape'&&document.querySelector('.overlay')){\
fetch('/keys/escape',{method:'POST'}).then(function(){location.replace('/');});}});";
