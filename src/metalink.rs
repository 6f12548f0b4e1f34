use std::fmt::Write;

use crate::host::StringLookup;
use crate::models::MetaLink;

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Badge listing the parent courses a meta-linked child course pulls its roster from.
pub fn render_metalink(links: &[MetaLink], strings: &dyn StringLookup) -> String {
    let mut html = String::new();
    if links.is_empty() {
        return html;
    }

    let caption = strings.get_string("metalink", "block_course_overview_campus");
    let _ = write!(html, r#"<div class="coc-metalink hidden-phone">{caption} "#);
    for link in links {
        let _ = write!(
            html,
            r#"<span class="label label-warning">{}</span> "#,
            escape_html(&link.parent_code)
        );
    }
    html.push_str("</div>");

    html
}
