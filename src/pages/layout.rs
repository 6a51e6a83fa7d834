//! Page shell: document head, header with navigation and search, footer.

use std::fmt::Write;

use super::html::{escape, query_string};
use crate::catalog::Category;

const NAV_LINKS: [(&str, &str); 3] = [
    ("Home", "/"),
    ("All Products", "/products"),
    ("Categories", "/categories"),
];

const STYLES: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;background:#f9fafb;color:#1f2937}
a{color:inherit;text-decoration:none}
.container{max-width:80rem;margin:0 auto;padding:0 1rem}
.site-header{background:#fff;border-bottom:1px solid #e5e7eb}
.site-header .bar{display:flex;align-items:center;justify-content:space-between;gap:1rem;padding:1rem 0}
.logo{font-weight:700;font-size:1.5rem}
nav ul{display:flex;gap:1.5rem;list-style:none;margin:0;padding:0 0 1rem}
nav li{position:relative}
nav .dropdown{display:none;position:absolute;background:#fff;border:1px solid #e5e7eb;padding:.5rem;min-width:14rem;z-index:10}
nav li:hover .dropdown{display:block}
nav .dropdown a{display:block;padding:.25rem .5rem}
.grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(15rem,1fr));gap:1.5rem}
.card{background:#fff;border:1px solid #e5e7eb;border-radius:.5rem;overflow:hidden;display:flex;flex-direction:column}
.card .media{position:relative;height:16rem;background:#f3f4f6}
.card .media img{width:100%;height:100%;object-fit:cover}
.card .sold-out{position:absolute;inset:0;background:rgba(0,0,0,.5);color:#fff;display:flex;align-items:center;justify-content:center;font-weight:700}
.card .body{padding:1rem;display:flex;flex-direction:column;flex:1}
.badge{display:inline-block;background:#e5e7eb;font-size:.75rem;font-weight:600;padding:.25rem .5rem;border-radius:9999px;width:fit-content}
.price{font-weight:700;font-size:1.125rem}
.pager{display:flex;justify-content:center;gap:.5rem;margin:3rem 0}
.pager a{padding:.5rem .75rem;border:1px solid #d1d5db;border-radius:.5rem}
.pager a.current{background:#facc15;border-color:#facc15;font-weight:600}
.site-footer{background:#111827;color:#d1d5db;padding:2rem 0;margin-top:4rem}
"#;

/// Wrap `body` in the full document with header and footer.
pub fn render_shell(title: &str, categories: &[Category], search: Option<&str>, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 4096);
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{} | Storefront</title><style>{}</style></head><body>",
        escape(title),
        STYLES
    );
    html.push_str(&render_header(categories, search));
    html.push_str("<main>");
    html.push_str(body);
    html.push_str("</main>");
    html.push_str(&render_footer(categories));
    html.push_str("</body></html>");
    html
}

fn render_header(categories: &[Category], search: Option<&str>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<header class=\"site-header\"><div class=\"container\"><div class=\"bar\">\
         <a class=\"logo\" href=\"/\">Storefront</a>\
         <form action=\"/products\" method=\"get\" role=\"search\">\
         <input type=\"search\" name=\"search\" placeholder=\"Search products...\" value=\"{}\">\
         <button type=\"submit\">Search</button></form></div><nav><ul>",
        escape(search.unwrap_or(""))
    );

    for (label, href) in NAV_LINKS {
        let _ = write!(html, "<li><a href=\"{}\">{}</a>", href, label);
        if href == "/categories" && !categories.is_empty() {
            html.push_str("<div class=\"dropdown\">");
            for category in categories {
                let _ = write!(
                    html,
                    "<a href=\"/products{}\">{}</a>",
                    escape(&query_string(&[("category", Some(category.name.as_str()))])),
                    escape(&category.name)
                );
            }
            html.push_str("</div>");
        }
        html.push_str("</li>");
    }
    html.push_str("</ul></nav></div></header>");
    html
}

fn render_footer(categories: &[Category]) -> String {
    let mut html = String::from("<footer class=\"site-footer\"><div class=\"container\">");
    if !categories.is_empty() {
        html.push_str("<h4>Shop by category</h4><ul>");
        for category in categories.iter().take(8) {
            let _ = write!(
                html,
                "<li><a href=\"/products{}\">{}</a></li>",
                escape(&query_string(&[("category", Some(category.name.as_str()))])),
                escape(&category.name)
            );
        }
        html.push_str("</ul>");
    }
    html.push_str("<p>&copy; Storefront. All prices in EUR.</p></div></footer>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> Category {
        Category {
            id: "1".into(),
            name: name.into(),
            slug: name.to_lowercase(),
            description: None,
        }
    }

    #[test]
    fn shell_lists_categories_in_navigation() {
        let html = render_shell("Home", &[category("Cutting & Prep")], None, "<p>hi</p>");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Home | Storefront</title>"));
        assert!(html.contains("href=\"/products?category=Cutting%20%26%20Prep\""));
        assert!(html.contains(">Cutting &amp; Prep</a>"));
        assert!(html.contains("<main><p>hi</p></main>"));
    }

    #[test]
    fn search_value_is_escaped() {
        let html = render_shell("Search", &[], Some("\"><script>"), "");
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
    }
}
