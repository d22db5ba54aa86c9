use std::fmt::Write;

use chrono::Local;

use crate::normalize::{Node, Site};

pub const DEFAULT_TITLE: &str = "书签导航";

const FONT_AWESOME_CDN: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";
const FONT_CDN: &str =
    "https://fonts.googleapis.com/css2?family=Noto+Sans+SC:wght@300;400;500;700&display=swap";

// Light theme. Everything inlined so the page works offline apart from the
// two CDN stylesheets above.
const THEME_CSS: &str = r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
    font-family: 'Noto Sans SC', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
}

:root {
    --primary-color: #4361ee;
    --secondary-color: #3a0ca3;
    --light-color: #f8f9fa;
    --dark-color: #212529;
    --gray-color: #6c757d;
    --border-color: #e9ecef;
    --card-bg: white;
    --hover-bg: #f8f9fa;
    --transition: all 0.2s ease;
}

body {
    background-color: #f8f9fa;
    color: var(--dark-color);
    line-height: 1.6;
}

.container {
    max-width: 1200px;
    margin: 0 auto;
    padding: 0 20px;
}

header {
    background: linear-gradient(135deg, var(--primary-color), var(--secondary-color));
    color: white;
    padding: 30px 0;
    text-align: center;
    margin-bottom: 40px;
}

.logo {
    display: flex;
    align-items: center;
    justify-content: center;
    margin-bottom: 15px;
}

.logo i {
    font-size: 2.5rem;
    margin-right: 15px;
}

.logo h1 {
    font-size: 2.2rem;
    font-weight: 700;
}

.tagline {
    font-size: 1.1rem;
    opacity: 0.9;
    max-width: 600px;
    margin: 0 auto;
}

.search-container {
    max-width: 700px;
    margin: 0 auto 40px;
}

.search-box {
    display: flex;
    background: white;
    border-radius: 50px;
    overflow: hidden;
    border: 1px solid var(--border-color);
}

.search-box input {
    flex: 1;
    border: none;
    padding: 18px 25px;
    font-size: 1rem;
    outline: none;
}

.search-box button {
    background-color: var(--primary-color);
    color: white;
    border: none;
    padding: 0 30px;
    cursor: pointer;
    font-size: 1.1rem;
    transition: var(--transition);
}

.search-box button:hover {
    background-color: var(--secondary-color);
}

.category {
    background: var(--card-bg);
    border-radius: 16px;
    padding: 20px;
    margin-bottom: 25px;
}

.category h2 {
    display: flex;
    align-items: center;
    font-size: 1.4rem;
    margin-bottom: 20px;
    color: var(--dark-color);
    padding-bottom: 10px;
    border-bottom: 2px solid var(--border-color);
}

.category h2 i {
    margin-right: 10px;
    color: var(--primary-color);
}

.sites-grid {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(180px, 1fr));
    gap: 15px;
}

.site-item {
    display: flex;
    align-items: center;
    padding: 15px;
    background: var(--card-bg);
    border-radius: 12px;
    transition: var(--transition);
    text-decoration: none;
    color: var(--dark-color);
    border: 1px solid var(--border-color);
}

.site-item:hover {
    transform: translateY(-2px);
    background: var(--hover-bg);
}

.site-icon {
    width: 40px;
    height: 40px;
    display: flex;
    align-items: center;
    justify-content: center;
    background: white;
    border-radius: 8px;
    margin-right: 15px;
    font-size: 1.2rem;
    color: var(--primary-color);
    background-size: cover;
    background-position: center;
    background-repeat: no-repeat;
    overflow: hidden;
    border: 1px solid var(--border-color);
}
.site-icon > i {
    position: relative;
    z-index: 1;
}

.site-info h3 {
    font-size: 1rem;
    margin-bottom: 3px;
}

.site-info p {
    font-size: 0.85rem;
    color: var(--gray-color);
}

footer {
    background: var(--dark-color);
    color: white;
    padding: 30px 0;
    text-align: center;
    margin-top: 50px;
}

.footer-content {
    display: flex;
    flex-direction: column;
    align-items: center;
}

.copyright {
    color: #6c757d;
    font-size: 0.9rem;
    margin-top: 10px;
}

@media (max-width: 768px) {
    .sites-grid {
        grid-template-columns: repeat(auto-fill, minmax(150px, 1fr));
    }
}
"#;

// Client-side filtering: hide non-matching site items, then hide any
// category left with zero visible items.
const SEARCH_SCRIPT: &str = r#"
<script>
document.addEventListener('DOMContentLoaded', function() {
    const searchInput = document.getElementById('site-search');
    const siteItems = document.querySelectorAll('.site-item');

    searchInput.addEventListener('input', function(e) {
        const query = e.target.value.trim().toLowerCase();

        siteItems.forEach(item => {
            const name = item.querySelector('.site-info h3').textContent.toLowerCase();
            const url = item.querySelector('.site-info p').textContent.toLowerCase();

            if (name.includes(query) || url.includes(query)) {
                item.style.display = 'flex';
            } else {
                item.style.display = 'none';
            }
        });

        document.querySelectorAll('.category').forEach(category => {
            const visibleItems = Array.from(category.querySelectorAll('.site-item'))
                .filter(item => item.style.display !== 'none');
            category.style.display = visibleItems.length > 0 ? 'block' : 'none';
        });
    });

    const categories = document.querySelectorAll('.category');
    categories.forEach(category => {
        category.addEventListener('mouseenter', function() {
            this.style.transform = 'translateY(-5px)';
            this.style.transition = 'transform 0.3s ease';
        });

        category.addEventListener('mouseleave', function() {
            this.style.transform = 'translateY(0)';
        });
    });
});
</script>
"#;

pub fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Quotes a URL as a CSS `url()` string literal.
pub fn css_url(url: &str) -> String {
    let escaped = url.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

fn push_site(out: &mut String, site: &Site) {
    let target = esc(&site.target);
    let _ = writeln!(
        out,
        "<a class=\"site-item\" href=\"{target}\" target=\"_blank\" rel=\"noopener noreferrer\" title=\"{target}\">"
    );
    if !site.bg_image.is_empty() {
        let _ = writeln!(
            out,
            "<div class=\"site-icon\" style=\"background-image: url({})\"></div>",
            esc(&css_url(&site.bg_image))
        );
    } else if site.host.is_some() {
        out.push_str("<div class=\"site-icon\"><i class=\"fas fa-globe\"></i></div>\n");
    } else {
        out.push_str("<div class=\"site-icon\"><i class=\"fas fa-link\"></i></div>\n");
    }
    let _ = writeln!(
        out,
        "<div class=\"site-info\">\n<h3>{}</h3>\n<p>{}</p>\n</div>\n</a>",
        esc(&site.name),
        esc(site.display_url())
    );
}

fn push_section(out: &mut String, icon: &str, heading: &str, sites: &[&Site]) {
    let _ = writeln!(out, "<div class=\"category\">");
    let _ = writeln!(out, "<h2><i class=\"fas {icon}\"></i> {heading}</h2>");
    let _ = writeln!(out, "<div class=\"sites-grid\">");
    for site in sites {
        push_site(out, site);
    }
    out.push_str("</div>\n</div>\n");
}

/// Builds the whole page. Deterministic for a given input except for the
/// generation timestamp and copyright year in the footer.
pub fn render_html(columns: &[Vec<Node>], title: &str) -> String {
    let now = Local::now();
    let title = esc(title);
    let mut out = String::new();

    let _ = writeln!(out, "<!doctype html>\n<html lang=\"zh-CN\">\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">");
    let _ = writeln!(out, "<title>{title}</title>");
    let _ = writeln!(out, "<link rel=\"stylesheet\" href=\"{FONT_AWESOME_CDN}\">");
    let _ = writeln!(out, "<link href=\"{FONT_CDN}\" rel=\"stylesheet\">");
    let _ = writeln!(out, "<style>{THEME_CSS}</style>");
    out.push_str("</head>\n<body>\n");

    let _ = writeln!(out, "<header>");
    let _ = writeln!(out, "    <div class=\"container\">");
    let _ = writeln!(out, "        <div class=\"logo\">");
    let _ = writeln!(out, "            <i class=\"fas fa-bookmark\"></i>");
    let _ = writeln!(out, "            <h1>{title}</h1>");
    let _ = writeln!(out, "        </div>");
    let _ = writeln!(out, "        <p class=\"tagline\">无敌暴龙神的书签，简洁高效的上网入口</p>");
    let _ = writeln!(out, "    </div>");
    let _ = writeln!(out, "</header>");

    let _ = writeln!(out, "<main class=\"container\">");
    let _ = writeln!(out, "    <div class=\"search-container\">");
    let _ = writeln!(out, "        <div class=\"search-box\">");
    let _ = writeln!(out, "            <input type=\"text\" id=\"site-search\" placeholder=\"输入关键词搜索书签...\">");
    let _ = writeln!(out, "            <button><i class=\"fas fa-search\"></i></button>");
    let _ = writeln!(out, "        </div>");
    let _ = writeln!(out, "    </div>");

    // One section per folder, column-major order. Empty folders still get
    // their section.
    for node in columns.iter().flatten() {
        if let Node::Folder { name, children } = node {
            let refs: Vec<&Site> = children.iter().collect();
            push_section(&mut out, "fa-folder", &esc(name), &refs);
        }
    }

    // All standalone sites share one trailing section, skipped when empty.
    let standalone: Vec<&Site> = columns
        .iter()
        .flatten()
        .filter_map(|n| match n {
            Node::Site(s) => Some(s),
            Node::Folder { .. } => None,
        })
        .collect();
    if !standalone.is_empty() {
        push_section(&mut out, "fa-globe", "未分类书签", &standalone);
    }

    out.push_str("</main>\n");

    let _ = writeln!(out, "<footer>");
    let _ = writeln!(out, "    <div class=\"container\">");
    let _ = writeln!(out, "        <div class=\"footer-content\">");
    let _ = writeln!(out, "            <div class=\"logo\">");
    let _ = writeln!(out, "                <i class=\"fas fa-bookmark\"></i>");
    let _ = writeln!(out, "                <h2>{title}</h2>");
    let _ = writeln!(out, "            </div>");
    let _ = writeln!(
        out,
        "            <p class=\"copyright\">© {} {}. 本页面由脚本自动生成 · {}</p>",
        now.format("%Y"),
        title,
        now.format("%Y-%m-%d %H:%M:%S")
    );
    let _ = writeln!(out, "        </div>");
    let _ = writeln!(out, "    </div>");
    let _ = writeln!(out, "</footer>");

    out.push_str(SEARCH_SCRIPT);
    out.push_str("</body>\n</html>\n");
    out
}
