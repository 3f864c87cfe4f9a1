use chrono::NaiveDate;
use serde::Serialize;

use crate::entities::{blog_post::BlogPost, project::Project, singletons::NowContent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: NaiveDate,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

const STATIC_PAGES: [(&str, ChangeFrequency, f32); 7] = [
    ("", ChangeFrequency::Monthly, 1.0),
    ("/about", ChangeFrequency::Monthly, 0.8),
    ("/now", ChangeFrequency::Weekly, 0.7),
    ("/experience", ChangeFrequency::Monthly, 0.8),
    ("/projects", ChangeFrequency::Weekly, 0.8),
    ("/blog", ChangeFrequency::Weekly, 0.7),
    ("/contact", ChangeFrequency::Yearly, 0.5),
];

/// Site pages plus one entry per project and blog post.
pub fn build_sitemap(
    base_url: &str,
    today: NaiveDate,
    projects: &[Project],
    now: Option<&NowContent>,
    posts: &[BlogPost],
) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');

    let static_pages = STATIC_PAGES.iter().map(|(path, change_frequency, priority)| {
        let last_modified = match (*path, now) {
            ("/now", Some(now)) => now.last_updated,
            _ => today,
        };
        SitemapEntry {
            url: format!("{base_url}{path}"),
            last_modified,
            change_frequency: *change_frequency,
            priority: *priority,
        }
    });

    let project_pages = projects.iter().map(|project| SitemapEntry {
        url: format!("{base_url}/projects/{}", urlencoding::encode(&project.slug)),
        last_modified: today,
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.6,
    });

    let blog_pages = posts.iter().map(|post| SitemapEntry {
        url: format!("{base_url}/blog/{}", urlencoding::encode(&post.slug)),
        last_modified: post.last_modified(),
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.7,
    });

    static_pages.chain(project_pages).chain(blog_pages).collect()
}

/// Renders entries as a sitemaps.org `urlset` document.
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape_xml(&entry.url),
            entry.last_modified.format("%Y-%m-%d"),
            entry.change_frequency.as_str(),
            entry.priority,
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
