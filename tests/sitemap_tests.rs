
use portfolio_content::{
    entities::singletons::NowContent,
    use_cases::sitemap::{build_sitemap, render_sitemap_xml, ChangeFrequency},
};
use test_utils::*;

#[test]
fn sitemap_lists_static_pages_projects_and_posts() {
    let today = date("2024-06-01");
    let mut updated = post("updated", "2024-01-01", &[]);
    updated.updated_date = Some(date("2024-02-01"));
    let now = NowContent {
        id: None,
        title: "Now".into(),
        last_updated: date("2024-05-15"),
        body: String::new(),
    };

    let entries = build_sitemap(
        "https://example.com/",
        today,
        &[project("alpha", 1, false)],
        Some(&now),
        &[updated, post("plain", "2023-12-01", &[])],
    );

    assert_eq!(entries.len(), 7 + 1 + 2);
    assert_eq!(entries[0].url, "https://example.com");
    assert_eq!(entries[0].priority, 1.0);

    let now_entry = entries.iter().find(|e| e.url.ends_with("/now")).unwrap();
    assert_eq!(now_entry.last_modified, date("2024-05-15"));
    assert_eq!(now_entry.change_frequency, ChangeFrequency::Weekly);

    let updated_entry = entries.iter().find(|e| e.url.ends_with("/blog/updated")).unwrap();
    let plain_entry = entries.iter().find(|e| e.url.ends_with("/blog/plain")).unwrap();
    assert_eq!(updated_entry.last_modified, date("2024-02-01"));
    assert_eq!(plain_entry.last_modified, date("2023-12-01"));

    let project_entry = entries.iter().find(|e| e.url.ends_with("/projects/alpha")).unwrap();
    assert_eq!(project_entry.last_modified, today);
}

#[test]
fn now_page_falls_back_to_today_without_content() {
    let today = date("2024-06-01");

    let entries = build_sitemap("https://example.com", today, &[], None, &[]);

    let now_entry = entries.iter().find(|e| e.url.ends_with("/now")).unwrap();
    assert_eq!(now_entry.last_modified, today);
}

#[test]
fn xml_output_is_well_formed_and_escaped() {
    let entries = build_sitemap("https://example.com/?a=1&b=2", date("2024-06-01"), &[], None, &[]);

    let xml = render_sitemap_xml(&entries);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("&amp;b=2"));
    assert!(xml.contains("<changefreq>yearly</changefreq>"));
    assert!(xml.contains("<priority>0.5</priority>"));
    assert!(xml.trim_end().ends_with("</urlset>"));
}
