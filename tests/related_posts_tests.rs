
use portfolio_content::use_cases::related::{rank_related_posts, DEFAULT_RELATED_LIMIT};
use test_utils::*;

#[test]
fn unknown_slug_yields_nothing() {
    let posts = vec![post("a", "2024-01-01", &["rust"])];

    assert!(rank_related_posts(&posts, "missing", 3).is_empty());
}

#[test]
fn reference_post_is_never_included() {
    let posts = vec![
        post("a", "2024-01-01", &["rust"]),
        post("b", "2024-02-01", &["rust"]),
        post("c", "2024-03-01", &[]),
    ];

    let related = rank_related_posts(&posts, "a", 10);

    assert!(!slugs(&related).contains(&"a"));
    assert_eq!(related.len(), 2);
}

#[test]
fn shared_tags_outrank_recency() {
    let posts = vec![
        post("ref", "2024-01-01", &["rust", "web", "db"]),
        post("one-tag", "2024-06-01", &["rust"]),
        post("two-tags", "2023-01-01", &["rust", "db"]),
        post("none", "2024-07-01", &["cooking"]),
    ];

    let related = rank_related_posts(&posts, "ref", DEFAULT_RELATED_LIMIT);

    assert_eq!(slugs(&related), vec!["two-tags", "one-tag", "none"]);
}

#[test]
fn equal_scores_break_ties_newest_first() {
    let posts = vec![
        post("ref", "2024-01-01", &["rust"]),
        post("older", "2023-01-01", &["rust"]),
        post("newer", "2023-06-01", &["rust"]),
    ];

    let related = rank_related_posts(&posts, "ref", 2);

    assert_eq!(slugs(&related), vec!["newer", "older"]);
}

#[test]
fn untagged_reference_returns_most_recent_posts() {
    let posts = vec![
        post("ref", "2024-01-01", &[]),
        post("old", "2022-01-01", &["rust"]),
        post("mid", "2023-01-01", &[]),
        post("new", "2024-05-01", &["web"]),
    ];

    let related = rank_related_posts(&posts, "ref", 2);

    assert_eq!(slugs(&related), vec!["new", "mid"]);
}

#[test]
fn zero_scored_candidates_fill_remaining_slots_by_recency() {
    let posts = vec![
        post("ref", "2024-01-01", &["rust"]),
        post("match", "2020-01-01", &["rust"]),
        post("recent", "2024-04-01", &["go"]),
        post("older", "2021-01-01", &["go"]),
    ];

    let related = rank_related_posts(&posts, "ref", 3);

    assert_eq!(slugs(&related), vec!["match", "recent", "older"]);
}

#[test]
fn tag_matching_ignores_case() {
    let posts = vec![
        post("ref", "2024-01-01", &["Rust"]),
        post("lower", "2020-01-01", &["rust"]),
        post("recent", "2024-04-01", &["go"]),
    ];

    let related = rank_related_posts(&posts, "ref", 1);

    assert_eq!(slugs(&related), vec!["lower"]);
}

#[test]
fn result_never_exceeds_limit_or_duplicates() {
    let posts: Vec<_> = (1..=9)
        .map(|i| post(&format!("p{i}"), &format!("2024-0{i}-01"), &["rust"]))
        .collect();

    for limit in 0..12 {
        let related = rank_related_posts(&posts, "p1", limit);
        let mut unique = slugs(&related);
        unique.sort();
        unique.dedup();

        assert_eq!(related.len(), limit.min(8));
        assert_eq!(unique.len(), related.len());
    }
}
