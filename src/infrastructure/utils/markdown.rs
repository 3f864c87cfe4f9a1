use std::{io, path::Path};

use ammonia::{Builder, UrlRelative};
use derive_more::Display;
use pulldown_cmark::{html, Event, Options, Parser, TagEnd};
use tokio::fs;

pub const CONTENT_EXTENSIONS: [&str; 3] = ["md", "mdx", "markdown"];

const FRONT_MATTER_FENCE: &str = "---";

/// Turns a stored content body into displayable HTML.
pub trait BodyRenderer: Send + Sync {
    fn render(&self, body: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl BodyRenderer for MarkdownRenderer {
    fn render(&self, body: &str) -> String {
        safe_markdown_to_html(body)
    }
}

/// Converts Markdown content to sanitized HTML to prevent XSS attacks.
pub fn safe_markdown_to_html(markdown: &str) -> String {
    let options = Options::all();
    let parser = Parser::new_ext(markdown, options);

    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_html(&raw_html)
}

/// Strips unsafe HTML; relative links stay allowed for in-site navigation.
pub fn sanitize_html(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::PassThrough)
        .clean(content)
        .to_string()
}

/// Flattens Markdown to whitespace-separated plain text.
pub fn markdown_to_plain_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());
    for event in Parser::new_ext(markdown, Options::all()) {
        match event {
            Event::Text(t) | Event::Code(t) => {
                text.push_str(&t);
                text.push(' ');
            }
            Event::SoftBreak | Event::HardBreak | Event::End(TagEnd::Paragraph) => text.push(' '),
            _ => {}
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits a content file into its YAML front matter and body.
pub fn split_front_matter(source: &str) -> Result<(&str, &str), MarkdownError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let rest = source
        .strip_prefix(FRONT_MATTER_FENCE)
        .and_then(|rest| rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')))
        .ok_or(MarkdownError::MissingFrontMatter)?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            let front_matter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok((front_matter, body.trim_start_matches(['\r', '\n'])));
        }
        offset += line.len();
    }

    Err(MarkdownError::UnterminatedFrontMatter)
}

pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| CONTENT_EXTENSIONS.contains(&e.as_str()))
}

/// Reads a content file, rejecting unknown extensions and empty files.
pub async fn read_content_file(path: &Path) -> Result<String, MarkdownError> {
    if !is_content_file(path) {
        return Err(MarkdownError::InvalidExtension);
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(MarkdownError::IoError)?;
    if content.trim().is_empty() {
        return Err(MarkdownError::EmptyFile);
    }

    Ok(content)
}

/// All errors related to content file handling.
#[derive(Debug, Display)]
pub enum MarkdownError {
    #[display("Invalid file extension. Only .md, .mdx and .markdown files are allowed.")]
    InvalidExtension,

    #[display("File is empty.")]
    EmptyFile,

    #[display("Failed to read file: {_0}")]
    IoError(io::Error),

    #[display("File does not start with a front matter block.")]
    MissingFrontMatter,

    #[display("Front matter block is not closed.")]
    UnterminatedFrontMatter,
}

impl std::error::Error for MarkdownError {}
