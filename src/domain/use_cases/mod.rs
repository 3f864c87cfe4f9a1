pub mod content;
pub mod related;
pub mod seed;
pub mod sitemap;
