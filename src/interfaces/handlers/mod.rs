pub mod blog_posts;
pub mod home;
pub mod pages;
pub mod projects;
pub mod search;
pub mod system;
