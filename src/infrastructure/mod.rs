pub mod content;
pub mod db;
pub mod utils;
