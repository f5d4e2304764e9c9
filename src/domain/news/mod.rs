//! News domain module

mod entity;
mod repository;

pub use entity::{
    NewNewsItem, NewsCategory, NewsId, NewsItem, NewsStatus, NewsValidationError,
};
pub use repository::{NewsFilter, NewsRepository};
