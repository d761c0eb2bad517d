//! 유스케이스 모음.

pub mod inspect_platforms;
pub mod publish_article;
pub mod write_article;
