//! Campus specific formatting for a course overview dashboard block.
//!
//! Term configuration checks, teacher and term display names, sort helpers, and the
//! small HTML badges shown next to each course. All host services arrive as
//! explicit arguments, see [`host`].

pub mod categories;
pub mod config;
pub mod db;
pub mod error;
pub mod host;
pub mod labels;
pub mod metalink;
pub mod models;
pub mod notifications;
pub mod overview;
pub mod teachers;
pub mod terms;

pub use categories::{compare_categories, sort_categories};
pub use labels::term_display_name;
pub use metalink::render_metalink;
pub use notifications::{count_new_resources, render_notifications};
pub use overview::{batch_courses, get_overviews};
pub use teachers::{compare_teachers, teacher_name_string};
pub use terms::{check_term_config, is_valid};
