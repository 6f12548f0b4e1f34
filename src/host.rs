//! Services the surrounding LMS provides to the formatting core.
//!
//! Every function in this crate takes its collaborators explicitly. The impls here are
//! the ones the CLI uses; a real host plugs in its own.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::models::{CourseRef, TeacherRecord, TRACKED_RESOURCE_TYPES};
use crate::overview::Overviews;

/// Locale aware full name of a user.
pub trait NameDisplay {
    fn full_name(&self, teacher: &TeacherRecord) -> String;
}

/// Turns a stored display string (category names and the like) into plain text.
pub trait StringFormatter {
    fn format_string(&self, raw: &str) -> String;
}

/// Internationalised string lookup, keyed by identifier and component.
pub trait StringLookup {
    fn get_string(&self, identifier: &str, component: &str) -> String;
}

/// A module that contributes overview snippets for a batch of courses.
pub trait OverviewProvider {
    /// Module name, matched against the skip list.
    fn name(&self) -> &str;

    fn print_overview(&self, courses: &[CourseRef], overviews: &mut Overviews);
}

/// Full name built from the host's `fullnamedisplay` pattern, e.g. `"lastname, firstname"`.
#[derive(Debug, Clone)]
pub struct FullNameTemplate {
    pattern: String,
}

impl FullNameTemplate {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Default for FullNameTemplate {
    fn default() -> Self {
        Self::new("firstname lastname")
    }
}

impl NameDisplay for FullNameTemplate {
    fn full_name(&self, teacher: &TeacherRecord) -> String {
        // Placeholder first so a first name containing "lastname" is not substituted twice.
        self.pattern
            .replace("firstname", "\u{0}")
            .replace("lastname", &teacher.lastname)
            .replace('\u{0}', &teacher.firstname)
            .trim()
            .to_string()
    }
}

/// Strips markup tags and surrounding whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStringFormatter;

impl StringFormatter for PlainStringFormatter {
    fn format_string(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut in_tag = false;

        for c in raw.chars() {
            match c {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if !in_tag => out.push(c),
                _ => {}
            }
        }

        out.trim().to_string()
    }
}

/// Language strings keyed by `component` then `identifier`.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct StringPack {
    components: HashMap<String, HashMap<String, String>>,
}

impl StringPack {
    /// English strings for the tracked resource types and the meta-link caption.
    pub fn english() -> Self {
        let names = [
            ("book", "Book", "Books"),
            ("folder", "Folder", "Folders"),
            ("page", "Page", "Pages"),
            ("resource", "File", "Files"),
            ("url", "URL", "URLs"),
        ];
        debug_assert_eq!(names.len(), TRACKED_RESOURCE_TYPES.len());

        let mut components = HashMap::new();
        for (module, singular, plural) in names {
            let strings = HashMap::from([
                ("modulename".to_string(), singular.to_string()),
                ("modulenameplural".to_string(), plural.to_string()),
            ]);
            components.insert(format!("mod_{module}"), strings);
        }
        components.insert(
            "block_course_overview_campus".to_string(),
            HashMap::from([("metalink".to_string(), "Meta link:".to_string())]),
        );

        Self { components }
    }

    /// Loads a JSON string pack; entries override the English defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read string pack {}", path.display()))?;
        let pack: StringPack = serde_json::from_str(&content)
            .with_context(|| format!("invalid string pack {}", path.display()))?;

        let mut merged = Self::english();
        for (component, strings) in pack.components {
            merged
                .components
                .entry(component)
                .or_default()
                .extend(strings);
        }
        Ok(merged)
    }
}

impl StringLookup for StringPack {
    fn get_string(&self, identifier: &str, component: &str) -> String {
        match self
            .components
            .get(component)
            .and_then(|strings| strings.get(identifier))
        {
            Some(value) => value.clone(),
            None => {
                log::warn!("missing string [{identifier},{component}]");
                format!("[[{identifier}]]")
            }
        }
    }
}
