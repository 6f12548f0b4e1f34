use std::collections::{BTreeMap, HashMap};

use crate::host::OverviewProvider;
use crate::models::CourseRef;

/// Overview snippets keyed by course id, then by contributing module.
pub type Overviews = BTreeMap<i64, BTreeMap<String, String>>;

/// Splits courses into contiguous batches of at most `max_batch` courses.
///
/// Without a positive limit, or when the list already fits, everything goes in one batch.
pub fn batch_courses(courses: &[CourseRef], max_batch: Option<usize>) -> Vec<&[CourseRef]> {
    match max_batch {
        Some(max) if max > 0 && courses.len() > max => courses.chunks(max).collect(),
        _ => vec![courses],
    }
}

/// Module names from a comma separated skip setting.
pub fn parse_skip_list(skip: &str) -> Vec<String> {
    skip.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collects overview snippets from every provider not named in `skip`.
///
/// Each provider sees every batch once, so the host's per-request module cache
/// never has to hold more than `max_batch` courses.
pub fn get_overviews(
    courses: &[CourseRef],
    skip: &str,
    providers: &[&dyn OverviewProvider],
    max_batch: Option<usize>,
) -> Overviews {
    let skipped = parse_skip_list(skip);
    let active: Vec<&dyn OverviewProvider> = providers
        .iter()
        .copied()
        .filter(|provider| !skipped.iter().any(|name| name == provider.name()))
        .collect();

    let mut overviews = Overviews::new();
    if active.is_empty() {
        return overviews;
    }

    let batches = batch_courses(courses, max_batch);
    log::debug!(
        "collecting overviews for {} courses in {} batches from {} modules",
        courses.len(),
        batches.len(),
        active.len()
    );

    for batch in batches {
        for provider in &active {
            provider.print_overview(batch, &mut overviews);
        }
    }

    overviews
}

/// Provider serving snippets rendered ahead of time, one per course.
///
/// Courses without a snippet, or with an empty one, get no entry.
#[derive(Debug, Clone)]
pub struct PrerenderedOverview {
    name: String,
    snippets: HashMap<i64, String>,
}

impl PrerenderedOverview {
    pub fn new(name: impl Into<String>, snippets: HashMap<i64, String>) -> Self {
        Self {
            name: name.into(),
            snippets,
        }
    }
}

impl OverviewProvider for PrerenderedOverview {
    fn name(&self) -> &str {
        &self.name
    }

    fn print_overview(&self, courses: &[CourseRef], overviews: &mut Overviews) {
        for course in courses {
            if let Some(html) = self.snippets.get(&course.id).filter(|html| !html.is_empty()) {
                overviews
                    .entry(course.id)
                    .or_default()
                    .insert(self.name.clone(), html.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingProvider {
        name: &'static str,
        batches: RefCell<Vec<Vec<i64>>>,
    }

    impl RecordingProvider {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                batches: RefCell::new(Vec::new()),
            }
        }
    }

    impl OverviewProvider for RecordingProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn print_overview(&self, courses: &[CourseRef], overviews: &mut Overviews) {
            self.batches
                .borrow_mut()
                .push(courses.iter().map(|c| c.id).collect());
            for course in courses {
                overviews
                    .entry(course.id)
                    .or_default()
                    .insert(self.name.to_string(), format!("{} due", course.shortname));
            }
        }
    }

    fn courses(count: i64) -> Vec<CourseRef> {
        (1..=count)
            .map(|id| CourseRef {
                id,
                shortname: format!("C{id}"),
            })
            .collect()
    }

    #[test]
    fn batches_preserve_order_and_limit() {
        let list = courses(5);
        let batches = batch_courses(&list, Some(2));
        let ids: Vec<Vec<i64>> = batches
            .iter()
            .map(|batch| batch.iter().map(|c| c.id).collect())
            .collect();
        assert_eq!(ids, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn no_limit_means_single_batch() {
        let list = courses(5);
        assert_eq!(batch_courses(&list, None).len(), 1);
        assert_eq!(batch_courses(&list, Some(0)).len(), 1);
        assert_eq!(batch_courses(&list, Some(5)).len(), 1);
    }

    #[test]
    fn skip_list_is_trimmed() {
        assert_eq!(parse_skip_list(" forum, ,assign "), vec!["forum", "assign"]);
        assert!(parse_skip_list("").is_empty());
    }

    #[test]
    fn every_provider_sees_every_batch() {
        let forum = RecordingProvider::new("forum");
        let assign = RecordingProvider::new("assign");
        let list = courses(3);

        let overviews = get_overviews(&list, "", &[&forum, &assign], Some(2));

        assert_eq!(*forum.batches.borrow(), vec![vec![1, 2], vec![3]]);
        assert_eq!(*assign.batches.borrow(), vec![vec![1, 2], vec![3]]);
        assert_eq!(overviews.len(), 3);
        assert_eq!(overviews[&3]["assign"], "C3 due");
        assert_eq!(overviews[&1].len(), 2);
    }

    #[test]
    fn skipped_providers_are_not_called() {
        let forum = RecordingProvider::new("forum");
        let assign = RecordingProvider::new("assign");
        let list = courses(2);

        let overviews = get_overviews(&list, "forum", &[&forum, &assign], None);

        assert!(forum.batches.borrow().is_empty());
        assert_eq!(assign.batches.borrow().len(), 1);
        assert!(overviews.values().all(|modules| !modules.contains_key("forum")));
    }

    #[test]
    fn prerendered_snippets_skip_empty_courses() {
        let snippets = HashMap::from([(1, "<b>new</b>".to_string()), (2, String::new())]);
        let provider = PrerenderedOverview::new("newresources", snippets);
        let list = courses(3);

        let overviews = get_overviews(&list, "", &[&provider], Some(2));

        assert_eq!(overviews.len(), 1);
        assert_eq!(overviews[&1]["newresources"], "<b>new</b>");
    }
}
