use std::fmt::Write;

use crate::host::StringLookup;
use crate::models::ResourceEvent;

/// New resources per type, in tracked-type order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCounts {
    counts: Vec<(String, usize)>,
}

impl ResourceCounts {
    pub fn get(&self, type_tag: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(tag, _)| tag == type_tag)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(tag, count)| (tag.as_str(), *count))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Counts resources of the tracked types added after `cutoff`.
///
/// Hidden modules and modules without a view page (labels and the like) are not
/// counted. `cutoff` is the user's last course access, 0 if they never visited.
pub fn count_new_resources(
    events: &[ResourceEvent],
    cutoff: i64,
    tracked: &[&str],
) -> ResourceCounts {
    let mut counts: Vec<(String, usize)> = Vec::with_capacity(tracked.len());
    for tag in tracked {
        if !counts.iter().any(|(seen, _)| seen.as_str() == *tag) {
            counts.push((tag.to_string(), 0));
        }
    }

    for event in events {
        if !event.visible || !event.has_view {
            continue;
        }

        if let Some((_, count)) = counts.iter_mut().find(|(tag, _)| *tag == event.type_tag) {
            if event.added > cutoff {
                *count += 1;
            }
        }
    }

    ResourceCounts { counts }
}

/// Badge snippet announcing new resources; empty when there is nothing new.
pub fn render_notifications(counts: &ResourceCounts, strings: &dyn StringLookup) -> String {
    let mut html = String::new();
    if counts.total() == 0 {
        return html;
    }

    html.push_str(r#"<div class="coc-notification hidden-phone">"#);
    for (tag, count) in counts.iter().filter(|(_, count)| *count > 0) {
        let identifier = if count == 1 {
            "modulename"
        } else {
            "modulenameplural"
        };
        let label = strings.get_string(identifier, &format!("mod_{tag}"));
        let _ = write!(
            html,
            r#"<span class="badge badge-important">{count} {label}</span> "#
        );
    }
    html.push_str("</div>");

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StringPack;
    use crate::models::TRACKED_RESOURCE_TYPES;

    fn event(type_tag: &str, added: i64) -> ResourceEvent {
        ResourceEvent {
            type_tag: type_tag.to_string(),
            added,
            visible: true,
            has_view: true,
        }
    }

    #[test]
    fn counts_only_resources_after_cutoff() {
        let events = vec![event("page", 100), event("page", 5)];
        let counts = count_new_resources(&events, 50, TRACKED_RESOURCE_TYPES);

        let all: Vec<_> = counts.iter().collect();
        assert_eq!(
            all,
            vec![("book", 0), ("folder", 0), ("page", 1), ("resource", 0), ("url", 0)]
        );
    }

    #[test]
    fn cutoff_is_exclusive() {
        let counts = count_new_resources(&[event("url", 50)], 50, TRACKED_RESOURCE_TYPES);
        assert_eq!(counts.get("url"), Some(0));
    }

    #[test]
    fn hidden_and_viewless_modules_are_skipped() {
        let mut hidden = event("book", 10);
        hidden.visible = false;
        let mut label = event("folder", 10);
        label.has_view = false;

        let events = vec![hidden, label, event("book", 10)];
        let counts = count_new_resources(&events, 0, TRACKED_RESOURCE_TYPES);
        assert_eq!(counts.get("book"), Some(1));
        assert_eq!(counts.get("folder"), Some(0));
    }

    #[test]
    fn untracked_types_are_ignored() {
        let events = vec![event("quiz", 10), event("forum", 10)];
        let counts = count_new_resources(&events, 0, TRACKED_RESOURCE_TYPES);
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.get("quiz"), None);
    }

    #[test]
    fn output_follows_tracked_order_not_event_order() {
        let events = vec![event("url", 10), event("book", 10)];
        let counts = count_new_resources(&events, 0, &["url", "book"]);
        let order: Vec<_> = counts.iter().map(|(tag, _)| tag).collect();
        assert_eq!(order, vec!["url", "book"]);
    }

    #[test]
    fn nothing_new_renders_nothing() {
        let counts = count_new_resources(&[event("page", 1)], 10, TRACKED_RESOURCE_TYPES);
        assert_eq!(render_notifications(&counts, &StringPack::english()), "");
    }

    #[test]
    fn badges_use_singular_and_plural_labels() {
        let events = vec![
            event("page", 100),
            event("resource", 100),
            event("resource", 200),
        ];
        let counts = count_new_resources(&events, 0, TRACKED_RESOURCE_TYPES);
        let html = render_notifications(&counts, &StringPack::english());

        assert_eq!(
            html,
            concat!(
                r#"<div class="coc-notification hidden-phone">"#,
                r#"<span class="badge badge-important">1 Page</span> "#,
                r#"<span class="badge badge-important">2 Files</span> "#,
                "</div>"
            )
        );
    }
}
