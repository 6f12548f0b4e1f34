use std::cmp::Ordering;

use crate::host::StringFormatter;
use crate::models::CategoryRecord;
use crate::teachers::compare_ignore_case;

/// Orders categories by sortorder, then by formatted name ignoring case.
///
/// Category sortorders are normally unique; the name tie-break only keeps the
/// order total when the host hands over duplicates.
pub fn compare_categories(
    a: &CategoryRecord,
    b: &CategoryRecord,
    formatter: &dyn StringFormatter,
) -> Ordering {
    a.sortorder.cmp(&b.sortorder).then_with(|| {
        compare_ignore_case(
            &formatter.format_string(&a.name),
            &formatter.format_string(&b.name),
        )
    })
}

pub fn sort_categories(categories: &mut [CategoryRecord], formatter: &dyn StringFormatter) {
    categories.sort_by(|a, b| compare_categories(a, b, formatter));
}
