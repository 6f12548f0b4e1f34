use std::cmp::Ordering;
use std::io::Read;

use crate::host::NameDisplay;
use crate::models::{TeacherNameStyle, TeacherRecord};

/// ASCII case-insensitive comparison, byte by byte.
pub(crate) fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(b.bytes().map(|byte| byte.to_ascii_lowercase()))
}

/// Orders teachers by role relevance, then by last name ignoring case.
pub fn compare_teachers(a: &TeacherRecord, b: &TeacherRecord) -> Ordering {
    a.sortorder
        .cmp(&b.sortorder)
        .then_with(|| compare_ignore_case(&a.lastname, &b.lastname))
}

fn teacher_name(
    teacher: &TeacherRecord,
    style: TeacherNameStyle,
    names: &dyn NameDisplay,
) -> String {
    match style {
        TeacherNameStyle::Full => format!("{} {}", teacher.firstname, teacher.lastname),
        TeacherNameStyle::Last => teacher.lastname.clone(),
        TeacherNameStyle::First => teacher.firstname.clone(),
        TeacherNameStyle::Display => names.full_name(teacher),
        TeacherNameStyle::Unrecognized(_) => teacher.lastname.clone(),
    }
}

/// Comma separated teacher names, most relevant role first.
///
/// The sort is stable and the comparator total, so unlike the host's callback
/// sort this cannot fail and there is no empty-string fallback to take.
pub fn teacher_name_string(
    teachers: &[TeacherRecord],
    style: TeacherNameStyle,
    names: &dyn NameDisplay,
) -> String {
    if teachers.is_empty() {
        return String::new();
    }

    if let TeacherNameStyle::Unrecognized(code) = style {
        log::debug!("unknown teacher name style {code}, using last names");
    }

    let mut sorted: Vec<&TeacherRecord> = teachers.iter().collect();
    sorted.sort_by(|a, b| compare_teachers(a, b));

    sorted
        .into_iter()
        .map(|teacher| teacher_name(teacher, style, names))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads `sortorder,firstname,lastname` rows with a header line.
pub fn read_teachers_csv<R: Read>(reader: R) -> anyhow::Result<Vec<TeacherRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut teachers = Vec::new();
    for result in reader.deserialize::<TeacherRecord>() {
        teachers.push(result?);
    }
    Ok(teachers)
}
