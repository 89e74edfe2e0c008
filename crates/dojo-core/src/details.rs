// ── Course detail rows ──
//
// The drawer's labelled facts about a course. Rows without a value are
// left out rather than shown blank.

use crate::model::{Course, language_label};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
}

fn availability(flag: bool) -> String {
    if flag { "Available" } else { "Not available" }.to_owned()
}

fn format_hours(hours: f64) -> String {
    let unit = if (hours - 1.0).abs() < f64::EPSILON {
        "hour"
    } else {
        "hours"
    };
    if hours.fract().abs() < f64::EPSILON {
        format!("{hours:.0} {unit}")
    } else {
        format!("{hours:.1} {unit}")
    }
}

pub fn course_details(course: &Course) -> Vec<DetailRow> {
    let rows = [
        ("Time investment", course.hours_required.map(format_hours)),
        ("Certificate", Some(availability(course.has_certificate))),
        ("Difficulty level", course.difficulty_level.clone()),
        (
            "Primary language",
            course
                .primary_language
                .as_deref()
                .map(|code| language_label(code).into_owned()),
        ),
        ("Subtitles", Some(availability(course.subtitles_available))),
        ("Prerequisites", course.prerequisites.clone()),
    ];
    rows.into_iter()
        .filter_map(|(label, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|value| DetailRow { label, value })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_omitted() {
        let rows = course_details(&Course::new(1, "x"));
        let labels: Vec<&str> = rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["Certificate", "Subtitles"]);
    }

    #[test]
    fn full_course_has_every_row() {
        let mut c = Course::new(1, "x");
        c.hours_required = Some(1.0);
        c.has_certificate = true;
        c.difficulty_level = Some("Beginner".into());
        c.primary_language = Some("en".into());
        c.prerequisites = Some("Linear algebra".into());

        let rows = course_details(&c);
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].value, "1 hour");
        assert_eq!(rows[1].value, "Available");
        assert_eq!(rows[4].value, "Not available");
        assert_eq!(rows[3].value, "English");
    }

    #[test]
    fn fractional_hours_keep_one_decimal() {
        assert_eq!(format_hours(2.5), "2.5 hours");
        assert_eq!(format_hours(12.0), "12 hours");
    }
}
