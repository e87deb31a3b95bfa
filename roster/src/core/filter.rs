//! Filter predicate engine
//!
//! Evaluates student records against a [`FilterSet`]. A record passes when
//! every non-empty filter field matches; the relative order of the input is
//! kept.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use shared::{FilterSet, Student};

/// Timestamps carrying an offset, besides RFC 3339
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%#z"];

/// Timestamps without an offset; read as wall-clock time
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Plain dates, including the `MM/DD/YYYY` date-picker form
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Filter `records`, comparing join dates by calendar day in local time
pub fn apply(records: &[Student], filters: &FilterSet) -> Vec<Student> {
    apply_in(records, filters, &Local)
}

/// Filter `records`, comparing join dates by calendar day in `tz`
pub fn apply_in<Tz: TimeZone>(records: &[Student], filters: &FilterSet, tz: &Tz) -> Vec<Student> {
    if filters.is_unset() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|student| matches_in(student, filters, tz))
        .cloned()
        .collect()
}

/// Whether one record passes every active predicate
pub fn matches_in<Tz: TimeZone>(student: &Student, filters: &FilterSet, tz: &Tz) -> bool {
    if !filters.cohort.is_empty() && student.cohort != filters.cohort {
        return false;
    }

    if !filters.status.is_empty() && student.status.as_str() != filters.status {
        return false;
    }

    if !filters.courses.is_empty() && !student.courses.iter().any(|course| *course == filters.courses) {
        return false;
    }

    if !filters.date_joined.is_empty() {
        // Unparsable on either side never matches
        return match (calendar_day(&student.date_joined, tz), calendar_day(&filters.date_joined, tz)) {
            (Some(joined), Some(wanted)) => joined == wanted,
            _ => false,
        };
    }

    true
}

/// Calendar day of a timestamp or date string as seen in `tz`
///
/// Offset-bearing timestamps are converted into `tz` first; naive
/// timestamps and bare dates are taken at face value.
pub fn calendar_day<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.with_timezone(tz).date_naive());
    }

    for format in OFFSET_FORMATS {
        if let Ok(stamp) = DateTime::parse_from_str(value, format) {
            return Some(stamp.with_timezone(tz).date_naive());
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(stamp.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use shared::{FilterKey, StudentStatus};

    fn student(id: &str, name: &str, cohort: &str, courses: &[&str], joined: &str, status: StudentStatus) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
            cohort: cohort.to_string(),
            courses: courses.iter().map(|c| c.to_string()).collect(),
            date_joined: joined.to_string(),
            last_login: joined.to_string(),
            status,
        }
    }

    fn roster() -> Vec<Student> {
        vec![
            student("1", "Asha", "AY 2024-25", &["CBSE 9 Science"], "2024-06-01T09:00:00+00:00", StudentStatus::Active),
            student("2", "Ravi", "AY 2023-24", &["CBSE 9 Math"], "2023-06-01T09:00:00+00:00", StudentStatus::Inactive),
            student(
                "3",
                "Meera",
                "AY 2024-25",
                &["CBSE 9 Math", "CBSE 9 Science"],
                "2024-06-01T18:30:00+00:00",
                StudentStatus::Inactive,
            ),
            student("4", "Tom", "AY 2024-25", &["CBSE 9 Math"], "2024-07-15T08:00:00+00:00", StudentStatus::Active),
        ]
    }

    fn names(students: &[Student]) -> Vec<&str> {
        students.iter().map(|s| s.name.as_str()).collect()
    }

    fn is_subsequence(sub: &[Student], full: &[Student]) -> bool {
        let mut rest = full.iter();
        sub.iter().all(|wanted| rest.any(|candidate| candidate == wanted))
    }

    fn sample_filter_sets() -> Vec<FilterSet> {
        vec![
            FilterSet::default(),
            FilterSet::default().with(FilterKey::Cohort, "AY 2024-25"),
            FilterSet::default().with(FilterKey::Status, "inactive"),
            FilterSet::default().with(FilterKey::Courses, "CBSE 9 Math"),
            FilterSet::default().with(FilterKey::DateJoined, "2024-06-01"),
            FilterSet::default()
                .with(FilterKey::Cohort, "AY 2024-25")
                .with(FilterKey::Courses, "CBSE 9 Science"),
            FilterSet::default().with(FilterKey::Cohort, "nobody"),
        ]
    }

    #[test]
    fn test_unset_filters_are_identity() {
        let records = roster();
        assert_eq!(apply_in(&records, &FilterSet::default(), &Utc), records);
    }

    #[test]
    fn test_output_is_ordered_subsequence() {
        let records = roster();
        for filters in sample_filter_sets() {
            let filtered = apply_in(&records, &filters, &Utc);
            assert!(is_subsequence(&filtered, &records), "filters {filters:?}");
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let records = roster();
        for filters in sample_filter_sets() {
            let once = apply_in(&records, &filters, &Utc);
            let twice = apply_in(&once, &filters, &Utc);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_disjoint_filters_compose_conjunctively() {
        let records = roster();
        let cohort = FilterSet::default().with(FilterKey::Cohort, "AY 2024-25");
        let course = FilterSet::default().with(FilterKey::Courses, "CBSE 9 Math");
        let both = cohort.clone().with(FilterKey::Courses, "CBSE 9 Math");

        let chained = apply_in(&apply_in(&records, &cohort, &Utc), &course, &Utc);
        assert_eq!(chained, apply_in(&records, &both, &Utc));
        assert_eq!(names(&chained), vec!["Meera", "Tom"]);
    }

    #[test]
    fn test_cohort_then_status_scenario() {
        let records = vec![
            student("1", "Asha", "AY 2024-25", &["CBSE 9 Science"], "2024-06-01", StudentStatus::Active),
            student("2", "Ravi", "AY 2023-24", &["CBSE 9 Math"], "2023-06-01", StudentStatus::Inactive),
        ];

        let by_cohort = FilterSet::default().with(FilterKey::Cohort, "AY 2024-25");
        assert_eq!(names(&apply_in(&records, &by_cohort, &Utc)), vec!["Asha"]);

        let with_status = by_cohort.with(FilterKey::Status, "inactive");
        assert!(apply_in(&records, &with_status, &Utc).is_empty());
    }

    #[test]
    fn test_cohort_and_status_are_case_sensitive() {
        let records = roster();
        let upper_status = FilterSet::default().with(FilterKey::Status, "Active");
        assert!(apply_in(&records, &upper_status, &Utc).is_empty());

        let lower_cohort = FilterSet::default().with(FilterKey::Cohort, "ay 2024-25");
        assert!(apply_in(&records, &lower_cohort, &Utc).is_empty());
    }

    #[test]
    fn test_course_requires_exact_membership() {
        let records = roster();
        let partial = FilterSet::default().with(FilterKey::Courses, "CBSE 9");
        assert!(apply_in(&records, &partial, &Utc).is_empty());

        let science = FilterSet::default().with(FilterKey::Courses, "CBSE 9 Science");
        assert_eq!(names(&apply_in(&records, &science, &Utc)), vec!["Asha", "Meera"]);
    }

    #[test]
    fn test_join_date_ignores_time_of_day() {
        let records = roster();
        for wanted in ["2024-06-01", "06/01/2024", "2024-06-01T23:59:00+00:00"] {
            let filters = FilterSet::default().with(FilterKey::DateJoined, wanted);
            assert_eq!(names(&apply_in(&records, &filters, &Utc)), vec!["Asha", "Meera"], "filter {wanted}");
        }
    }

    #[test]
    fn test_join_date_uses_viewer_timezone() {
        let records = roster();
        let filters = FilterSet::default().with(FilterKey::DateJoined, "2024-06-02");

        // 18:30 UTC is already the next day at UTC+08:00
        let east = FixedOffset::east_opt(8 * 3600).unwrap();
        assert_eq!(names(&apply_in(&records, &filters, &east)), vec!["Meera"]);
        assert!(apply_in(&records, &filters, &Utc).is_empty());
    }

    #[test]
    fn test_unparsable_dates_never_match() {
        let records = roster();
        let garbage = FilterSet::default().with(FilterKey::DateJoined, "next tuesday");
        assert!(apply_in(&records, &garbage, &Utc).is_empty());

        let broken = vec![student("9", "Zed", "AY 2024-25", &["CBSE 9 Math"], "unknown", StudentStatus::Active)];
        let filters = FilterSet::default().with(FilterKey::DateJoined, "2024-06-01");
        assert!(apply_in(&broken, &filters, &Utc).is_empty());
    }

    #[test]
    fn test_calendar_day_formats() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        for value in [
            "2024-06-01",
            "06/01/2024",
            "2024-06-01T10:15:00",
            "2024-06-01 10:15:00.123",
            "2024-06-01T10:15:00.123456+00:00",
            "2024-06-01 10:15:00+00",
            "2024-06-01T10:15:00Z",
        ] {
            assert_eq!(calendar_day(value, &Utc), Some(day), "value {value}");
        }
        assert_eq!(calendar_day("", &Utc), None);
        assert_eq!(calendar_day("13/45/2024", &Utc), None);
    }
}
