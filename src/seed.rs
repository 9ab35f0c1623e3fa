//! Demo students, courses, and enrollments for local runs.

use crate::domain::{Enrollment, Gender, NewCourse, StudentData};
use crate::error::AppError;
use crate::store::{PageRequest, Store};
use chrono::{Local, Months, NaiveDate};

const COURSES: &[(&str, i32)] = &[
    ("Backend Programming", 3),
    ("iOS", 3),
    ("Android", 2),
    ("Ethical Hacking", 2),
];

/// Inserts the demo data unless students already exist. Returns false when skipped.
pub async fn seed_demo_data(store: &dyn Store) -> Result<bool, AppError> {
    let (_, existing) = store.list_students(PageRequest::new(Some(0), Some(1))).await?;
    if existing > 0 {
        tracing::info!(existing, "students present, skipping demo data");
        return Ok(false);
    }

    let today = Local::now().date_naive();
    let john = store
        .insert_student(&student("John", "Johnson", born(today, 20, 3, 13)?, Gender::M))
        .await?;
    let mark = store
        .insert_student(&student("Mark", "Michaelson", born(today, 18, 9, 27)?, Gender::M))
        .await?;
    let mei = store
        .insert_student(&student("Mei", "Cheng", born(today, 23, 1, 3)?, Gender::V))
        .await?;

    for (name, phase) in COURSES {
        store
            .insert_course(&NewCourse {
                name: name.to_string(),
                phase: *phase,
            })
            .await?;
    }

    let plan: [(i64, &[&str]); 3] = [
        (john.id, &["Ethical Hacking", "Backend Programming"]),
        (mei.id, &["Ethical Hacking"]),
        (mark.id, &["iOS", "Android"]),
    ];
    for (student_id, names) in plan {
        for name in names {
            let course = store
                .find_course_by_name(name)
                .await?
                .ok_or_else(|| AppError::course_not_found(name))?;
            store.enroll(Enrollment::new(student_id, course.id)).await?;
        }
    }
    tracing::info!("demo data seeded");
    Ok(true)
}

fn student(first_name: &str, last_name: &str, birth_date: NaiveDate, gender: Gender) -> StudentData {
    StudentData {
        first_name: first_name.into(),
        last_name: last_name.into(),
        birth_date,
        gender,
        gsm_number: None,
    }
}

/// `today` minus the given years, months, and days.
fn born(today: NaiveDate, years: u32, months: u32, days: u64) -> Result<NaiveDate, AppError> {
    today
        .checked_sub_months(Months::new(years * 12 + months))
        .and_then(|d| d.checked_sub_days(chrono::Days::new(days)))
        .ok_or_else(|| AppError::Internal("demo birth date out of range".into()))
}
