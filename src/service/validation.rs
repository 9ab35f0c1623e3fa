//! Request validation. Each check collects every violation before failing.

use crate::domain::{Gender, NewCourse, StudentData, StudentPatch};
use crate::error::{AppError, FieldViolation};
use crate::request::{CourseRequest, NewCourseRequest, StudentRequest};
use chrono::NaiveDate;

pub struct RequestValidator;

impl RequestValidator {
    /// Full student body (create and replace). Names must be non-blank; birth date and gender must parse.
    pub fn validate_student(req: &StudentRequest) -> Result<StudentData, AppError> {
        let mut errors = Vec::new();
        let first_name = required_text("firstName", req.first_name.as_deref(), &mut errors);
        let last_name = required_text("lastName", req.last_name.as_deref(), &mut errors);
        let birth_date = match req.birth_date.as_deref() {
            None => {
                errors.push(FieldViolation::new("birthDate", "is required"));
                None
            }
            Some(s) => parse_date(s, &mut errors),
        };
        let gender = match req.gender.as_deref() {
            None => {
                errors.push(FieldViolation::new("gender", "is required"));
                None
            }
            Some(s) => parse_gender(s, &mut errors),
        };
        match (first_name, last_name, birth_date, gender) {
            (Some(first_name), Some(last_name), Some(birth_date), Some(gender)) if errors.is_empty() => {
                Ok(StudentData {
                    first_name,
                    last_name,
                    birth_date,
                    gender,
                    gsm_number: req.gsm_number.clone(),
                })
            }
            _ => Err(AppError::Validation(errors)),
        }
    }

    /// Partial student body (PATCH). Only supplied gender and birth date are checked.
    pub fn validate_student_patch(req: &StudentRequest) -> Result<StudentPatch, AppError> {
        let mut errors = Vec::new();
        let birth_date = req.birth_date.as_deref().and_then(|s| parse_date(s, &mut errors));
        let gender = req.gender.as_deref().and_then(|s| parse_gender(s, &mut errors));
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }
        Ok(StudentPatch {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            birth_date,
            gender,
            gsm_number: req.gsm_number.clone(),
        })
    }

    pub fn validate_new_course(req: &NewCourseRequest) -> Result<NewCourse, AppError> {
        let mut errors = Vec::new();
        let name = required_text("name", req.name.as_deref(), &mut errors);
        if req.phase.is_none() {
            errors.push(FieldViolation::new("phase", "is required"));
        }
        match (name, req.phase) {
            (Some(name), Some(phase)) if errors.is_empty() => Ok(NewCourse { name, phase }),
            _ => Err(AppError::Validation(errors)),
        }
    }

    pub fn validate_course_ref(req: &CourseRequest) -> Result<i64, AppError> {
        req.id
            .ok_or_else(|| AppError::Validation(vec![FieldViolation::new("id", "is required")]))
    }
}

fn required_text(field: &'static str, v: Option<&str>, errors: &mut Vec<FieldViolation>) -> Option<String> {
    match v {
        None => {
            errors.push(FieldViolation::new(field, "is required"));
            None
        }
        Some(s) if s.trim().is_empty() => {
            errors.push(FieldViolation::new(field, "must not be blank"));
            None
        }
        Some(s) => Some(s.to_string()),
    }
}

/// Exactly `dddd-dd-dd`; chrono alone accepts signs, padding and short fields.
fn is_iso_date_shape(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            4 | 7 => *c == b'-',
            _ => c.is_ascii_digit(),
        })
}

fn parse_date(s: &str, errors: &mut Vec<FieldViolation>) -> Option<NaiveDate> {
    let parsed = if is_iso_date_shape(s) {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    } else {
        None
    };
    match parsed {
        Some(d) => Some(d),
        None => {
            errors.push(FieldViolation::new("birthDate", "must be an ISO date (YYYY-MM-DD)"));
            None
        }
    }
}

fn parse_gender(s: &str, errors: &mut Vec<FieldViolation>) -> Option<Gender> {
    match s.parse::<Gender>() {
        Ok(g) => Some(g),
        Err(_) => {
            let codes: Vec<&str> = Gender::ALL.iter().map(|g| g.as_code()).collect();
            errors.push(FieldViolation::new(
                "gender",
                format!("must be one of: {}", codes.join(", ")),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jill() -> StudentRequest {
        StudentRequest {
            first_name: Some("Jill".into()),
            last_name: Some("Jackson".into()),
            birth_date: Some("1995-04-17".into()),
            gender: Some("V".into()),
            gsm_number: Some("77445521".into()),
        }
    }

    fn fields(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::Validation(v) => v.into_iter().map(|f| f.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_student() {
        let data = RequestValidator::validate_student(&jill()).unwrap();
        assert_eq!(data.first_name, "Jill");
        assert_eq!(data.birth_date, NaiveDate::from_ymd_opt(1995, 4, 17).unwrap());
        assert_eq!(data.gender, Gender::V);
        assert_eq!(data.gsm_number.as_deref(), Some("77445521"));
    }

    #[test]
    fn reports_every_violation() {
        let req = StudentRequest {
            gender: Some("Female".into()),
            birth_date: Some("1990-04-17".into()),
            ..Default::default()
        };
        let err = RequestValidator::validate_student(&req).unwrap_err();
        assert_eq!(fields(err), vec!["firstName", "lastName", "gender"]);
    }

    #[test]
    fn rejects_blank_names_and_bad_dates() {
        let req = StudentRequest {
            first_name: Some("  ".into()),
            birth_date: Some("17-04-1995".into()),
            ..jill()
        };
        let err = RequestValidator::validate_student(&req).unwrap_err();
        assert_eq!(fields(err), vec!["firstName", "birthDate"]);
    }

    #[test]
    fn birth_date_must_be_strict_iso() {
        for bad in ["1995-4-7", "+1995-04-17", " 1995-04-17", "1995-04-17 ", "1995/04/17", "1995-02-30"] {
            let req = StudentRequest {
                birth_date: Some(bad.into()),
                ..jill()
            };
            let err = RequestValidator::validate_student(&req).unwrap_err();
            assert_eq!(fields(err), vec!["birthDate"], "{bad:?} accepted");
        }
        let req = StudentRequest {
            birth_date: Some("1995-4-7".into()),
            ..Default::default()
        };
        assert_eq!(fields(RequestValidator::validate_student_patch(&req).unwrap_err()), vec!["birthDate"]);
    }

    #[test]
    fn patch_checks_only_supplied_fields() {
        let req = StudentRequest {
            last_name: Some("Johnson".into()),
            ..Default::default()
        };
        let patch = RequestValidator::validate_student_patch(&req).unwrap();
        assert_eq!(patch.last_name.as_deref(), Some("Johnson"));
        assert!(patch.gender.is_none());

        let req = StudentRequest {
            gender: Some("X".into()),
            ..Default::default()
        };
        assert_eq!(fields(RequestValidator::validate_student_patch(&req).unwrap_err()), vec!["gender"]);
    }

    #[test]
    fn course_requests() {
        let ok = NewCourseRequest {
            name: Some("iOS".into()),
            phase: Some(3),
        };
        assert_eq!(
            RequestValidator::validate_new_course(&ok).unwrap(),
            NewCourse { name: "iOS".into(), phase: 3 }
        );
        let err = RequestValidator::validate_new_course(&NewCourseRequest::default()).unwrap_err();
        assert_eq!(fields(err), vec!["name", "phase"]);
        assert!(RequestValidator::validate_course_ref(&CourseRequest { id: None }).is_err());
        assert_eq!(RequestValidator::validate_course_ref(&CourseRequest { id: Some(4) }).unwrap(), 4);
    }
}
