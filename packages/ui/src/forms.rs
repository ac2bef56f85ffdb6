//! Form drafts: raw text as typed, validated into request bodies.
//!
//! Validation failures are [`ApiError::Validation`] and never reach the
//! network. Blank optional fields become `None`.

use api::{
    ApiError, LoginRequest, NewNotification, NewSalaryPayment, NewStudent, NewTeacher,
    RegisterSchoolRequest, Student, StudentUpdate,
};
use chrono::NaiveDate;

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn parse_date(raw: &str, field: &str) -> Result<Option<NaiveDate>, ApiError> {
    match raw.trim() {
        "" => Ok(None),
        raw => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::validation(format!("{field} is not a valid date"))),
    }
}

/// Marks an action as in flight. Returns `false`, leaving the flag
/// untouched, when one is already running; the caller clears it when done.
pub fn begin_action(in_flight: &mut bool) -> bool {
    !std::mem::replace(in_flight, true)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    pub fn validate(&self) -> Result<LoginRequest, ApiError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::validation("Please enter your email and password"));
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Step of the two-step registration form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationStep {
    #[default]
    School,
    Principal,
}

/// School details first, then the principal's account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationDraft {
    pub step: RegistrationStep,
    pub school_name: String,
    pub school_address: String,
    pub school_phone: String,
    pub school_email: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationDraft {
    /// Move to the account step once the school has a name.
    pub fn advance(&mut self) -> Result<(), ApiError> {
        if self.school_name.trim().is_empty() {
            return Err(ApiError::validation("Please enter the school name"));
        }
        self.step = RegistrationStep::Principal;
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = RegistrationStep::School;
    }

    pub fn validate(&self) -> Result<RegisterSchoolRequest, ApiError> {
        if self.school_name.trim().is_empty() {
            return Err(ApiError::validation("Please enter the school name"));
        }
        if self.name.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty()
        {
            return Err(ApiError::validation("Please fill in all required fields"));
        }
        if self.password != self.confirm_password {
            return Err(ApiError::validation("Passwords do not match"));
        }
        Ok(RegisterSchoolRequest {
            school_name: self.school_name.trim().to_string(),
            school_address: optional(&self.school_address),
            school_phone: optional(&self.school_phone),
            school_email: optional(&self.school_email),
            user_name: self.name.trim().to_string(),
            user_email: self.email.trim().to_string(),
            user_password: self.password.clone(),
        })
    }
}

/// The admission form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDraft {
    pub admission_number: String,
    pub name: String,
    pub class_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub date_of_admission: String,
    pub father_name: String,
    pub mother_name: String,
    pub parent_contact: String,
    pub parent_email: String,
    pub address: String,
}

impl StudentDraft {
    /// Empty form with the admission date set to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date_of_admission: today.format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<NewStudent, ApiError> {
        let required = [
            &self.admission_number,
            &self.name,
            &self.class_name,
            &self.parent_contact,
            &self.date_of_admission,
        ];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(ApiError::validation("Please fill in all required fields"));
        }
        let date_of_admission = parse_date(&self.date_of_admission, "Admission date")?
            .ok_or_else(|| ApiError::validation("Please fill in all required fields"))?;
        Ok(NewStudent {
            class_name: self.class_name.trim().to_string(),
            admission_number: self.admission_number.trim().to_string(),
            name: self.name.trim().to_string(),
            father_name: optional(&self.father_name),
            mother_name: optional(&self.mother_name),
            date_of_birth: parse_date(&self.date_of_birth, "Date of birth")?,
            gender: optional(&self.gender),
            address: optional(&self.address),
            parent_contact: self.parent_contact.trim().to_string(),
            parent_email: optional(&self.parent_email),
            date_of_admission,
        })
    }
}

/// Editable contact fields on the student detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactEdit {
    pub name: String,
    pub father_name: String,
    pub mother_name: String,
    pub address: String,
    pub parent_contact: String,
    pub parent_email: String,
}

impl ContactEdit {
    pub fn from_student(student: &Student) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            name: student.name.clone(),
            father_name: text(&student.father_name),
            mother_name: text(&student.mother_name),
            address: text(&student.address),
            parent_contact: student.parent_contact.clone(),
            parent_email: text(&student.parent_email),
        }
    }

    pub fn validate(&self) -> Result<StudentUpdate, ApiError> {
        if self.name.trim().is_empty() || self.parent_contact.trim().is_empty() {
            return Err(ApiError::validation("Name and parent contact are required"));
        }
        Ok(StudentUpdate {
            name: Some(self.name.trim().to_string()),
            father_name: optional(&self.father_name),
            mother_name: optional(&self.mother_name),
            address: optional(&self.address),
            parent_contact: Some(self.parent_contact.trim().to_string()),
            parent_email: optional(&self.parent_email),
            ..Default::default()
        })
    }

    /// `student` with these edits applied, as shown after a successful save.
    pub fn apply(&self, student: &Student) -> Student {
        Student {
            name: self.name.trim().to_string(),
            father_name: optional(&self.father_name),
            mother_name: optional(&self.mother_name),
            address: optional(&self.address),
            parent_contact: self.parent_contact.trim().to_string(),
            parent_email: optional(&self.parent_email),
            ..student.clone()
        }
    }
}

/// New teacher account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeacherDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub assigned_classes: Vec<String>,
}

impl TeacherDraft {
    /// Add or remove a class from the assignment.
    pub fn toggle_class(&mut self, class_name: &str) {
        if let Some(pos) = self.assigned_classes.iter().position(|c| c == class_name) {
            self.assigned_classes.remove(pos);
        } else {
            self.assigned_classes.push(class_name.to_string());
        }
    }

    pub fn validate(&self) -> Result<NewTeacher, ApiError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
            || self.assigned_classes.is_empty()
        {
            return Err(ApiError::validation(
                "Please fill in all required fields and assign at least one class",
            ));
        }
        Ok(NewTeacher {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            phone: optional(&self.phone),
            address: optional(&self.address),
            assigned_classes: self.assigned_classes.clone(),
        })
    }
}

/// Salary payment to one teacher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryDraft {
    pub amount: String,
    pub remark: String,
}

impl SalaryDraft {
    pub fn validate(&self, teacher_id: &str) -> Result<NewSalaryPayment, ApiError> {
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite() && *a > 0.0)
            .ok_or_else(|| ApiError::validation("Please enter amount"))?;
        Ok(NewSalaryPayment {
            teacher_id: teacher_id.to_string(),
            amount,
            remark: optional(&self.remark),
        })
    }
}

/// Parent notification, optionally limited to one class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    /// Empty means every class.
    pub target_class: String,
}

impl NotificationDraft {
    pub fn validate(&self) -> Result<NewNotification, ApiError> {
        if self.title.trim().is_empty() || self.message.trim().is_empty() {
            return Err(ApiError::validation("Please fill in all required fields"));
        }
        Ok(NewNotification {
            title: self.title.trim().to_string(),
            message: self.message.trim().to_string(),
            target_class: optional(&self.target_class),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_second_trigger_ignored_while_in_flight() {
        let mut settling = false;
        assert!(begin_action(&mut settling));
        assert!(settling);

        // A double click lands before the first request finishes.
        assert!(!begin_action(&mut settling));
        assert!(settling);

        settling = false;
        assert!(begin_action(&mut settling));
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(LoginDraft::default().validate().is_err());
        let draft = LoginDraft {
            email: " head@school.test ".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(draft.validate().unwrap().email, "head@school.test");
    }

    #[test]
    fn test_registration_steps() {
        let mut draft = RegistrationDraft::default();
        assert!(draft.advance().is_err());
        assert_eq!(draft.step, RegistrationStep::School);

        draft.school_name = "Greenfield".to_string();
        draft.advance().unwrap();
        assert_eq!(draft.step, RegistrationStep::Principal);

        draft.name = "Meera".to_string();
        draft.email = "head@school.test".to_string();
        draft.password = "secret".to_string();
        draft.confirm_password = "secrte".to_string();
        assert_eq!(
            draft.validate().unwrap_err(),
            ApiError::validation("Passwords do not match")
        );

        draft.confirm_password = "secret".to_string();
        let request = draft.validate().unwrap();
        assert_eq!(request.school_name, "Greenfield");
        assert_eq!(request.school_phone, None);

        draft.back();
        assert_eq!(draft.step, RegistrationStep::School);
    }

    #[test]
    fn test_admission_defaults_and_requirements() {
        let mut draft = StudentDraft::new(today());
        assert_eq!(draft.date_of_admission, "2024-06-03");
        assert!(draft.validate().is_err());

        draft.admission_number = "ADM-7".to_string();
        draft.name = "Aarav".to_string();
        draft.class_name = "Class 5".to_string();
        draft.parent_contact = "9876543210".to_string();
        let student = draft.validate().unwrap();
        assert_eq!(student.date_of_admission, today());
        assert_eq!(student.date_of_birth, None);

        draft.date_of_birth = "2015-02-30".to_string();
        assert!(draft.validate().is_err());
        draft.date_of_birth = "2015-02-28".to_string();
        assert!(draft.validate().unwrap().date_of_birth.is_some());

        draft.date_of_admission.clear();
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_contact_edit_roundtrip() {
        let student: Student =
            serde_json::from_value(api::testing::student_json("s1", "Aarav", "Class 5")).unwrap();
        let mut edit = ContactEdit::from_student(&student);
        edit.parent_email = "parent@mail.test".to_string();

        let update = edit.validate().unwrap();
        assert_eq!(update.parent_email.as_deref(), Some("parent@mail.test"));
        assert_eq!(update.class_name, None);

        let shown = edit.apply(&student);
        assert_eq!(shown.parent_email.as_deref(), Some("parent@mail.test"));
        assert_eq!(shown.class_name, "Class 5");

        edit.parent_contact = "  ".to_string();
        assert!(edit.validate().is_err());
    }

    #[test]
    fn test_teacher_needs_a_class() {
        let mut draft = TeacherDraft {
            name: "Ravi".to_string(),
            email: "ravi@school.test".to_string(),
            password: "pw".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());

        draft.toggle_class("Class 1");
        draft.toggle_class("Class 2");
        draft.toggle_class("Class 1");
        assert_eq!(draft.validate().unwrap().assigned_classes, vec!["Class 2"]);
    }

    #[test]
    fn test_salary_amount() {
        let mut draft = SalaryDraft::default();
        assert!(draft.validate("t1").is_err());
        draft.amount = "-10".to_string();
        assert!(draft.validate("t1").is_err());
        draft.amount = "25000".to_string();
        let payment = draft.validate("t1").unwrap();
        assert_eq!(payment.amount, 25000.0);
        assert_eq!(payment.remark, None);
    }

    #[test]
    fn test_notification_target() {
        let mut draft = NotificationDraft {
            title: "Holiday".to_string(),
            ..Default::default()
        };
        assert!(draft.validate().is_err());
        draft.message = "School closed on Friday".to_string();
        assert_eq!(draft.validate().unwrap().target_class, None);
        draft.target_class = "Class 3".to_string();
        assert_eq!(draft.validate().unwrap().target_class.as_deref(), Some("Class 3"));
    }
}
