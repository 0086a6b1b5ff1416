//! Player identity captured at login

use serde::{Deserialize, Serialize};

use crate::error::LoginError;

/// Name and student id of the logged-in player.
///
/// Set once at login and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub student_id: String,
}

impl Session {
    /// Validate login form input. Surrounding whitespace is not significant.
    pub fn login(name: &str, student_id: &str) -> Result<Self, LoginError> {
        let name = name.trim();
        let student_id = student_id.trim();
        if name.is_empty() {
            return Err(LoginError::MissingName);
        }
        if student_id.is_empty() {
            return Err(LoginError::MissingStudentId);
        }
        Ok(Self {
            name: name.to_string(),
            student_id: student_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_accepts_both_fields() {
        let session = Session::login(" 홍길동 ", "20240001").expect("valid login");
        assert_eq!(session.name, "홍길동");
        assert_eq!(session.student_id, "20240001");
    }

    #[test]
    fn test_login_rejects_blank_fields() {
        assert_eq!(Session::login("", "1"), Err(LoginError::MissingName));
        assert_eq!(Session::login("kim", "   "), Err(LoginError::MissingStudentId));
    }
}
