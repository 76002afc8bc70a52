use crate::utils::error::{Result, RosterError};
use crate::utils::validation::validate_email;
use std::fmt;
use std::str::FromStr;

/// Base record: a name plus a validated email address.
///
/// The name fields are unrestricted strings and public; the email is
/// kept private so every write goes through the regex check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub first_name: String,
    pub surname: String,
    pub patronymic: String,
    email: String,
}

impl Person {
    pub fn new(
        first_name: impl Into<String>,
        surname: impl Into<String>,
        patronymic: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self> {
        let email = email.into();
        validate_email(&email)?;
        Ok(Self {
            first_name: first_name.into(),
            surname: surname.into(),
            patronymic: patronymic.into(),
            email,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replaces the email, re-running validation. The stored value is
    /// untouched when the new one is rejected.
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<()> {
        let email = email.into();
        validate_email(&email)?;
        self.email = email;
        Ok(())
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Person(surname={}, first_name={}, patronymic={}, email={})",
            self.surname, self.first_name, self.patronymic, self.email
        )
    }
}

/// A student record: a `Person` plus a numeric identifier and a group
/// label.
///
/// Neither `number` nor `group` is validated here. Positivity and
/// uniqueness of `number` are enforced by
/// [`StudentCollection::add_student`](crate::domain::collection::StudentCollection::add_student)
/// only, so a standalone `Student` may carry a non-positive number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub number: i64,
    pub person: Person,
    pub group: String,
}

impl Student {
    pub fn new(
        number: i64,
        first_name: impl Into<String>,
        surname: impl Into<String>,
        patronymic: impl Into<String>,
        email: impl Into<String>,
        group: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            number,
            person: Person::new(first_name, surname, patronymic, email)?,
            group: group.into(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.person.first_name
    }

    pub fn surname(&self) -> &str {
        &self.person.surname
    }

    pub fn patronymic(&self) -> &str {
        &self.person.patronymic
    }

    pub fn email(&self) -> &str {
        self.person.email()
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<()> {
        self.person.set_email(email)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Student(number={}, surname={}, first_name={}, patronymic={}, email={}, group={})",
            self.number,
            self.surname(),
            self.first_name(),
            self.patronymic(),
            self.email(),
            self.group
        )
    }
}

/// The sortable fields of a [`Student`], addressable by name.
///
/// Replaces reflective attribute lookup: the sort operations still take
/// a field name string, but resolution happens through this enum so an
/// unknown name surfaces as [`RosterError::UnknownField`] instead of a
/// runtime attribute error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Number,
    Surname,
    FirstName,
    Patronymic,
    Email,
    Group,
}

impl FromStr for StudentField {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "number" => Ok(Self::Number),
            "surname" => Ok(Self::Surname),
            "first_name" => Ok(Self::FirstName),
            "patronymic" => Ok(Self::Patronymic),
            "email" => Ok(Self::Email),
            "group" => Ok(Self::Group),
            _ => Err(RosterError::UnknownField {
                field: s.to_string(),
            }),
        }
    }
}

impl StudentField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Surname => "surname",
            Self::FirstName => "first_name",
            Self::Patronymic => "patronymic",
            Self::Email => "email",
            Self::Group => "group",
        }
    }

    /// The field's value rendered as a string, as used by the
    /// lexicographic sort.
    pub fn string_value(&self, student: &Student) -> String {
        match self {
            Self::Number => student.number.to_string(),
            Self::Surname => student.surname().to_string(),
            Self::FirstName => student.first_name().to_string(),
            Self::Patronymic => student.patronymic().to_string(),
            Self::Email => student.email().to_string(),
            Self::Group => student.group.clone(),
        }
    }

    /// The field's value coerced to an integer, as used by the numeric
    /// sort.
    pub fn numeric_value(&self, student: &Student) -> Result<i64> {
        match self {
            Self::Number => Ok(student.number),
            _ => {
                let raw = self.string_value(student);
                raw.parse::<i64>()
                    .map_err(|_| RosterError::NonNumericField {
                        field: self.name().to_string(),
                        value: raw,
                    })
            }
        }
    }
}
