use crate::domain::model::{Student, StudentField};
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::validate_student_number;
use std::fmt;
use std::fs;
use std::path::Path;
use std::slice;

/// Ordered, mutable store of [`Student`] records.
///
/// Insertion order is preserved. Uniqueness of student numbers and
/// emails, and positivity of numbers, are enforced by [`add_student`]
/// only; records supplied through [`from_students`] or
/// [`load_from_file`] are taken as-is.
///
/// [`add_student`]: StudentCollection::add_student
/// [`from_students`]: StudentCollection::from_students
/// [`load_from_file`]: StudentCollection::load_from_file
#[derive(Debug, Clone, Default)]
pub struct StudentCollection {
    students: Vec<Student>,
}

impl StudentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing sequence without re-running any validation.
    pub fn from_students(students: Vec<Student>) -> Self {
        Self { students }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Positional lookup. Errors outside `[0, len)`.
    pub fn get(&self, index: usize) -> Result<&Student> {
        self.students
            .get(index)
            .ok_or(RosterError::IndexOutOfBounds {
                index,
                len: self.students.len(),
            })
    }

    /// A fresh, non-destructive cursor over the records in current
    /// order.
    pub fn iter(&self) -> slice::Iter<'_, Student> {
        self.students.iter()
    }

    /// Appends a student, enforcing the collection invariants: the
    /// number must be strictly positive, and neither the number nor the
    /// email may already be present. On failure the collection is
    /// unchanged.
    pub fn add_student(&mut self, student: Student) -> Result<()> {
        validate_student_number(student.number)?;

        if self.students.iter().any(|s| s.number == student.number) {
            return Err(RosterError::DuplicateNumber {
                number: student.number,
            });
        }
        if self.students.iter().any(|s| s.email() == student.email()) {
            return Err(RosterError::DuplicateEmail {
                email: student.email().to_string(),
            });
        }

        tracing::debug!(number = student.number, group = %student.group, "adding student");
        self.students.push(student);
        Ok(())
    }

    /// Adds students one by one, stopping at the first failure.
    ///
    /// There is no rollback: everything added before the failing record
    /// stays in the collection, so callers must treat a returned error
    /// as a partially applied batch.
    pub fn add_students(&mut self, students: impl IntoIterator<Item = Student>) -> Result<()> {
        for student in students {
            self.add_student(student)?;
        }
        Ok(())
    }

    /// Removes the student with the given number. Silently does nothing
    /// when no record matches.
    pub fn remove_student(&mut self, number: i64) {
        if let Some(pos) = self.students.iter().position(|s| s.number == number) {
            tracing::debug!(number, "removing student");
            self.students.remove(pos);
        }
    }

    /// All students whose group equals `group`, cloned into a new
    /// sequence in original relative order.
    pub fn filter_by_group(&self, group: &str) -> Vec<Student> {
        self.students
            .iter()
            .filter(|s| s.group == group)
            .cloned()
            .collect()
    }

    /// Lazy counterpart of [`filter_by_group`]: the group predicate is
    /// evaluated as the iterator is pulled, and each call hands out a
    /// fresh iterator starting at the front of the current sequence.
    ///
    /// [`filter_by_group`]: StudentCollection::filter_by_group
    pub fn students_by_group<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = &'a Student> + 'a {
        self.students.iter().filter(move |s| s.group == group)
    }

    /// A new sequence sorted ascending by the named field's string
    /// value, lexicographically by code point. The sort is stable and
    /// the collection itself is left untouched.
    pub fn sort_by_string_field(&self, field: &str) -> Result<Vec<Student>> {
        let field: StudentField = field.parse()?;
        let mut sorted = self.students.clone();
        sorted.sort_by_key(|s| field.string_value(s));
        Ok(sorted)
    }

    /// Like [`sort_by_string_field`], but coerces the field's value to
    /// an integer before comparing. Errors when any record's value does
    /// not parse as an integer.
    ///
    /// [`sort_by_string_field`]: StudentCollection::sort_by_string_field
    pub fn sort_by_numeric_field(&self, field: &str) -> Result<Vec<Student>> {
        let field: StudentField = field.parse()?;
        let mut keyed: Vec<(i64, Student)> = self
            .students
            .iter()
            .map(|s| Ok((field.numeric_value(s)?, s.clone())))
            .collect::<Result<_>>()?;
        keyed.sort_by_key(|(key, _)| *key);
        Ok(keyed.into_iter().map(|(_, s)| s).collect())
    }

    /// Writes one debug line per record, in collection order,
    /// truncating any existing file. The format is a dump, not input
    /// for [`load_from_file`].
    ///
    /// [`load_from_file`]: StudentCollection::load_from_file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut out = String::new();
        for student in &self.students {
            out.push_str(&student.to_string());
            out.push('\n');
        }
        fs::write(path, out)?;
        tracing::info!(path = %path.display(), records = self.students.len(), "roster saved");
        Ok(())
    }

    /// Loads a roster from a comma-separated UTF-8 file.
    ///
    /// The first line is a header and is skipped; empty lines are
    /// ignored. Every other line must hold exactly six fields:
    /// `number,surname,first_name,patronymic,email,group`. No quoting
    /// or escaping, so embedded commas are impossible.
    ///
    /// Emails and the integer syntax of `number` are checked per line,
    /// but the insert-time invariants (positive numbers, unique
    /// numbers and emails) are deliberately not re-applied here: the
    /// file is trusted, matching [`from_students`].
    ///
    /// [`from_students`]: StudentCollection::from_students
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        let mut students = Vec::new();
        for (line_no, line) in contents.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            students.push(Self::parse_line(line_no + 1, line)?);
        }

        tracing::info!(path = %path.display(), records = students.len(), "roster loaded");
        Ok(Self::from_students(students))
    }

    fn parse_line(line_no: usize, line: &str) -> Result<Student> {
        let fields: Vec<&str> = line.trim().split(',').collect();
        if fields.len() != 6 {
            return Err(RosterError::ParseError {
                line: line_no,
                reason: format!("expected 6 comma-separated fields, got {}", fields.len()),
            });
        }

        let number: i64 = fields[0]
            .trim()
            .parse()
            .map_err(|_| RosterError::ParseError {
                line: line_no,
                reason: format!("student number '{}' is not an integer", fields[0]),
            })?;

        // Column order is number,surname,first_name,patronymic,email,group.
        Student::new(number, fields[2], fields[1], fields[3], fields[4], fields[5]).map_err(
            |e| RosterError::ParseError {
                line: line_no,
                reason: e.to_string(),
            },
        )
    }
}

impl<'a> IntoIterator for &'a StudentCollection {
    type Item = &'a Student;
    type IntoIter = slice::Iter<'a, Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for StudentCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StudentCollection(students=[")?;
        for (i, student) in self.students.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", student)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Student;

    fn student(number: i64, email: &str, group: &str) -> Student {
        Student::new(number, "Ivan", "Ivanov", "Ivanovich", email, group).unwrap()
    }

    #[test]
    fn test_add_student_appends_in_order() {
        let mut roster = StudentCollection::new();
        roster.add_student(student(1, "a@example.com", "G-1")).unwrap();
        roster.add_student(student(2, "b@example.com", "G-2")).unwrap();

        assert_eq!(roster.len(), 2);
        let numbers: Vec<i64> = roster.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_add_student_rejects_non_positive_number() {
        let mut roster = StudentCollection::new();
        let err = roster.add_student(student(0, "a@example.com", "G-1"));
        assert!(matches!(err, Err(RosterError::InvalidNumber { number: 0 })));
        assert!(roster.is_empty());

        let err = roster.add_student(student(-3, "a@example.com", "G-1"));
        assert!(matches!(err, Err(RosterError::InvalidNumber { number: -3 })));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_add_student_rejects_duplicate_number() {
        let mut roster = StudentCollection::new();
        roster.add_student(student(1, "a@example.com", "G-1")).unwrap();

        let err = roster.add_student(student(1, "b@example.com", "G-1"));
        assert!(matches!(err, Err(RosterError::DuplicateNumber { number: 1 })));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_add_student_rejects_duplicate_email() {
        let mut roster = StudentCollection::new();
        roster.add_student(student(1, "a@example.com", "G-1")).unwrap();

        let err = roster.add_student(student(2, "a@example.com", "G-1"));
        assert!(matches!(err, Err(RosterError::DuplicateEmail { .. })));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_add_students_partial_insert_on_failure() {
        let mut roster = StudentCollection::new();
        let batch = vec![
            student(1, "a@example.com", "G-1"),
            student(2, "b@example.com", "G-1"),
            student(1, "c@example.com", "G-1"), // duplicate number
            student(3, "d@example.com", "G-1"), // never reached
        ];

        let err = roster.add_students(batch);
        assert!(err.is_err());
        // No rollback: the first two records stay.
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(1).unwrap().number, 2);
    }

    #[test]
    fn test_remove_student_is_noop_when_absent() {
        let mut roster = StudentCollection::new();
        roster.add_student(student(1, "a@example.com", "G-1")).unwrap();
        roster.add_student(student(2, "b@example.com", "G-1")).unwrap();

        roster.remove_student(1);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(0).unwrap().number, 2);

        roster.remove_student(99);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_filter_by_group_preserves_order_and_is_idempotent() {
        let mut roster = StudentCollection::new();
        roster.add_student(student(1, "a@example.com", "G-1")).unwrap();
        roster.add_student(student(2, "b@example.com", "G-2")).unwrap();
        roster.add_student(student(3, "c@example.com", "G-1")).unwrap();

        let first = roster.filter_by_group("G-1");
        let numbers: Vec<i64> = first.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 3]);

        let second = roster.filter_by_group("G-1");
        assert_eq!(first, second);

        assert!(roster.filter_by_group("G-9").is_empty());
    }

    #[test]
    fn test_students_by_group_is_lazy_and_restartable() {
        let mut roster = StudentCollection::new();
        roster.add_student(student(1, "a@example.com", "G-1")).unwrap();
        roster.add_student(student(2, "b@example.com", "G-2")).unwrap();
        roster.add_student(student(3, "c@example.com", "G-1")).unwrap();

        let mut cursor = roster.students_by_group("G-1");
        assert_eq!(cursor.next().unwrap().number, 1);
        assert_eq!(cursor.next().unwrap().number, 3);
        assert!(cursor.next().is_none());

        // A second call starts over from the front.
        let restarted: Vec<i64> = roster.students_by_group("G-1").map(|s| s.number).collect();
        assert_eq!(restarted, vec![1, 3]);

        // Matches the eager filter.
        let eager: Vec<i64> = roster
            .filter_by_group("G-1")
            .iter()
            .map(|s| s.number)
            .collect();
        assert_eq!(restarted, eager);
    }

    #[test]
    fn test_sort_by_string_field_leaves_collection_untouched() {
        let mut roster = StudentCollection::new();
        roster
            .add_student(
                Student::new(1, "Boris", "Petrov", "Borisovich", "b@example.com", "G-1").unwrap(),
            )
            .unwrap();
        roster
            .add_student(
                Student::new(2, "Anna", "Ivanova", "Petrovna", "a@example.com", "G-1").unwrap(),
            )
            .unwrap();

        let sorted = roster.sort_by_string_field("first_name").unwrap();
        let names: Vec<&str> = sorted.iter().map(|s| s.first_name()).collect();
        assert_eq!(names, vec!["Anna", "Boris"]);

        // Original order is unaffected.
        assert_eq!(roster.get(0).unwrap().first_name(), "Boris");
    }

    #[test]
    fn test_sort_by_string_field_unknown_field() {
        let roster = StudentCollection::new();
        assert!(matches!(
            roster.sort_by_string_field("nickname"),
            Err(RosterError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_sort_by_numeric_field_orders_by_integer_value() {
        let mut roster = StudentCollection::new();
        roster.add_student(student(10, "a@example.com", "G-1")).unwrap();
        roster.add_student(student(2, "b@example.com", "G-1")).unwrap();
        roster.add_student(student(33, "c@example.com", "G-1")).unwrap();

        let sorted = roster.sort_by_numeric_field("number").unwrap();
        let numbers: Vec<i64> = sorted.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![2, 10, 33]);

        // Lexicographic sort of the same field would give 10, 2, 33.
        let lexical = roster.sort_by_string_field("number").unwrap();
        let numbers: Vec<i64> = lexical.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![10, 2, 33]);
    }

    #[test]
    fn test_sort_by_numeric_field_rejects_non_numeric_values() {
        let mut roster = StudentCollection::new();
        roster.add_student(student(1, "a@example.com", "G-1")).unwrap();

        assert!(matches!(
            roster.sort_by_numeric_field("surname"),
            Err(RosterError::NonNumericField { .. })
        ));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let mut roster = StudentCollection::new();
        roster.add_student(student(1, "a@example.com", "G-1")).unwrap();

        assert_eq!(roster.get(0).unwrap().number, 1);
        assert!(matches!(
            roster.get(1),
            Err(RosterError::IndexOutOfBounds { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_from_students_skips_validation() {
        // Duplicate numbers and a non-positive number are accepted
        // as-is when the sequence is supplied up front.
        let roster = StudentCollection::from_students(vec![
            student(0, "a@example.com", "G-1"),
            student(0, "a@example.com", "G-1"),
        ]);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_display_format() {
        let mut roster = StudentCollection::new();
        assert_eq!(roster.to_string(), "StudentCollection(students=[])");

        roster.add_student(student(1, "a@example.com", "G-1")).unwrap();
        assert_eq!(
            roster.to_string(),
            "StudentCollection(students=[Student(number=1, surname=Ivanov, first_name=Ivan, patronymic=Ivanovich, email=a@example.com, group=G-1)])"
        );
    }
}
