pub mod constraints;
mod error;
pub mod io;
pub mod model;
pub mod objective;
pub mod score;
pub mod solve;
pub mod variables;

pub use error::Error;

use std::collections::{HashMap, HashSet};

/// Representation of a student's data
#[derive(Clone, Debug, PartialEq)]
pub struct Student {
    /// Student's name, as given in the preference file. Used as key in the solution file.
    name: String,
    /// Course names in strictly decreasing preference (index 0 = most preferred)
    preferences: Vec<String>,
}

impl Student {
    /// Create a student, checking that the preference list is non-empty and free of duplicates.
    pub fn new(name: String, preferences: Vec<String>) -> Result<Self, Error> {
        if preferences.is_empty() {
            return Err(Error::NoPreferences(name));
        }
        let mut seen = HashSet::new();
        for course in preferences.iter() {
            if !seen.insert(course.as_str()) {
                return Err(Error::DuplicatePreference {
                    student: name,
                    course: course.clone(),
                });
            }
        }
        Ok(Self { name, preferences })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    /// 0-based rank of the given course in this student's preferences, if it is listed at all
    pub fn rank_of(&self, course_name: &str) -> Option<usize> {
        self.preferences.iter().position(|c| c == course_name)
    }
}

/// Representation of a course's data
#[derive(Clone, Debug, PartialEq)]
pub struct Course {
    /// Course's name. Unique within a `CourseRegistry`.
    name: String,
    /// Minimum number of students, if the course takes place at all
    min_size: u32,
    /// Maximum number of students
    max_size: u32,
}

impl Course {
    pub fn new(name: String, min_size: u32, max_size: u32) -> Result<Self, Error> {
        if min_size > max_size {
            return Err(Error::InvalidCourseSize {
                name,
                min_size,
                max_size,
            });
        }
        Ok(Self {
            name,
            min_size,
            max_size,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// The list of all students of one problem instance.
///
/// A student's id is its position in the registry. The id is not part of the `Student` itself; it
/// only exists once the student has been added to a registry.
#[derive(Clone, Debug, Default)]
pub struct StudentRegistry {
    students: Vec<Student>,
}

impl StudentRegistry {
    /// Create the registry. Student names must be unique, as they identify students in the
    /// solution file.
    pub fn new(students: Vec<Student>) -> Result<Self, Error> {
        let mut seen = HashSet::new();
        for s in students.iter() {
            if !seen.insert(s.name.as_str()) {
                return Err(Error::DuplicateStudent(s.name.clone()));
            }
        }
        Ok(Self { students })
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn ids(&self) -> std::ops::Range<usize> {
        0..self.students.len()
    }

    /// Iterate (id, student) pairs in registry order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Student)> {
        self.students.iter().enumerate()
    }

    pub fn get(&self, id: usize) -> Option<&Student> {
        self.students.get(id)
    }
}

/// The list of all courses of one problem instance, indexed by course name.
#[derive(Clone, Debug, Default)]
pub struct CourseRegistry {
    courses: Vec<Course>,
    by_name: HashMap<String, usize>,
}

impl CourseRegistry {
    /// Create the registry. Fails if any course name is used more than once.
    pub fn new(courses: Vec<Course>) -> Result<Self, Error> {
        let mut by_name = HashMap::with_capacity(courses.len());
        for (i, c) in courses.iter().enumerate() {
            if by_name.insert(c.name.clone(), i).is_some() {
                return Err(Error::DuplicateCourse(c.name.clone()));
            }
        }
        Ok(Self { courses, by_name })
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Iterate all courses in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(|c| c.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Course> {
        self.by_name.get(name).map(|i| &self.courses[*i])
    }

    /// Position of the course in the registry
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}

/// Chosen course for each student, as (student name, course name) pairs in student registry order
pub type Assignment = Vec<(String, String)>;

#[cfg(test)]
fn assert_data_consistency(students: &StudentRegistry, courses: &CourseRegistry) {
    for (i, c) in courses.iter().enumerate() {
        assert_eq!(courses.index_of(c.name()), Some(i));
        assert!(c.min_size() <= c.max_size());
    }
    for (_id, s) in students.iter() {
        assert!(!s.preferences().is_empty());
        let unique: HashSet<&String> = s.preferences().iter().collect();
        assert_eq!(unique.len(), s.preferences().len());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn student_validation() {
        let s = Student::new("alice".into(), vec!["c1".into(), "c2".into()]).unwrap();
        assert_eq!(s.rank_of("c2"), Some(1));
        assert_eq!(s.rank_of("c3"), None);

        assert!(matches!(
            Student::new("bob".into(), vec![]),
            Err(Error::NoPreferences(name)) if name == "bob"
        ));
        assert!(matches!(
            Student::new("carl".into(), vec!["c1".into(), "c2".into(), "c1".into()]),
            Err(Error::DuplicatePreference { course, .. }) if course == "c1"
        ));
    }

    #[test]
    fn registry_validation() {
        let alice = Student::new("alice".into(), vec!["c1".into()]).unwrap();
        let result = StudentRegistry::new(vec![alice.clone(), alice]);
        assert!(matches!(result, Err(Error::DuplicateStudent(_))));

        assert!(matches!(
            Course::new("c1".into(), 3, 2),
            Err(Error::InvalidCourseSize { .. })
        ));
        let result = CourseRegistry::new(vec![
            Course::new("c1".into(), 0, 2).unwrap(),
            Course::new("c1".into(), 1, 3).unwrap(),
        ]);
        assert!(matches!(result, Err(Error::DuplicateCourse(name)) if name == "c1"));
    }

    #[test]
    fn registry_lookup() {
        let students = StudentRegistry::new(vec![
            Student::new("alice".into(), vec!["c2".into()]).unwrap(),
            Student::new("bob".into(), vec!["c1".into(), "c2".into()]).unwrap(),
        ])
        .unwrap();
        let courses = CourseRegistry::new(vec![
            Course::new("c1".into(), 0, 2).unwrap(),
            Course::new("c2".into(), 1, 3).unwrap(),
        ])
        .unwrap();
        assert_data_consistency(&students, &courses);

        assert_eq!(students.ids().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(students.get(1).unwrap().name(), "bob");
        assert!(students.get(2).is_none());
        assert_eq!(courses.get("c2").unwrap().max_size(), 3);
        assert_eq!(courses.index_of("c2"), Some(1));
        assert!(courses.get("c3").is_none());
        assert_eq!(courses.names().collect::<Vec<_>>(), vec!["c1", "c2"]);
    }
}
