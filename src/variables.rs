//! The matrix of decision variables "student is assigned to course".

use crate::model::Model;
use crate::{CourseRegistry, Error, StudentRegistry};
use good_lp::Variable;
use ndarray::Array2;
use std::collections::HashMap;

/// One boolean decision variable for every (student, course) pair.
///
/// Rows are indexed by student id (position in the `StudentRegistry`), columns by course position in the
/// `CourseRegistry`. Course names are mapped to columns with a hash index built at construction.
pub struct AssignmentVariables {
    matrix: Array2<Variable>,
    course_names: Vec<String>,
    course_columns: HashMap<String, usize>,
}

impl AssignmentVariables {
    /// Allocate one fresh boolean variable per (student, course) pair in `model`, student-major. Each variable is
    /// labelled "{student id} in {course name}".
    pub fn new(students: &StudentRegistry, courses: &CourseRegistry, model: &mut Model) -> Self {
        let course_names: Vec<String> = courses.names().map(String::from).collect();
        let matrix = Array2::from_shape_fn((students.len(), course_names.len()), |(s, c)| {
            model.new_bool_var(format!("{} in {}", s, course_names[c]))
        });
        let course_columns = course_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            matrix,
            course_names,
            course_columns,
        }
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// The variables of all courses for the given student, in course registry order
    pub fn by_student(&self, student: usize) -> Vec<Variable> {
        if student >= self.matrix.nrows() {
            return Vec::new();
        }
        self.matrix.row(student).to_vec()
    }

    /// The variables of all students for the given course, in student registry order
    pub fn by_course(&self, course_name: &str) -> Vec<Variable> {
        match self.course_columns.get(course_name) {
            Some(c) => self.matrix.column(*c).to_vec(),
            None => Vec::new(),
        }
    }

    /// The variables of the given student for the given subset of courses, in course registry order.
    ///
    /// # Errors
    ///
    /// Fails with `Error::NoMatchingVariables` if no variable matches, e.g. because of a typo in a course name.
    pub fn by_student_and_courses<S: AsRef<str>>(
        &self,
        student: usize,
        course_names: &[S],
    ) -> Result<Vec<Variable>, Error> {
        let mut columns: Vec<usize> = course_names
            .iter()
            .filter_map(|name| self.course_columns.get(name.as_ref()).copied())
            .collect();
        columns.sort_unstable();
        columns.dedup();

        let variables: Vec<Variable> = if student < self.matrix.nrows() {
            columns
                .into_iter()
                .map(|c| self.matrix[[student, c]])
                .collect()
        } else {
            Vec::new()
        };
        if variables.is_empty() {
            return Err(Error::NoMatchingVariables {
                student,
                courses: course_names.iter().map(|c| c.as_ref().to_owned()).collect(),
            });
        }
        Ok(variables)
    }

    /// All variables in creation order (student-major, course-minor)
    pub fn all(&self) -> Vec<Variable> {
        self.matrix.iter().copied().collect()
    }

    /// Iterate (student id, course name, variable) for every pair, in creation order
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str, Variable)> {
        self.matrix
            .indexed_iter()
            .map(move |((s, c), v)| (s, self.course_names[c].as_str(), *v))
    }
}
