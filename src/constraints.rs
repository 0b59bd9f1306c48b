//! Generators for the constraint families of the course assignment problem.
//!
//! Three of the four families are pure functions of the registries and the variable matrix, returning constraint
//! values to be added to the model afterwards. The minimum size rule is the exception: it needs an auxiliary indicator
//! variable per course, which must be created in the same `Model` that is solved later. Thus
//! `add_min_students_per_course()` takes the model itself.

use crate::model::{Constraint, LinearExpr, Literal, Model};
use crate::variables::AssignmentVariables;
use crate::{CourseRegistry, Error, StudentRegistry};
use log::debug;

/// Every student is assigned to exactly one course: the sum of each student's variables equals 1.
pub fn exactly_one_course_per_student(
    variables: &AssignmentVariables,
    students: &StudentRegistry,
) -> Vec<Constraint> {
    students
        .ids()
        .map(|s| Constraint::equal(LinearExpr::sum(variables.by_student(s)), 1))
        .collect()
}

/// No course gets more students than its `max_size`.
pub fn max_students_per_course(
    variables: &AssignmentVariables,
    courses: &CourseRegistry,
) -> Vec<Constraint> {
    courses
        .iter()
        .map(|c| {
            Constraint::less_or_equal(
                LinearExpr::sum(variables.by_course(c.name())),
                c.max_size() as i64,
            )
        })
        .collect()
}

/// Students are only assigned to courses from their preference list: all variables for courses not listed by the
/// student are fixed to 0.
///
/// A student who listed every course gets no constraint at all.
pub fn only_preferred_courses(
    variables: &AssignmentVariables,
    courses: &CourseRegistry,
    students: &StudentRegistry,
) -> Result<Vec<Constraint>, Error> {
    let mut constraints = Vec::new();
    for (id, student) in students.iter() {
        let non_preferred: Vec<&str> = courses
            .names()
            .filter(|name| student.rank_of(name).is_none())
            .collect();
        if non_preferred.is_empty() {
            continue;
        }
        for v in variables.by_student_and_courses(id, &non_preferred[..])? {
            constraints.push(Constraint::equal(LinearExpr::sum(vec![v]), 0));
        }
    }
    Ok(constraints)
}

/// Each course either gets no students at all or at least `min_size` students.
///
/// This is a disjunction, which cannot be expressed as a single linear constraint. For every course, a boolean
/// indicator "course is empty" is added to the model. If it is true, the course's enrollment must be 0; if it is
/// false, the enrollment must be at least `min_size`.
pub fn add_min_students_per_course(
    variables: &AssignmentVariables,
    courses: &CourseRegistry,
    model: &mut Model,
) {
    for c in courses.iter() {
        let enrollment = LinearExpr::sum(variables.by_course(c.name()));
        let empty = model.new_bool_var(format!("either 0 or min_size students for {}", c.name()));
        model.add_enforced(
            Constraint::equal(enrollment.clone(), 0),
            Literal::new(empty),
        );
        model.add_enforced(
            Constraint::greater_or_equal(enrollment, c.min_size() as i64),
            Literal::new(empty).negate(),
        );
    }
    debug!("Added minimum size indicators for {} courses", courses.len());
}
