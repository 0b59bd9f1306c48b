use crate::model::LinearExpr;
use crate::variables::AssignmentVariables;
use crate::{Error, StudentRegistry};

/// Build the total dissatisfaction to be minimized: for each student and each preferred course at (0-based) rank `r`,
/// the term `r * variable(student, course)`.
///
/// Courses outside a student's preference list get no term, as the corresponding variables are fixed to 0 by
/// `constraints::only_preferred_courses()` anyway.
///
/// # Errors
///
/// Fails with `Error::NoMatchingVariables` if a student's preference names a course that does not exist.
pub fn preference_cost(
    students: &StudentRegistry,
    variables: &AssignmentVariables,
) -> Result<LinearExpr, Error> {
    let mut cost = LinearExpr::default();
    for (id, student) in students.iter() {
        for (rank, course) in student.preferences().iter().enumerate() {
            let v = variables.by_student_and_courses(id, &[course])?[0];
            cost.add_term(rank as i64, v);
        }
    }
    Ok(cost)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::Model;
    use crate::{Course, CourseRegistry, Student};

    #[test]
    fn makes_cost_expression() {
        let students = StudentRegistry::new(vec![Student::new(
            "alice".into(),
            vec!["course_1".into(), "course_2".into()],
        )
        .unwrap()])
        .unwrap();
        let courses = CourseRegistry::new(vec![
            Course::new("course_1".into(), 0, 1).unwrap(),
            Course::new("course_2".into(), 0, 1).unwrap(),
            Course::new("course_3".into(), 0, 1).unwrap(),
        ])
        .unwrap();
        let mut model = Model::new();
        let vars = AssignmentVariables::new(&students, &courses, &mut model);
        let all = vars.all();

        let cost = preference_cost(&students, &vars).unwrap();
        // 'course_3' does not appear at all
        assert_eq!(cost.terms(), &[(0, all[0]), (1, all[1])]);
    }

    #[test]
    fn unknown_preferred_course() {
        let students = StudentRegistry::new(vec![Student::new(
            "alice".into(),
            vec!["course_1".into(), "cuorse_2".into()],
        )
        .unwrap()])
        .unwrap();
        let courses = CourseRegistry::new(vec![
            Course::new("course_1".into(), 0, 1).unwrap(),
            Course::new("course_2".into(), 0, 1).unwrap(),
        ])
        .unwrap();
        let mut model = Model::new();
        let vars = AssignmentVariables::new(&students, &courses, &mut model);

        let result = preference_cost(&students, &vars);
        assert!(matches!(
            result,
            Err(Error::NoMatchingVariables { student: 0, ref courses }) if courses == &["cuorse_2"]
        ));
    }
}
