//! Orchestration of a complete solver run: building the model from the registries, solving it with the external
//! solver and extracting the course assignment.

use crate::constraints::{
    add_min_students_per_course, exactly_one_course_per_student, max_students_per_course,
    only_preferred_courses,
};
use crate::model::{Model, Response};
use crate::objective::preference_cost;
use crate::variables::AssignmentVariables;
use crate::{Assignment, CourseRegistry, Error, StudentRegistry};
use log::{debug, info};


/// Main method of the module to solve a course assignment problem.
///
/// It takes the registries of students and courses and creates an assignment of exactly one course to each student,
/// which only uses courses from the students' preference lists, respects all course size bounds (a course gets either
/// no students or between `min_size` and `max_size`) and minimizes the sum of the assigned courses' preference ranks.
///
/// Returns the assignment and its total cost, or `None` if no such assignment exists. Ties between equally good
/// assignments are broken by the solver.
///
/// # Errors
///
/// Fails, if a student's preference list references an unknown course, or if the solver fails for other reasons than
/// infeasibility.
pub fn solve(
    students: &StudentRegistry,
    courses: &CourseRegistry,
) -> Result<Option<(Assignment, u32)>, Error> {
    if students.is_empty() {
        debug!("No students given, nothing to solve.");
        return Ok(Some((Vec::new(), 0)));
    }

    let (model, variables) = build_model(students, courses)?;

    match model.solve()? {
        Response::Infeasible => {
            info!("No solution found.");
            Ok(None)
        }
        Response::Optimal(values) => {
            info!("Minimum of objective function: {}", values.objective_value());
            for (label, value) in values.labelled_values() {
                debug!("{} = {}", label, value as u8);
            }
            let assignment = variables
                .entries()
                .filter(|(_s, _c, v)| values.value(*v))
                .filter_map(|(s, c, _v)| {
                    students
                        .get(s)
                        .map(|st| (st.name().to_owned(), c.to_owned()))
                })
                .collect();
            Ok(Some((assignment, values.objective_value() as u32)))
        }
    }
}

/// Build the complete model (variables, all constraint families and the objective) without solving it.
fn build_model(
    students: &StudentRegistry,
    courses: &CourseRegistry,
) -> Result<(Model, AssignmentVariables), Error> {
    let mut model = Model::new();
    let variables = AssignmentVariables::new(students, courses, &mut model);

    model.add_all(exactly_one_course_per_student(&variables, students));
    model.add_all(max_students_per_course(&variables, courses));
    model.add_all(only_preferred_courses(&variables, courses, students)?);
    // Needs the model itself to create its indicator variables, see `constraints` module
    add_min_students_per_course(&variables, courses, &mut model);

    model.minimize(preference_cost(students, &variables)?);

    debug!(
        "Built model with {} assignment variables and {} constraints",
        variables.len(),
        model.constraints().len()
    );
    Ok((model, variables))
}
