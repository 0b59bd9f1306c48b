//! Statistics on the quality of a course assignment, independent of the solver.

use crate::{Assignment, CourseRegistry, StudentRegistry};
use std::collections::HashMap;

/// Calculate the total cost (sum of preference ranks) of a given assignment.
///
/// Returns None, if any student is not found in the registry or is assigned to a course outside their preference
/// list.
pub fn assignment_cost(students: &StudentRegistry, assignment: &Assignment) -> Option<u32> {
    let by_name: HashMap<&str, usize> = students.iter().map(|(id, s)| (s.name(), id)).collect();
    assignment
        .iter()
        .map(|(student, course)| {
            let id = by_name.get(student.as_str())?;
            students.get(*id)?.rank_of(course).map(|r| r as u32)
        })
        .sum()
}

/// Count how many students got their 1st, 2nd, ... choice.
///
/// Entry `i` of the result is the number of students assigned to the course at rank `i` of their preference list. The
/// vector is as long as the longest preference list. Assignments outside the preference list are not counted.
pub fn preference_histogram(students: &StudentRegistry, assignment: &Assignment) -> Vec<usize> {
    let by_name: HashMap<&str, usize> = students.iter().map(|(id, s)| (s.name(), id)).collect();
    let max_len = students
        .iter()
        .map(|(_id, s)| s.preferences().len())
        .max()
        .unwrap_or(0);
    let mut histogram = vec![0usize; max_len];
    for (student, course) in assignment.iter() {
        if let Some(rank) = by_name
            .get(student.as_str())
            .and_then(|id| students.get(*id))
            .and_then(|s| s.rank_of(course))
        {
            histogram[rank] += 1;
        }
    }
    histogram
}

/// Number of assigned students per course, in course registry order
pub fn course_sizes<'a>(
    courses: &'a CourseRegistry,
    assignment: &Assignment,
) -> Vec<(&'a str, usize)> {
    courses
        .iter()
        .map(|c| {
            (
                c.name(),
                assignment.iter().filter(|(_s, ac)| ac == c.name()).count(),
            )
        })
        .collect()
}
