//! A thin layer over the external MILP solver (`good_lp` with the pure-Rust `microlp` backend).
//!
//! Constraints and objectives are built as plain values (`LinearExpr`, `Constraint`) so that they can be generated and
//! inspected independently of the solver. They are only translated into the solver's own types when the `Model` is
//! solved. All decision variables of a `Model` are boolean, which allows conditional constraints to be linearised with
//! a big-M term computed from the terms' coefficients (see `Model::add_enforced()`).

use crate::Error;
use good_lp::solvers::microlp::microlp;
use good_lp::{variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable};
use log::debug;
use std::collections::HashMap;

/// A weighted sum of boolean decision variables
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(i64, Variable)>,
}

impl LinearExpr {
    /// The unweighted sum of the given variables
    pub fn sum<I: IntoIterator<Item = Variable>>(variables: I) -> Self {
        Self {
            terms: variables.into_iter().map(|v| (1, v)).collect(),
        }
    }

    pub fn add_term(&mut self, coefficient: i64, variable: Variable) {
        self.terms.push((coefficient, variable));
    }

    /// All (coefficient, variable) terms in insertion order
    pub fn terms(&self) -> &[(i64, Variable)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Smallest and largest value this expression can take, given that all variables are boolean
    fn bounds(&self) -> (i64, i64) {
        self.terms
            .iter()
            .fold((0, 0), |(lb, ub), (c, _v)| (lb + (*c).min(0), ub + (*c).max(0)))
    }

    fn to_expression(&self) -> Expression {
        let mut expr = Expression::default();
        for (c, v) in self.terms.iter() {
            expr.add_mul(*c as f64, *v);
        }
        expr
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

/// A linear (in)equality `expr <comparison> rhs`
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    pub expr: LinearExpr,
    pub comparison: Comparison,
    pub rhs: i64,
}

impl Constraint {
    pub fn equal(expr: LinearExpr, rhs: i64) -> Self {
        Self {
            expr,
            comparison: Comparison::Equal,
            rhs,
        }
    }

    pub fn less_or_equal(expr: LinearExpr, rhs: i64) -> Self {
        Self {
            expr,
            comparison: Comparison::LessOrEqual,
            rhs,
        }
    }

    pub fn greater_or_equal(expr: LinearExpr, rhs: i64) -> Self {
        Self {
            expr,
            comparison: Comparison::GreaterOrEqual,
            rhs,
        }
    }

    /// Check the constraint against a full assignment of its variables
    pub fn is_satisfied_by<F: Fn(Variable) -> bool>(&self, value: F) -> bool {
        let lhs: i64 = self
            .expr
            .terms()
            .iter()
            .map(|(c, v)| if value(*v) { *c } else { 0 })
            .sum();
        match self.comparison {
            Comparison::Equal => lhs == self.rhs,
            Comparison::LessOrEqual => lhs <= self.rhs,
            Comparison::GreaterOrEqual => lhs >= self.rhs,
        }
    }

    fn to_solver_constraint(&self) -> good_lp::Constraint {
        let expr = self.expr.to_expression();
        let rhs = self.rhs as f64;
        match self.comparison {
            Comparison::Equal => expr.eq(rhs),
            Comparison::LessOrEqual => expr.leq(rhs),
            Comparison::GreaterOrEqual => expr.geq(rhs),
        }
    }
}

/// A boolean variable or its negation, used as enforcement condition of a constraint
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Literal {
    variable: Variable,
    negated: bool,
}

impl Literal {
    pub fn new(variable: Variable) -> Self {
        Self {
            variable,
            negated: false,
        }
    }

    pub fn negate(self) -> Self {
        Self {
            variable: self.variable,
            negated: !self.negated,
        }
    }
}

/// An optimization model under construction.
///
/// Variables, constraints and the objective are collected until `solve()` consumes the model. A solved model is
/// either optimal or infeasible, see `Response`.
pub struct Model {
    problem_variables: ProblemVariables,
    /// All variables in creation order, together with their labels
    variables: Vec<(Variable, String)>,
    constraints: Vec<Constraint>,
    objective: LinearExpr,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    pub fn new() -> Self {
        Self {
            problem_variables: ProblemVariables::new(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: LinearExpr::default(),
        }
    }

    /// Create a new boolean decision variable. The label is only used for debug output.
    pub fn new_bool_var<S: Into<String>>(&mut self, label: S) -> Variable {
        let label = label.into();
        let v = self
            .problem_variables
            .add(variable().binary().name(label.clone()));
        self.variables.push((v, label));
        v
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn add(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn add_all<I: IntoIterator<Item = Constraint>>(&mut self, constraints: I) {
        self.constraints.extend(constraints);
    }

    /// Add a constraint, which only needs to hold if `literal` is true.
    ///
    /// The condition is linearised with a big-M term: for `expr <= rhs` we add `expr - rhs <= M * (1 - literal)` with
    /// `M` being the largest possible value of `expr - rhs`; `>=` is handled symmetrically, `==` as both. A side
    /// which holds for any assignment of the expression's variables is not added at all.
    pub fn add_enforced(&mut self, constraint: Constraint, literal: Literal) {
        let (lb, ub) = constraint.expr.bounds();
        let rhs = constraint.rhs;
        if matches!(
            constraint.comparison,
            Comparison::LessOrEqual | Comparison::Equal
        ) && ub > rhs
        {
            let m = ub - rhs;
            let mut expr = constraint.expr.clone();
            if literal.negated {
                // expr - rhs <= M * var
                expr.add_term(-m, literal.variable);
                self.add(Constraint::less_or_equal(expr, rhs));
            } else {
                // expr - rhs <= M * (1 - var)
                expr.add_term(m, literal.variable);
                self.add(Constraint::less_or_equal(expr, rhs + m));
            }
        }
        if matches!(
            constraint.comparison,
            Comparison::GreaterOrEqual | Comparison::Equal
        ) && lb < rhs
        {
            let m = rhs - lb;
            let mut expr = constraint.expr;
            if literal.negated {
                // expr - rhs >= -M * var
                expr.add_term(m, literal.variable);
                self.add(Constraint::greater_or_equal(expr, rhs));
            } else {
                // expr - rhs >= -M * (1 - var)
                expr.add_term(-m, literal.variable);
                self.add(Constraint::greater_or_equal(expr, rhs - m));
            }
        }
    }

    /// Set the linear objective to be minimized
    pub fn minimize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Run the external solver on the model.
    ///
    /// Returns `Response::Infeasible` if no assignment satisfies all constraints. Any other solver failure is an
    /// error.
    pub fn solve(self) -> Result<Response, Error> {
        debug!(
            "Solving model with {} variables and {} constraints",
            self.variables.len(),
            self.constraints.len()
        );
        let objective = self.objective.to_expression();
        let mut problem = self
            .problem_variables
            .minimise(objective.clone())
            .using(microlp);
        for c in self.constraints.iter() {
            problem = problem.with(c.to_solver_constraint());
        }

        match problem.solve() {
            Ok(solution) => {
                let values = self
                    .variables
                    .iter()
                    .map(|(v, _label)| (*v, solution.value(*v)))
                    .collect();
                Ok(Response::Optimal(SolvedValues {
                    values,
                    labels: self.variables,
                    objective_value: solution.eval(objective),
                }))
            }
            Err(ResolutionError::Infeasible) => Ok(Response::Infeasible),
            Err(e) => Err(Error::Solver(e.to_string())),
        }
    }
}

/// Terminal state of a solved `Model`
#[derive(Debug)]
pub enum Response {
    /// An optimal assignment of all variables has been found
    Optimal(SolvedValues),
    /// No assignment satisfies all constraints
    Infeasible,
}

/// The variable values of an optimal solution
#[derive(Debug)]
pub struct SolvedValues {
    values: HashMap<Variable, f64>,
    labels: Vec<(Variable, String)>,
    objective_value: f64,
}

impl SolvedValues {
    /// Value of a boolean variable of the solved model. Variables not belonging to the model are false.
    pub fn value(&self, variable: Variable) -> bool {
        self.values.get(&variable).map_or(false, |v| *v > 0.5)
    }

    pub fn objective_value(&self) -> i64 {
        self.objective_value.round() as i64
    }

    /// All variables' labels and values in creation order
    pub fn labelled_values(&self) -> impl Iterator<Item = (&str, bool)> {
        self.labels
            .iter()
            .map(move |(v, label)| (label.as_str(), self.value(*v)))
    }
}
