/// A function of time whose change over a step bounds the step size.
///
/// The step controller evaluates the function at the last accepted time and at
/// candidate times, and shortens the step until the change in value stays
/// within a configured maximum.
///
/// Closures of the form `Fn(f64) -> f64` implement this trait with no knots.
pub trait LimitingFunction {
    /// Evaluates the function at `time`.
    ///
    /// Non-finite values are treated as exceeding any allowed change.
    fn value(&self, time: f64) -> f64;

    /// Times at which the function changes slope, in increasing order.
    ///
    /// Piecewise-defined functions return their knot times so the controller
    /// can stop on each of them. The default has no knots.
    fn knots(&self) -> &[f64] {
        &[]
    }
}

impl<F> LimitingFunction for F
where
    F: Fn(f64) -> f64,
{
    fn value(&self, time: f64) -> f64 {
        self(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ramp {
        knots: Vec<f64>,
    }

    impl LimitingFunction for Ramp {
        fn value(&self, time: f64) -> f64 {
            time.clamp(self.knots[0], self.knots[1])
        }

        fn knots(&self) -> &[f64] {
            &self.knots
        }
    }

    fn evaluate(function: &dyn LimitingFunction, time: f64) -> f64 {
        function.value(time)
    }

    #[test]
    fn closures_are_limiting_functions() {
        let slope = 3.0;
        let f = move |t: f64| slope * t;

        assert!((evaluate(&f, 2.0) - 6.0).abs() < f64::EPSILON);
        assert!(f.knots().is_empty());
    }

    #[test]
    fn custom_functions_expose_knots() {
        let ramp = Ramp {
            knots: vec![1.0, 4.0],
        };

        assert_eq!(ramp.knots(), &[1.0, 4.0]);
        assert!((evaluate(&ramp, 10.0) - 4.0).abs() < f64::EPSILON);
    }
}
