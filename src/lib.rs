//! Calculatrice postfixe : expressions infixes (+ - * / ^, parenthèses, variables)
//! compilées en RPN puis évaluées en décimal exact.
//!
//! ```
//! use calculatrice_postfixe::{Expression, Variables};
//!
//! let e = Expression::new("x + y*2").unwrap();
//! assert_eq!(e.to_postfix().unwrap(), "x y 2 * +");
//!
//! let mut vars = Variables::new();
//! vars.insert("x".into(), "1.5".parse().unwrap());
//! vars.insert("y".into(), "2".parse().unwrap());
//! assert_eq!(e.evaluate_with(&vars).unwrap().to_string(), "5.5");
//! ```

pub mod noyau;

pub use noyau::{
    eval_expression, normalize, parse_variables, Arrondi, ConfigEval, Decimal, Demarche,
    ErreurCalcul, Expression, Resultat, Variables,
};
