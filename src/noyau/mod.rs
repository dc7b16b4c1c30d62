//! Noyau : compilateur + évaluateur d’expressions arithmétiques exactes
//!
//! Organisation interne :
//! - normalise.rs  : texte brut -> forme canonique (signes fusionnés, espaces)
//! - jetons.rs     : tokenisation + classement (nombre, variable, opérateur, parenthèse)
//! - rpn.rs        : shunting-yard (table de priorité historique)
//! - decimal.rs    : décimal exact (big int + échelle) + modes d’arrondi
//! - config.rs     : échelle max + arrondi (bornés)
//! - variables.rs  : valeurs des variables
//! - eval.rs       : pile d’évaluation + pipeline complet
//! - expression.rs : objet Expression (setters transactionnels, postfix, évaluation)
//! - erreur.rs     : erreurs typées

pub mod config;
pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod expression;
pub mod jetons;
pub mod normalise;
pub mod rpn;
pub mod variables;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;


// API publique minimale
pub use config::ConfigEval;
pub use decimal::{Arrondi, Decimal};
pub use erreur::{ErreurCalcul, Resultat};
pub use eval::{eval_expression, Demarche};
pub use expression::Expression;
pub use normalise::normalize;
pub use variables::{parse_variables, Variables};
