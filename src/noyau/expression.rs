// src/noyau/expression.rs
//
// Une expression prête à évaluer : forme canonique + jetons + configuration.
//
// Contrats :
// - le texte est normalisé et tokenisé une seule fois, à l’affectation ;
// - les setters sont transactionnels : en cas d’erreur, l’état précédent reste intact ;
// - évaluer ne modifie rien (`&self`) : une même Expression peut servir à plusieurs fils,
//   chacun avec ses propres variables.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::config::ConfigEval;
use super::decimal::{Arrondi, Decimal};
use super::erreur::{ErreurCalcul, Resultat};
use super::eval::evalue_jetons;
use super::jetons::{format_tokens, tokenize, Tok};
use super::normalise::normalize;
use super::rpn::to_rpn;
use super::variables::Variables;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expression {
    canon: String,
    jetons: Vec<Tok>,
    config: ConfigEval,
}

impl Expression {
    /// Échelle 14, arrondi half-even.
    pub fn new(texte: &str) -> Resultat<Self> {
        Self::with_config(texte, ConfigEval::default())
    }

    pub fn with_config(texte: &str, config: ConfigEval) -> Resultat<Self> {
        let mut e = Self {
            config,
            ..Self::default()
        };
        e.set_expression(texte)?;
        Ok(e)
    }

    pub fn with_scale(texte: &str, max_scale: u32, arrondi: Arrondi) -> Resultat<Self> {
        Self::with_config(texte, ConfigEval::new(max_scale, arrondi)?)
    }

    /* ------------------------ Setters ------------------------ */

    /// Remplace l’expression. Un jeton inclassable laisse l’ancienne en place.
    pub fn set_expression(&mut self, texte: &str) -> Resultat<()> {
        let canon = normalize(texte);
        let jetons = tokenize(&canon)?;
        self.canon = canon;
        self.jetons = jetons;
        Ok(())
    }

    pub fn set_max_scale(&mut self, max_scale: u32) -> Resultat<()> {
        self.config.set_echelle_max(max_scale)
    }

    pub fn set_rounding_mode(&mut self, arrondi: Arrondi) -> Resultat<()> {
        self.config.set_arrondi(arrondi)
    }

    /* ------------------------ Lecture ------------------------ */

    /// Forme canonique (jetons séparés par un espace).
    pub fn expression(&self) -> &str {
        &self.canon
    }

    pub fn config(&self) -> ConfigEval {
        self.config
    }

    pub fn max_scale(&self) -> u32 {
        self.config.echelle_max()
    }

    pub fn rounding_mode(&self) -> Arrondi {
        self.config.arrondi()
    }

    /// Noms des variables utilisées, triés, sans leur signe.
    pub fn variables(&self) -> BTreeSet<&str> {
        self.jetons
            .iter()
            .filter_map(|t| match t {
                Tok::Var { nom, .. } => Some(nom.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn postfix(&self) -> Resultat<Vec<Tok>> {
        to_rpn(&self.jetons)
    }

    /// RPN en texte : "2 3 4 * +".
    pub fn to_postfix(&self) -> Resultat<String> {
        Ok(format_tokens(&self.postfix()?))
    }

    /// RPN sous forme de pile : `pop()` rend le premier jeton à évaluer.
    pub fn to_postfix_stack(&self) -> Resultat<Vec<String>> {
        Ok(self.postfix()?.iter().rev().map(Tok::to_string).collect())
    }

    /* ------------------------ Évaluation ------------------------ */

    pub fn evaluate(&self) -> Resultat<Decimal> {
        self.evaluate_opt(None)
    }

    pub fn evaluate_with(&self, vars: &Variables) -> Resultat<Decimal> {
        self.evaluate_opt(Some(vars))
    }

    fn evaluate_opt(&self, vars: Option<&Variables>) -> Resultat<Decimal> {
        evalue_jetons(&self.canon, &self.jetons, vars, &self.config).map(|(valeur, _rpn)| valeur)
    }
}

impl FromStr for Expression {
    type Err = ErreurCalcul;

    fn from_str(s: &str) -> Resultat<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canon)
    }
}
