// src/noyau/variables.rs
//
// Valeurs des variables, fournies à chaque évaluation.
// Noms sensibles à la casse ; même grammaire que dans les expressions.

use std::collections::HashMap;

use super::decimal::Decimal;
use super::erreur::{ErreurCalcul, Resultat};
use super::jetons::{tokenize, Tok};

pub type Variables = HashMap<String, Decimal>;

/// Lit des liaisons écrites "x=3; y=-1.5" (séparateurs ';', ',' ou fin de ligne).
///
/// - morceaux vides ignorés ("x=1;;" est accepté)
/// - un nom doit être une variable valide, sans signe
/// - une valeur doit être un littéral décimal
/// - un nom répété : la dernière valeur gagne
pub fn parse_variables(texte: &str) -> Resultat<Variables> {
    let mut vars = Variables::new();

    for morceau in texte.split([';', ',', '\n']) {
        let morceau = morceau.trim();
        if morceau.is_empty() {
            continue;
        }

        let (nom, valeur) = morceau
            .split_once('=')
            .ok_or_else(|| ErreurCalcul::invalide(format!("liaison sans '=' : '{morceau}'")))?;
        let (nom, valeur) = (nom.trim(), valeur.trim());

        match tokenize(nom)?.as_slice() {
            [Tok::Var { negatif: false, .. }] if !nom.starts_with(['+', '-']) => {}
            _ => return Err(ErreurCalcul::invalide(format!("nom de variable invalide : '{nom}'"))),
        }

        vars.insert(nom.to_string(), valeur.parse::<Decimal>()?);
    }

    Ok(vars)
}
